use crate::ui::renderer::RenderFrame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show, position};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen, ScrollUp,
};
use crossterm::{execute, queue};
use serde::Deserialize;
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    AltScreen,

    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(TerminalSize),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

#[derive(Default)]
struct InlineState {
    block_start_row: u16,
    last_drawn_count: usize,
}

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    mode: RenderMode,
    inline: InlineState,
    last_frame: Vec<SpanLine>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            mode: RenderMode::default(),
            inline: InlineState::default(),
            last_frame: Vec::new(),
        })
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    /// Switches to raw mode. If setup fails after raw mode is on, raw mode
    /// and the screen state are rolled back before the error is returned.
    pub fn enter(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        if self.mode == RenderMode::Inline {
            let (_, row) = position()?;
            self.inline.block_start_row = row.min(self.size.height.saturating_sub(1));
        }

        terminal::enable_raw_mode()?;
        let setup = match self.mode {
            RenderMode::AltScreen => execute!(self.stdout, EnterAlternateScreen, Hide),
            RenderMode::Inline => execute!(self.stdout, DisableLineWrap, Hide),
        };

        let mode = self.mode;
        let stdout = &mut self.stdout;
        restore_on_error(setup, || {
            terminal::disable_raw_mode()?;
            match mode {
                RenderMode::AltScreen => execute!(*stdout, LeaveAlternateScreen, Show),
                RenderMode::Inline => execute!(*stdout, EnableLineWrap, Show),
            }
        })
    }

    /// Restores the terminal. The last frame stays visible afterwards in both modes.
    pub fn exit(&mut self) -> io::Result<()> {
        match self.mode {
            RenderMode::AltScreen => {
                terminal::disable_raw_mode()?;
                execute!(self.stdout, LeaveAlternateScreen, EnableLineWrap, Show)?;
                let lines = std::mem::take(&mut self.last_frame);
                let width = self.size.width;
                for line in &lines {
                    self.write_span_line(line, width, false)?;
                    self.stdout.write_all(b"\r\n")?;
                }
            }
            RenderMode::Inline => {
                let max_row = self.size.height.saturating_sub(1);
                let last_row = self
                    .inline
                    .block_start_row
                    .saturating_add(self.inline.last_drawn_count.saturating_sub(1) as u16)
                    .min(max_row);
                queue!(self.stdout, MoveTo(0, last_row))?;
                execute!(self.stdout, EnableLineWrap, Show)?;
                terminal::disable_raw_mode()?;
                self.stdout.write_all(b"\r\n")?;
            }
        }
        self.stdout.flush()
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                Ok(TerminalEvent::Resize(TerminalSize { width, height }))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    pub fn render_frame(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.refresh_size()?;
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }
        self.last_frame.clone_from(&frame.lines);
        match self.mode {
            RenderMode::AltScreen => self.render_altscreen(frame),
            RenderMode::Inline => self.render_inline(frame),
        }
    }

    fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.size = TerminalSize { width, height };
        Ok(())
    }

    fn render_altscreen(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        let scroll_offset = match frame.cursor {
            Some(cur) => (cur.row as usize).saturating_sub(height.saturating_sub(1)),
            None => frame.lines.len().saturating_sub(height),
        };

        queue!(self.stdout, BeginSynchronizedUpdate, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in frame.lines.iter().skip(scroll_offset).take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line, width, true)?;
        }
        self.place_cursor(frame, scroll_offset, 0)?;
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn render_inline(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        let prev_start = self.inline.block_start_row.min(self.size.height.saturating_sub(1));

        // Shift the block up when it no longer fits below its anchor row.
        let visible = frame.lines.len().min(height);
        let available = height.saturating_sub(prev_start as usize);
        let shift_up = visible.saturating_sub(available).min(prev_start as usize) as u16;
        let block_start = prev_start - shift_up;
        let draw_count = frame.lines.len().min(height - block_start as usize);
        let skip = frame.lines.len() - draw_count;

        queue!(self.stdout, BeginSynchronizedUpdate, Hide)?;
        if shift_up > 0 {
            queue!(
                self.stdout,
                MoveTo(0, self.size.height.saturating_sub(1)),
                ScrollUp(shift_up)
            )?;
        }
        queue!(self.stdout, MoveTo(0, block_start), Clear(ClearType::FromCursorDown))?;
        for (offset, line) in frame.lines.iter().skip(skip).take(draw_count).enumerate() {
            queue!(self.stdout, MoveTo(0, block_start + offset as u16))?;
            self.write_span_line(line, width, true)?;
        }
        self.place_cursor(frame, skip, block_start)?;
        queue!(self.stdout, EndSynchronizedUpdate)?;

        self.inline.block_start_row = block_start;
        self.inline.last_drawn_count = draw_count;
        self.stdout.flush()
    }

    fn place_cursor(&mut self, frame: &RenderFrame, skip: usize, origin_row: u16) -> io::Result<()> {
        let visible_row = frame
            .cursor
            .and_then(|cur| (cur.row as usize).checked_sub(skip).map(|row| (cur.col, row)))
            .filter(|(_, row)| *row < self.size.height as usize);
        match visible_row {
            Some((col, row)) => {
                let col = col.min(self.size.width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, origin_row + row as u16), Show)?;
            }
            None => queue!(self.stdout, Hide)?,
        }
        Ok(())
    }

    fn write_span_line(
        &mut self,
        line: &SpanLine,
        width: u16,
        keep_one_cell_margin: bool,
    ) -> io::Result<()> {
        let render_width = if keep_one_cell_margin && width > 1 {
            width - 1
        } else {
            width
        };
        let mut used = 0usize;
        for span in line {
            if used >= render_width as usize {
                break;
            }
            let clipped = clip_to_width(&span.text, (render_width as usize).saturating_sub(used));
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(self.stdout, Print(clipped.as_str()), ResetColor)?;
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out.0 |= KeyModifiers::SHIFT.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out.0 |= KeyModifiers::CONTROL.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out.0 |= KeyModifiers::ALT.0;
    }
    out
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

/// Runs `restore` when `result` failed. The original error wins over any
/// restore failure.
fn restore_on_error(
    result: io::Result<()>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    if result.is_err()
        && let Err(err) = restore()
    {
        warn!(error = %err, "terminal restore failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clip_respects_wide_characters() {
        assert_eq!(clip_to_width("héllo", 3), "hél");
        assert_eq!(clip_to_width("日本語", 5), "日本");
        assert_eq!(clip_to_width("a\nb", 5), "ab");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn modifiers_map_from_crossterm() {
        let mods = map_key_modifiers(CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::SHIFT);
        assert!(mods.contains(KeyModifiers::CONTROL));
        assert!(mods.contains(KeyModifiers::SHIFT));
        assert!(!mods.contains(KeyModifiers::ALT));
    }

    #[test]
    fn render_mode_parses_lowercase_names() {
        let mode: RenderMode = serde_yaml::from_str("inline").expect("parse");
        assert_eq!(mode, RenderMode::Inline);
        let mode: RenderMode = serde_yaml::from_str("altscreen").expect("parse");
        assert_eq!(mode, RenderMode::AltScreen);
    }

    #[test]
    fn failed_setup_runs_restore_and_keeps_error() {
        let restored = Cell::new(false);
        let result = restore_on_error(Err(io::Error::other("setup failed")), || {
            restored.set(true);
            Ok(())
        });

        assert!(restored.get());
        let err = result.expect_err("setup error is returned");
        assert_eq!(err.to_string(), "setup failed");
    }

    #[test]
    fn successful_setup_skips_restore() {
        let restored = Cell::new(false);
        let result = restore_on_error(Ok(()), || {
            restored.set(true);
            Ok(())
        });

        assert!(result.is_ok());
        assert!(!restored.get());
    }

    #[test]
    fn restore_failure_does_not_mask_setup_error() {
        let result = restore_on_error(
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "setup failed")),
            || Err(io::Error::other("restore failed")),
        );

        let err = result.expect_err("setup error is returned");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

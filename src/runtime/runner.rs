use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::event::{AppEvent, WidgetAction};
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::state::AppState;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
    queue: VecDeque<AppEvent>,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal) -> Self {
        Self {
            state,
            terminal,
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
            queue: VecDeque::new(),
        }
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Runs the event loop until exit. The terminal is restored even when
    /// the loop fails.
    pub fn run(&mut self) -> io::Result<()> {
        info!(mode = ?self.terminal.mode(), "runtime starting");
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.state.should_exit() {
                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                self.queue.push_back(AppEvent::Terminal(event));
                self.drain_queue()?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        if let Err(err) = &run_result {
            warn!(error = %err, "event loop failed");
        }
        info!(submitted = self.state.form().is_submitted(), "runtime stopped");
        run_result.and(exit_result)
    }

    fn drain_queue(&mut self) -> io::Result<()> {
        let mut render_requested = false;
        while let Some(event) = self.queue.pop_front() {
            render_requested |= self.dispatch_app_event(event);
        }
        if render_requested {
            self.render()?;
        }
        Ok(())
    }

    /// Returns whether the event asked for a re-render.
    fn dispatch_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Terminal(TerminalEvent::Resize(size)) => {
                self.terminal.set_size(size);
                true
            }
            AppEvent::Terminal(TerminalEvent::Key(key)) => {
                let command = self.key_bindings.resolve(key);
                debug!(?key, ?command, "key resolved");
                self.process_command(command)
            }
            AppEvent::Terminal(TerminalEvent::Tick) => false,
            AppEvent::Command(command) => self.process_command(command),
            AppEvent::Action(action) => {
                self.apply_widget_action(action);
                true
            }
        }
    }

    fn process_command(&mut self, command: Command) -> bool {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> bool {
        let mut render_requested = false;
        for effect in effects {
            match effect {
                Effect::Action(action) => {
                    self.queue.push_back(AppEvent::Action(action));
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }
        render_requested
    }

    fn apply_widget_action(&mut self, action: WidgetAction) {
        if let Some(command) = self.state.handle_widget_action(action) {
            self.queue.push_back(AppEvent::Command(command));
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.state);
        self.terminal.render_frame(&frame)
    }
}

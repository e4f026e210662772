//! Command line flags and the optional YAML config file.
//!
//! ```yaml
//! render_mode: inline
//! log_filter: debug
//! prefill:
//!   fullName: Jane Doe
//!   isAttendingWithGuest: true
//! ```
//!
//! Flags given on the command line win over the file.

use crate::error::{AppError, Result};
use crate::form::FormState;
use crate::terminal::RenderMode;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Event registration form in the terminal
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "regform")]
#[command(version)]
#[command(about = "Fill in and submit an event registration form")]
pub struct Cli {
    /// YAML config file with render mode, log filter and prefilled values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Draw below the prompt instead of on the alternate screen.
    #[arg(long)]
    pub inline: bool,

    /// Print the submitted summary as JSON on exit.
    #[arg(long)]
    pub json: bool,

    /// Write tracing output to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub render_mode: Option<RenderMode>,
    pub log_filter: Option<String>,
    pub prefill: FormState,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}

/// Settings after merging the config file with command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub render_mode: RenderMode,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    pub json: bool,
    pub prefill: FormState,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let config = Self::merge(cli, file);
        debug!(render_mode = ?config.render_mode, filter = %config.log_filter, "config loaded");
        Ok(config)
    }

    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        let render_mode = if cli.inline {
            RenderMode::Inline
        } else {
            file.render_mode.unwrap_or_default()
        };
        Self {
            render_mode,
            log_filter: file
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_file: cli.log_file.clone(),
            json: cli.json,
            prefill: file.prefill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_without_config_file() {
        let config = AppConfig::load(&Cli::default()).expect("load");
        assert_eq!(config.render_mode, RenderMode::AltScreen);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.prefill, FormState::default());
        assert!(!config.json);
    }

    #[test]
    fn file_values_are_loaded() {
        let file = config_file(
            "render_mode: inline\nlog_filter: debug\nprefill:\n  fullName: Jane Doe\n  age: \"30\"\n  isAttendingWithGuest: true\n",
        );
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };
        let config = AppConfig::load(&cli).expect("load");

        assert_eq!(config.render_mode, RenderMode::Inline);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.prefill.full_name, "Jane Doe");
        assert_eq!(config.prefill.age, "30");
        assert!(config.prefill.is_attending_with_guest);
        assert_eq!(config.prefill.email, "");
    }

    #[test]
    fn inline_flag_overrides_file() {
        let file = FileConfig {
            render_mode: Some(RenderMode::AltScreen),
            ..FileConfig::default()
        };
        let cli = Cli::try_parse_from(["regform", "--inline", "--json"]).expect("parse");
        let config = AppConfig::merge(&cli, file);
        assert_eq!(config.render_mode, RenderMode::Inline);
        assert!(config.json);
    }

    #[test]
    fn log_file_comes_from_cli() {
        let cli = Cli::try_parse_from(["regform", "--log-file", "/tmp/regform.log"])
            .expect("parse");
        let config = AppConfig::merge(&cli, FileConfig::default());
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/regform.log")));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("  \n").expect("parse"), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = config_file("render_mode: inline\ncolour: blue\n");
        let err = FileConfig::load(file.path()).expect_err("unknown key");
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.yaml");
        let err = FileConfig::load(&path).expect_err("missing");
        let AppError::ConfigRead { path: reported, .. } = err else {
            panic!("expected read error");
        };
        assert_eq!(reported, path);
    }
}

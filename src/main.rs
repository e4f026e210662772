use clap::Parser;
use regform::config::{AppConfig, Cli};
use regform::error::{AppError, Result};
use regform::form::RegistrationForm;
use regform::runtime::Runtime;
use regform::state::AppState;
use regform::terminal::Terminal;
use std::fs::OpenOptions;
use std::process;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli)?;
    setup_tracing(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "regform starting");

    let state = AppState::new(RegistrationForm::with_state(config.prefill.clone()));
    let terminal = Terminal::new()?.with_mode(config.render_mode);
    let mut runtime = Runtime::new(state, terminal);
    runtime.run()?;

    let form = runtime.into_state().into_form();
    if config.json
        && let Some(summary) = form.summary()
    {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }
    Ok(())
}

/// Logs go to `--log-file` only; stdout belongs to the form.
fn setup_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;
    let filter = EnvFilter::try_new(&config.log_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

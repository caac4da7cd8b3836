// Framework bootstrap for the command-line client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use crate::domain::{ApiError, Route, StorageError};
use crate::frameworks::cli::{self, Cli};
use crate::frameworks::config::{ClientConfig, ConfigError};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::FileTokenStorage;
use crate::use_cases::{SessionStore, UserMessage};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to initialize http client: {0}")]
    Client(#[from] ApiError),

    // Already classified for display.
    #[error("{0}")]
    View(UserMessage),

    #[error("please log in first (redirected to {})", .0.path())]
    Redirected(Route),

    #[error("unknown screen {0:?}")]
    UnknownRoute(String),

    #[error("unknown demo sample {0:?}")]
    UnknownSample(String),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("interrupted")]
    Interrupted,

    #[error("no data received")]
    NoData,
}

// Logs go to stderr so stdout stays clean for command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn build_state(config: &ClientConfig) -> Result<AppState, AppError> {
    let storage = Arc::new(FileTokenStorage::new(config.session_file.clone()));
    let session = Arc::new(SessionStore::init(storage)?);
    tracing::debug!(
        session_file = %config.session_file.display(),
        authenticated = session.is_authenticated(),
        "session restored"
    );

    let api = ApiClient::new(&config.api_url, config.request_timeout, session)?;
    tracing::debug!(
        api_url = %config.api_url,
        timeout_ms = config.request_timeout.map(|timeout| timeout.as_millis()),
        "api client configured"
    );

    Ok(AppState::from_client(api))
}

// Ctrl-C drops the running screen, which cancels its in-flight request.
pub async fn run_cli(cli: Cli) -> Result<(), AppError> {
    let mut config = ClientConfig::load()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_url(api_url)?;
    }
    let state = build_state(&config)?;

    tokio::select! {
        result = cli::execute(&state, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            Err(AppError::Interrupted)
        }
    }
}

pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::View(message)) => {
            tracing::debug!(category = ?message.category, "command failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

//! # Structured Logging Module
//!
//! Environment-aware structured logging for topology provisioning. Library
//! code only emits `tracing` events; installing a subscriber is left to the
//! binary, which may call [`init_structured_logging`].

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::constants::env;
use crate::error::DeclarationStage;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// `RUST_LOG` wins when set; otherwise the level follows `BROKER_ENV`.
/// Setting `BROKER_LOG_FORMAT=json` switches to JSON lines.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let json = std::env::var(env::LOG_FORMAT)
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // A global subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(environment = %environment, json, "Structured logging initialized");
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    environment_from(|key| std::env::var(key).ok())
}

/// Resolve the environment name: BROKER_ENV, then APP_ENV, then "development"
fn environment_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(env::ENVIRONMENT)
        .or_else(|| lookup("APP_ENV"))
        .unwrap_or_else(|| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for one exchange declaration step
pub fn log_exchange_operation(
    operation: &str,
    exchange: &str,
    exchange_type: &str,
    stage: DeclarationStage,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        exchange = %exchange,
        exchange_type = %exchange_type,
        stage = %stage,
        status = %status,
        "EXCHANGE_OPERATION"
    );
}

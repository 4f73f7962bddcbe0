//! # Topology Constants
//!
//! Defaults and naming conventions shared by the configuration model and the
//! declaration operation. The dead-letter suffix is wire-visible: deployed
//! broker topologies depend on it, so it must not change.

/// Exchange type used when the configuration does not name one
pub const DEFAULT_EXCHANGE_TYPE: &str = "topic";

/// Durability used when the configuration leaves `durable` unset
pub const DEFAULT_DURABLE: bool = true;

/// Auto-delete policy used when the configuration leaves `auto_delete` unset
pub const DEFAULT_AUTO_DELETE: bool = false;

/// Internal flag used when the configuration leaves `internal` unset
pub const DEFAULT_INTERNAL: bool = false;

/// Literal suffix appended to the primary exchange name
pub const DEAD_LETTER_SUFFIX: &str = ".deadletter";

/// AMQP exchange type names understood by the broker without plugins
pub mod exchange_types {
    pub const DIRECT: &str = "direct";
    pub const FANOUT: &str = "fanout";
    pub const HEADERS: &str = "headers";
    pub const TOPIC: &str = "topic";
}

/// Environment variables consulted by the loader and logging setup
pub mod env {
    /// Path to the broker configuration file
    pub const CONFIG_PATH: &str = "BROKER_CONFIG_PATH";
    /// Deployment environment (test, development, production)
    pub const ENVIRONMENT: &str = "BROKER_ENV";
    /// Prefix for per-key overrides, e.g. `BROKER__EXCHANGE__DURABLE=false`
    pub const OVERRIDE_PREFIX: &str = "BROKER";
    /// Separator between nested keys in overrides
    pub const OVERRIDE_SEPARATOR: &str = "__";
    /// Set to `json` for JSON log lines
    pub const LOG_FORMAT: &str = "BROKER_LOG_FORMAT";
}

/// Build the dead-letter exchange name for a primary exchange
pub fn dead_letter_exchange_name(exchange_name: &str) -> String {
    format!("{exchange_name}{DEAD_LETTER_SUFFIX}")
}

//! # Topology Error Types
//!
//! Structured errors for exchange configuration and provisioning, using
//! thiserror instead of `Box<dyn Error>` patterns.

use std::fmt;

use thiserror::Error;

use crate::messaging::ChannelError;

/// Which of the two declarations a provisioning failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationStage {
    /// The `<name>.deadletter` exchange, always declared first
    DeadLetter,
    /// The configured exchange itself
    Primary,
}

impl fmt::Display for DeclarationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationStage::DeadLetter => write!(f, "dead-letter"),
            DeclarationStage::Primary => write!(f, "primary"),
        }
    }
}

/// Errors surfaced by the topology configuration and declaration
#[derive(Error, Debug)]
pub enum TopologyError {
    /// A required configuration field was never set
    #[error("Missing required configuration field '{field}' in {context}")]
    MissingRequiredField { field: String, context: String },

    /// The broker rejected a declaration, or the channel failed underneath it
    #[error("Failed to provision {stage} exchange '{exchange_name}': {source}")]
    ProvisioningFailed {
        exchange_name: String,
        stage: DeclarationStage,
        #[source]
        source: ChannelError,
    },

    /// The configuration source could not be read or deserialized
    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },

    /// A configuration value was present but unusable
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl TopologyError {
    /// Create a missing required field error
    pub fn missing_required_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a provisioning failure for the given exchange
    pub fn provisioning_failed(
        exchange_name: impl Into<String>,
        stage: DeclarationStage,
        source: ChannelError,
    ) -> Self {
        Self::ProvisioningFailed {
            exchange_name: exchange_name.into(),
            stage,
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    /// Name of the exchange involved, for provisioning failures
    pub fn exchange_name(&self) -> Option<&str> {
        match self {
            Self::ProvisioningFailed { exchange_name, .. } => Some(exchange_name),
            _ => None,
        }
    }

    /// Whether the failure happened before any broker interaction
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::ProvisioningFailed { .. })
    }
}

/// Conversion from the config crate's loader errors
impl From<config::ConfigError> for TopologyError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => {
                TopologyError::missing_required_field(key, "configuration source")
            }
            other => TopologyError::configuration("config", other.to_string()),
        }
    }
}

/// Result type alias for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

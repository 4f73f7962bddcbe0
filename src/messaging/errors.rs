//! # Channel Error Types
//!
//! Failures reported by the broker channel collaborator. These are wrapped in
//! `TopologyError::ProvisioningFailed` before reaching the caller.

use thiserror::Error;

/// Failures from a single exchange declaration on a channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The exchange exists with different parameters (AMQP 406)
    #[error("Precondition failed: {message}")]
    PreconditionFailed { message: String },

    /// The channel or its connection is no longer usable
    #[error("Channel closed: {message}")]
    ChannelClosed { message: String },

    /// Any other broker or protocol failure
    #[error("Broker error: {message}")]
    Broker { message: String },
}

impl ChannelError {
    /// Create a precondition failed error
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Create a channel closed error
    pub fn closed(message: impl Into<String>) -> Self {
        Self::ChannelClosed {
            message: message.into(),
        }
    }

    /// Create a generic broker error
    pub fn broker(message: impl Into<String>) -> Self {
        Self::Broker {
            message: message.into(),
        }
    }

    /// Whether the failure came from the connection rather than the declaration.
    /// Callers that own the session may reconnect and declare again.
    pub fn is_connection_level(&self) -> bool {
        matches!(self, Self::ChannelClosed { .. })
    }
}

/// Conversion from lapin errors, classified by the AMQP reply they carry
impl From<lapin::Error> for ChannelError {
    fn from(err: lapin::Error) -> Self {
        let error_str = err.to_string();
        if error_str.contains("PRECONDITION_FAILED") || error_str.contains("406") {
            ChannelError::precondition_failed(error_str)
        } else if matches!(
            err,
            lapin::Error::InvalidChannelState(_)
                | lapin::Error::InvalidConnectionState(_)
                | lapin::Error::IOError(_)
        ) {
            ChannelError::closed(error_str)
        } else {
            ChannelError::broker(error_str)
        }
    }
}

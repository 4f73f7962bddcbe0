//! # Exchange Channel Trait
//!
//! The broker capability this crate consumes: declaring one exchange and
//! waiting for the broker's answer. Connection and channel lifecycle belong
//! to the caller; implementations only translate a declaration into their
//! client's call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::ChannelError;
use crate::config::ExchangeArguments;

/// Fully resolved parameters for a single exchange declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDeclaration {
    pub name: String,
    pub exchange_type: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub internal: bool,
    pub no_wait: bool,
    pub arguments: ExchangeArguments,
}

impl ExchangeDeclaration {
    /// Whether another declaration of the same name would be accepted by a
    /// broker that already holds this one.
    ///
    /// `no_wait` only affects the reply, so it is not compared.
    pub fn is_equivalent(&self, other: &ExchangeDeclaration) -> bool {
        self.name == other.name
            && self.exchange_type == other.exchange_type
            && self.durable == other.durable
            && self.auto_delete == other.auto_delete
            && self.internal == other.internal
            && self.arguments == other.arguments
    }
}

/// Administrative channel able to declare exchanges
///
/// # Example Implementation
///
/// ```ignore
/// #[async_trait]
/// impl ExchangeChannel for MyClientChannel {
///     async fn exchange_declare(
///         &self,
///         declaration: &ExchangeDeclaration,
///     ) -> Result<(), ChannelError> {
///         self.inner
///             .declare(&declaration.name, &declaration.exchange_type)
///             .await
///             .map_err(|e| ChannelError::broker(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeChannel: Send + Sync {
    /// Declare one exchange, returning once the broker has answered
    /// (unless `declaration.no_wait` is set).
    ///
    /// Redeclaring identical parameters must succeed; conflicting
    /// parameters for an existing exchange must fail.
    async fn exchange_declare(&self, declaration: &ExchangeDeclaration)
        -> Result<(), ChannelError>;
}

#[async_trait]
impl<T: ExchangeChannel + ?Sized> ExchangeChannel for std::sync::Arc<T> {
    async fn exchange_declare(
        &self,
        declaration: &ExchangeDeclaration,
    ) -> Result<(), ChannelError> {
        (**self).exchange_declare(declaration).await
    }
}

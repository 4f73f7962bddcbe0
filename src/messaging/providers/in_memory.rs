//! # In-Memory Exchange Channel
//!
//! In-process stand-in for a broker channel, for tests and local development.
//!
//! ## Features
//!
//! - **Call Log**: every declaration attempt is recorded in order
//! - **Broker Semantics**: identical redeclares succeed, conflicting ones fail
//!   with `PreconditionFailed`
//! - **Fault Injection**: fail a named exchange, or close the whole channel

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::messaging::channel::{ExchangeChannel, ExchangeDeclaration};
use crate::messaging::ChannelError;

#[derive(Debug, Default)]
struct InMemoryBrokerState {
    /// Every declaration attempt, including failed ones
    calls: Vec<ExchangeDeclaration>,
    /// Exchanges that currently exist (name -> accepted declaration)
    exchanges: HashMap<String, ExchangeDeclaration>,
    /// Injected failures by exchange name
    failures: HashMap<String, ChannelError>,
    /// Reason the channel was closed, if it was
    closed: Option<String>,
}

/// In-memory exchange channel
///
/// # Example
///
/// ```rust
/// use broker_topology::config::ExchangeConfig;
/// use broker_topology::messaging::providers::InMemoryExchangeChannel;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let channel = InMemoryExchangeChannel::new();
/// ExchangeConfig::builder().name("orders").build().declare(&channel).await?;
///
/// assert!(channel.exchange("orders.deadletter").is_some());
/// assert!(channel.exchange("orders").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryExchangeChannel {
    state: Mutex<InMemoryBrokerState>,
}

impl InMemoryExchangeChannel {
    /// Create an empty in-memory broker channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every declaration of `exchange_name` fail with `error`
    pub fn fail_on(&self, exchange_name: impl Into<String>, error: ChannelError) {
        self.state.lock().failures.insert(exchange_name.into(), error);
    }

    /// Remove an injected failure
    pub fn clear_failure(&self, exchange_name: &str) {
        self.state.lock().failures.remove(exchange_name);
    }

    /// Close the channel; later declarations fail with `ChannelClosed`
    pub fn close(&self, reason: impl Into<String>) {
        self.state.lock().closed = Some(reason.into());
    }

    /// Every declaration attempted so far, in order
    pub fn calls(&self) -> Vec<ExchangeDeclaration> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// The declaration the broker accepted for `name`, if the exchange exists
    pub fn exchange(&self, name: &str) -> Option<ExchangeDeclaration> {
        self.state.lock().exchanges.get(name).cloned()
    }

    /// Names of existing exchanges, sorted
    pub fn exchange_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().exchanges.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl ExchangeChannel for InMemoryExchangeChannel {
    async fn exchange_declare(
        &self,
        declaration: &ExchangeDeclaration,
    ) -> Result<(), ChannelError> {
        let mut state = self.state.lock();
        state.calls.push(declaration.clone());

        if let Some(reason) = &state.closed {
            return Err(ChannelError::closed(reason.clone()));
        }

        if let Some(error) = state.failures.get(&declaration.name) {
            return Err(error.clone());
        }

        let equivalent = state
            .exchanges
            .get(&declaration.name)
            .map(|existing| existing.is_equivalent(declaration));

        match equivalent {
            Some(false) => Err(ChannelError::precondition_failed(format!(
                "inequivalent arguments for exchange '{}' in vhost '/'",
                declaration.name
            ))),
            Some(true) => Ok(()),
            None => {
                state
                    .exchanges
                    .insert(declaration.name.clone(), declaration.clone());
                Ok(())
            }
        }
    }
}

#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Broker Topology
//!
//! Declarative exchange topology for AMQP brokers.
//!
//! ## Overview
//!
//! An [`ExchangeConfig`] describes one exchange. Its optional properties are
//! kept exactly as configured and resolved to defaults only when read:
//!
//! | Property      | Default   |
//! |---------------|-----------|
//! | `type`        | `topic`   |
//! | `durable`     | `true`    |
//! | `auto_delete` | `false`   |
//! | `internal`    | `false`   |
//! | `arguments`   | empty     |
//!
//! [`ExchangeConfig::declare`] provisions `<name>.deadletter` and then
//! `<name>` on any [`ExchangeChannel`], sharing the resolved flags but
//! attaching the configured arguments only to the primary exchange.
//!
//! ## Module Organization
//!
//! - [`config`] - Exchange and broker configuration, plus file/env loading
//! - [`messaging`] - Channel trait, declaration operation, and providers
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//! - [`constants`] - Defaults and naming conventions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use broker_topology::config::ExchangeConfig;
//! use broker_topology::messaging::providers::InMemoryExchangeChannel;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let channel = InMemoryExchangeChannel::new();
//! let exchange = ExchangeConfig::builder().name("orders").build();
//!
//! exchange.declare(&channel).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                 # Unit and integration tests
//! cargo test -- --ignored    # Live RabbitMQ tests (RABBITMQ_URL)
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod messaging;

pub use config::{BrokerConfig, ConfigFormat, ConfigLoader, ExchangeArguments, ExchangeConfig};
pub use constants::{dead_letter_exchange_name, DEAD_LETTER_SUFFIX, DEFAULT_EXCHANGE_TYPE};
pub use error::{DeclarationStage, TopologyError, TopologyResult};
pub use messaging::{ChannelError, DeclarationState, ExchangeChannel, ExchangeDeclaration};

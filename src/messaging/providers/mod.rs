//! # Exchange Channel Providers
//!
//! - `rabbitmq`: `ExchangeChannel` for `lapin::Channel`
//! - `in_memory`: in-process broker double with a call log

pub mod in_memory;
pub mod rabbitmq;

pub use in_memory::InMemoryExchangeChannel;
pub use rabbitmq::{exchange_kind, field_table};

//! # Messaging Module
//!
//! Exchange topology provisioning against a broker channel.

pub mod channel;
pub mod errors;
pub mod exchange;
pub mod providers;

pub use channel::{ExchangeChannel, ExchangeDeclaration};
pub use errors::ChannelError;
pub use exchange::DeclarationState;

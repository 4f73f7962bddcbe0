//! # Exchange Declaration
//!
//! Provisions an [`ExchangeConfig`] on a broker channel. Two declarations are
//! issued in order, each waiting for the broker's reply:
//!
//! 1. `<name>.deadletter`, with the resolved flags and no arguments
//! 2. `<name>`, with the same flags and the configured arguments
//!
//! The first failure aborts and is returned as
//! [`TopologyError::ProvisioningFailed`]. Nothing is retried or rolled back,
//! so a failure on the primary leaves the dead-letter exchange in place. The
//! dead-letter exchange is not wired into the primary's arguments; callers
//! that want `x-dead-letter-exchange` set it in the arguments themselves.

use tracing::{debug, error};

use super::channel::{ExchangeChannel, ExchangeDeclaration};
use crate::config::{ExchangeArguments, ExchangeConfig};
use crate::error::{DeclarationStage, TopologyError, TopologyResult};
use crate::logging::log_exchange_operation;

/// How far a declaration got on the broker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationState {
    NotDeclared,
    DeadLetterDeclared,
    FullyDeclared,
}

impl ExchangeConfig {
    /// The two declarations `declare` issues, dead-letter first
    pub fn declarations(&self) -> TopologyResult<[ExchangeDeclaration; 2]> {
        let name = self.name()?;
        let dead_letter_name = self.dead_letter_name()?;

        let dead_letter = ExchangeDeclaration {
            name: dead_letter_name,
            exchange_type: self.exchange_type().to_string(),
            durable: self.durable(),
            auto_delete: self.auto_delete(),
            internal: self.internal(),
            no_wait: false,
            arguments: ExchangeArguments::new(),
        };

        let primary = ExchangeDeclaration {
            name: name.to_string(),
            arguments: self.arguments(),
            ..dead_letter.clone()
        };

        Ok([dead_letter, primary])
    }

    /// Declare the dead-letter exchange and then this exchange on `channel`
    pub async fn declare<C>(&self, channel: &C) -> TopologyResult<()>
    where
        C: ExchangeChannel + ?Sized,
    {
        let [dead_letter, primary] = self.declarations().inspect_err(|e| {
            error!(error = %e, "Exchange configuration is not declarable");
        })?;

        debug!(
            exchange = %primary.name,
            dead_letter_exchange = %dead_letter.name,
            exchange_type = %primary.exchange_type,
            "Setting up exchange"
        );

        let mut state = DeclarationState::NotDeclared;
        for (stage, declaration) in [
            (DeclarationStage::DeadLetter, &dead_letter),
            (DeclarationStage::Primary, &primary),
        ] {
            if let Err(source) = channel.exchange_declare(declaration).await {
                error!(
                    exchange = %declaration.name,
                    stage = %stage,
                    state = ?state,
                    error = %source,
                    "Error setting up exchange"
                );
                return Err(TopologyError::provisioning_failed(
                    declaration.name.clone(),
                    stage,
                    source,
                ));
            }

            log_exchange_operation(
                "exchange_declare",
                &declaration.name,
                &declaration.exchange_type,
                stage,
                "declared",
            );
            state = match stage {
                DeclarationStage::DeadLetter => DeclarationState::DeadLetterDeclared,
                DeclarationStage::Primary => DeclarationState::FullyDeclared,
            };
        }

        debug!(exchange = %primary.name, state = ?state, "Exchange setup success");
        Ok(())
    }
}

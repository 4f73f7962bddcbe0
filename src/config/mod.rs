//! # Broker Topology Configuration
//!
//! Configuration values for the exchange this crate provisions. Optional
//! properties are stored exactly as the user gave them (`None` when absent);
//! defaults are applied only when an accessor reads them, so the stored value
//! stays a faithful record of what was configured.
//!
//! ## Usage
//!
//! ```rust
//! use broker_topology::config::ExchangeConfig;
//!
//! let config = ExchangeConfig::builder()
//!     .name("events")
//!     .auto_delete(true)
//!     .build();
//!
//! assert_eq!(config.exchange_type(), "topic");
//! assert!(config.durable());
//! assert!(config.auto_delete());
//! ```

pub mod loader;

use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::constants::{
    dead_letter_exchange_name, DEFAULT_AUTO_DELETE, DEFAULT_DURABLE, DEFAULT_EXCHANGE_TYPE,
    DEFAULT_INTERNAL,
};
use crate::error::{TopologyError, TopologyResult};

pub use loader::{ConfigFormat, ConfigLoader};

/// Broker-specific declaration arguments (e.g. `x-max-length`)
pub type ExchangeArguments = HashMap<String, serde_json::Value>;

/// Exchange identity plus optional declaration properties
///
/// Every optional field is tri-state: unset, or explicitly set (including to
/// `false` or an empty table). Use the accessors to read resolved values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct ExchangeConfig {
    #[serde(default)]
    #[builder(into)]
    name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    exchange_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    durable: Option<bool>,

    #[serde(
        default,
        alias = "autoDelete",
        alias = "autodelete",
        skip_serializing_if = "Option::is_none"
    )]
    auto_delete: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<ExchangeArguments>,
}

impl ExchangeConfig {
    /// Exchange name; the only property without a default
    pub fn name(&self) -> TopologyResult<&str> {
        if self.name.is_empty() {
            return Err(TopologyError::missing_required_field(
                "name",
                "exchange configuration",
            ));
        }
        Ok(&self.name)
    }

    /// Exchange type, `topic` unless configured
    pub fn exchange_type(&self) -> &str {
        self.exchange_type.as_deref().unwrap_or(DEFAULT_EXCHANGE_TYPE)
    }

    /// Whether the exchange survives a broker restart, `true` unless configured
    pub fn durable(&self) -> bool {
        self.durable.unwrap_or(DEFAULT_DURABLE)
    }

    /// Whether the broker deletes the exchange once its last binding is
    /// removed, `false` unless configured
    pub fn auto_delete(&self) -> bool {
        self.auto_delete.unwrap_or(DEFAULT_AUTO_DELETE)
    }

    /// Whether only other exchanges may publish to this one. Defaults to
    /// `false`, so clients can publish directly.
    pub fn internal(&self) -> bool {
        self.internal.unwrap_or(DEFAULT_INTERNAL)
    }

    /// Declaration arguments; a fresh empty table when none were configured
    pub fn arguments(&self) -> ExchangeArguments {
        self.arguments.clone().unwrap_or_default()
    }

    /// Name of the dead-letter exchange declared alongside this one
    pub fn dead_letter_name(&self) -> TopologyResult<String> {
        self.name().map(dead_letter_exchange_name)
    }

    /// Names of the optional properties the user set explicitly
    pub fn explicit_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.exchange_type.is_some() {
            fields.push("type");
        }
        if self.durable.is_some() {
            fields.push("durable");
        }
        if self.auto_delete.is_some() {
            fields.push("auto_delete");
        }
        if self.internal.is_some() {
            fields.push("internal");
        }
        if self.arguments.is_some() {
            fields.push("arguments");
        }
        fields
    }
}

/// An exchange plus the consumers that will attach to it
///
/// Consumer configuration is owned by the consumer side; this crate only
/// carries it, keyed by unique consumer name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokerConfig<C = serde_json::Value> {
    pub exchange: ExchangeConfig,

    #[serde(default = "HashMap::new")]
    pub consumers: HashMap<String, C>,
}

impl<C> BrokerConfig<C> {
    /// Create a broker configuration with no consumers
    pub fn new(exchange: ExchangeConfig) -> Self {
        Self {
            exchange,
            consumers: HashMap::new(),
        }
    }

    /// Add a consumer, replacing any previous one with the same name
    pub fn with_consumer(mut self, name: impl Into<String>, consumer: C) -> Self {
        self.consumers.insert(name.into(), consumer);
        self
    }

    pub fn exchange(&self) -> &ExchangeConfig {
        &self.exchange
    }

    pub fn consumer(&self, name: &str) -> Option<&C> {
        self.consumers.get(name)
    }

    /// Consumer names in sorted order
    pub fn consumer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.consumers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fail fast on configuration that can never be declared
    pub fn validate(&self) -> TopologyResult<()> {
        self.exchange.name()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_resolve_to_defaults() {
        let config = ExchangeConfig::builder().name("orders").build();

        assert_eq!(config.name().unwrap(), "orders");
        assert_eq!(config.exchange_type(), "topic");
        assert!(config.durable());
        assert!(!config.auto_delete());
        assert!(!config.internal());
        assert!(config.arguments().is_empty());
        assert!(config.explicit_fields().is_empty());
    }

    #[test]
    fn test_explicit_falsy_values_win() {
        let config = ExchangeConfig::builder()
            .name("orders")
            .durable(false)
            .auto_delete(false)
            .internal(false)
            .arguments(ExchangeArguments::new())
            .build();

        assert!(!config.durable());
        assert!(!config.auto_delete());
        assert!(!config.internal());
        assert!(config.arguments().is_empty());
        assert_eq!(
            config.explicit_fields(),
            vec!["durable", "auto_delete", "internal", "arguments"]
        );
    }

    #[test]
    fn test_explicit_values_win() {
        let mut arguments = ExchangeArguments::new();
        arguments.insert("alternate-exchange".to_string(), json!("unrouted"));

        let config = ExchangeConfig::builder()
            .name("audit")
            .exchange_type("fanout")
            .auto_delete(true)
            .internal(true)
            .arguments(arguments.clone())
            .build();

        assert_eq!(config.exchange_type(), "fanout");
        assert!(config.auto_delete());
        assert!(config.internal());
        assert_eq!(config.arguments(), arguments);
    }

    #[test]
    fn test_empty_name_is_missing() {
        let config = ExchangeConfig::default();
        let err = config.name().unwrap_err();
        assert!(matches!(
            err,
            TopologyError::MissingRequiredField { ref field, .. } if field == "name"
        ));
        assert!(config.dead_letter_name().is_err());
    }

    #[test]
    fn test_accessors_do_not_mutate_stored_config() {
        let config = ExchangeConfig::builder().name("orders").build();
        let before = config.clone();

        let _ = config.exchange_type();
        let _ = config.durable();
        let _ = config.arguments();

        assert_eq!(config, before);
        let serialized = serde_json::to_value(&config).unwrap();
        assert_eq!(serialized, json!({ "name": "orders" }));
    }

    #[test]
    fn test_dead_letter_name() {
        let config = ExchangeConfig::builder().name("orders").build();
        assert_eq!(config.dead_letter_name().unwrap(), "orders.deadletter");
    }

    #[test]
    fn test_deserialize_keeps_absent_fields_unset() {
        let config: ExchangeConfig = serde_json::from_value(json!({
            "name": "events",
            "autoDelete": true,
            "arguments": { "x-max-length": 1000 }
        }))
        .unwrap();

        assert_eq!(config.explicit_fields(), vec!["auto_delete", "arguments"]);
        assert!(config.auto_delete());
        assert_eq!(config.arguments()["x-max-length"], json!(1000));
    }

    #[test]
    fn test_deserialize_type_key() {
        let config: ExchangeConfig =
            serde_json::from_value(json!({ "name": "logs", "type": "fanout" })).unwrap();
        assert_eq!(config.exchange_type(), "fanout");
    }

    #[test]
    fn test_broker_config_structure() {
        let broker: BrokerConfig = BrokerConfig::new(ExchangeConfig::builder().name("orders").build())
            .with_consumer("shipping", json!({ "queue": "orders.shipping" }))
            .with_consumer("billing", json!({ "queue": "orders.billing" }))
            .with_consumer("shipping", json!({ "queue": "orders.shipping.v2" }));

        assert_eq!(broker.exchange().name().unwrap(), "orders");
        assert_eq!(broker.consumer_names(), vec!["billing", "shipping"]);
        assert_eq!(
            broker.consumer("shipping"),
            Some(&json!({ "queue": "orders.shipping.v2" }))
        );
        assert!(broker.consumer("missing").is_none());
        assert!(broker.validate().is_ok());
    }

    #[test]
    fn test_broker_config_validate_rejects_unnamed_exchange() {
        let broker: BrokerConfig = BrokerConfig::default();
        assert!(matches!(
            broker.validate(),
            Err(TopologyError::MissingRequiredField { .. })
        ));
    }
}

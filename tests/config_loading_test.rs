//! Configuration Loading Tests
//!
//! Loading `BrokerConfig` from files and in-memory documents, and checking
//! that absent keys stay unset until the accessors resolve them. Tests that
//! change process environment variables live in `config_env_override_test.rs`.

use std::io::Write;

use broker_topology::{BrokerConfig, ConfigFormat, ConfigLoader, TopologyError};
use serde::Deserialize;
use serde_json::json;

fn write_config(extension: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("create temp config file");
    file.write_all(contents.as_bytes())
        .expect("write temp config file");
    file
}

#[test]
fn toml_file_loads_exchange_and_consumers() {
    let file = write_config(
        "toml",
        r#"
        [exchange]
        name = "events"
        auto_delete = true

        [exchange.arguments]
        x-max-length = 1000

        [consumers.audit]
        queue = "events.audit"
        prefetch = 10
        "#,
    );

    let config: BrokerConfig = ConfigLoader::load_from_path(file.path()).unwrap();

    assert_eq!(config.exchange.name().unwrap(), "events");
    assert_eq!(config.exchange.exchange_type(), "topic");
    assert!(config.exchange.durable());
    assert!(config.exchange.auto_delete());
    assert_eq!(config.exchange.arguments()["x-max-length"], json!(1000));
    assert_eq!(
        config.consumer("audit"),
        Some(&json!({ "queue": "events.audit", "prefetch": 10 }))
    );
}

#[test]
fn yaml_file_accepts_camel_case_auto_delete() {
    let file = write_config(
        "yaml",
        "exchange:\n  name: orders\n  type: direct\n  autoDelete: false\n",
    );

    let config: BrokerConfig = ConfigLoader::load_from_path(file.path()).unwrap();

    assert_eq!(config.exchange.exchange_type(), "direct");
    assert!(!config.exchange.auto_delete());
    let explicit = config.exchange.explicit_fields();
    assert!(explicit.contains(&"type"));
    assert!(explicit.contains(&"auto_delete"));
    assert!(!explicit.contains(&"durable"));
}

#[test]
fn json_document_loads_typed_consumers() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct ConsumerConfig {
        queue: String,
        routing_key: String,
    }

    let document = r#"{
        "exchange": { "name": "orders", "durable": false },
        "consumers": {
            "shipping": { "queue": "orders.shipping", "routing_key": "order.created" }
        }
    }"#;

    let config: BrokerConfig<ConsumerConfig> =
        ConfigLoader::load_from_str(document, ConfigFormat::Json).unwrap();

    assert!(!config.exchange.durable());
    assert_eq!(
        config.consumer("shipping"),
        Some(&ConsumerConfig {
            queue: "orders.shipping".to_string(),
            routing_key: "order.created".to_string(),
        })
    );
}

#[test]
fn unnamed_exchange_loads_but_fails_validation() {
    let config: BrokerConfig =
        ConfigLoader::load_from_str("[exchange]\ndurable = true\n", ConfigFormat::Toml).unwrap();

    assert!(matches!(
        config.validate(),
        Err(TopologyError::MissingRequiredField { .. })
    ));
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = write_config("ini", "name=orders\n");
    let result: Result<BrokerConfig, _> = ConfigLoader::load_from_path(file.path());
    assert!(matches!(result, Err(TopologyError::InvalidValue { .. })));
}

#[test]
fn malformed_document_is_a_configuration_error() {
    let result: Result<BrokerConfig, _> =
        ConfigLoader::load_from_str("[exchange\nname = ", ConfigFormat::Toml);
    assert!(matches!(result, Err(TopologyError::Configuration { .. })));
}

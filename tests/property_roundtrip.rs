use devnet_config::domain::models::MAX_GAS_LIMIT;
use devnet_config::{ConfigError, ConfigLoader, SourceFormat};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn network_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("127.0.0.1".to_string()), "[a-z]{1,10}(\\.[a-z]{1,10}){0,2}"],
        1u16..=u16::MAX,
        prop_oneof![Just(json!("*")), any::<u64>().prop_map(|id| json!(id))],
        proptest::option::of(any::<[u8; 20]>()),
        1..=MAX_GAS_LIMIT,
        any::<u64>(),
    )
        .prop_map(|(host, port, network_id, from, gas, gas_price)| {
            let mut network = json!({
                "host": host,
                "port": port,
                "network_id": network_id,
                "gas": gas,
                "gasPrice": gas_price,
            });
            if let Some(bytes) = from {
                network["from"] = json!(hex::encode(bytes));
            }
            network
        })
}

fn compiler_strategy() -> impl Strategy<Value = Value> {
    (any::<bool>(), proptest::option::of(0u32..1_000_000)).prop_map(|(enabled, runs)| {
        let runs = if enabled { Some(runs.unwrap_or(200)) } else { runs };
        let mut optimizer = json!({ "enabled": enabled });
        if let Some(runs) = runs {
            optimizer["runs"] = json!(runs);
        }
        json!({ "settings": { "optimizer": optimizer } })
    })
}

fn document_strategy() -> impl Strategy<Value = Value> {
    (
        1u16..=u16::MAX,
        prop::collection::btree_map("[a-z][a-z0-9_]{0,11}", network_strategy(), 1..4),
        prop::collection::btree_map("[a-z]{1,8}", compiler_strategy(), 1..3),
    )
        .prop_map(|(rpc_port, networks, compilers)| {
            json!({
                "rpc": { "host": "127.0.0.1", "port": rpc_port },
                "networks": networks.into_iter().collect::<Map<String, Value>>(),
                "compilers": compilers.into_iter().collect::<Map<String, Value>>(),
            })
        })
}

proptest! {
    /// Property: the rpc endpoint comes back exactly as written
    #[test]
    fn prop_rpc_endpoint_preserved(raw in document_strategy()) {
        let document = ConfigLoader::load_value(&raw).unwrap();
        prop_assert_eq!(document.rpc_endpoint().host.as_str(), raw["rpc"]["host"].as_str().unwrap());
        prop_assert_eq!(u64::from(document.rpc_endpoint().port), raw["rpc"]["port"].as_u64().unwrap());
    }

    /// Property: serializing and reloading yields an equal document
    #[test]
    fn prop_json_roundtrip(raw in document_strategy()) {
        let original = ConfigLoader::load_value(&raw).unwrap();
        let reloaded = ConfigLoader::load_value(&serde_json::to_value(&original).unwrap()).unwrap();
        prop_assert_eq!(reloaded, original);
    }

    /// Property: the YAML form round-trips as well
    #[test]
    fn prop_yaml_roundtrip(raw in document_strategy()) {
        let original = ConfigLoader::load_value(&raw).unwrap();
        let yaml = serde_yaml::to_string(&original).unwrap();
        let reloaded = ConfigLoader::load_str(&yaml, SourceFormat::Yaml, "roundtrip").unwrap();
        prop_assert_eq!(reloaded, original);
    }

    /// Property: ports outside 1..=65535 are always rejected with the field path
    #[test]
    fn prop_invalid_port_rejected(
        raw in document_strategy(),
        port in prop_oneof![Just(0u64), 65_536u64..10_000_000],
    ) {
        let mut raw = raw;
        raw["rpc"]["port"] = json!(port);
        let err = ConfigLoader::load_value(&raw).unwrap_err();
        let out_of_range = matches!(err, ConfigError::OutOfRange { .. });
        prop_assert!(out_of_range, "expected OutOfRange, got {:?}", err);
        prop_assert_eq!(err.path(), Some("rpc.port"));
    }
}

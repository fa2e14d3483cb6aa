mod common;

use devnet_config::{
    ConfigAccessor, ConfigError, ConfigLoader, ConfigWarning, NetworkId, SourceFormat,
};
use serde_json::json;

#[test]
fn test_reference_fixture_loads() {
    let accessor = ConfigAccessor::new(ConfigLoader::load_file(common::fixture_path()).unwrap());

    let rpc = accessor.rpc_endpoint();
    assert_eq!(rpc.host, "127.0.0.1");
    assert_eq!(rpc.port, 8543);

    let test = accessor.network("test").unwrap();
    assert_eq!(test.gas_price, Some(1));
    assert_eq!(test.gas_limit, Some(17_592_186_044_415));
    assert_eq!(test.network_id, NetworkId::Any);
    assert_eq!(
        test.from_address.map(|a| a.to_hex()).as_deref(),
        Some("854c55d65bf425569263d5fae98d01bd7a96fd3c")
    );

    let solc = accessor.compiler("solc").unwrap();
    assert!(solc.optimizer.enabled);
    assert_eq!(solc.optimizer.runs, Some(200));
}

#[test]
fn test_fixture_matches_injected_value() {
    let from_file = ConfigLoader::load_file(common::fixture_path()).unwrap();
    let injected = ConfigLoader::load_value(&common::reference_value()).unwrap();
    assert_eq!(from_file, injected);
}

#[test]
fn test_embedded_literal() {
    const EMBEDDED: &str = include_str!("fixtures/truffle-geth.yaml");
    let document = ConfigLoader::load_str(EMBEDDED, SourceFormat::Yaml, "embedded").unwrap();
    assert_eq!(document.rpc.url(), "http://127.0.0.1:8543");
}

#[test]
fn test_missing_networks_reports_path() {
    let mut raw = common::reference_value();
    raw.as_object_mut().unwrap().remove("networks");

    let err = ConfigLoader::load_value(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { .. }));
    assert_eq!(err.path(), Some("networks"));
}

#[test]
fn test_port_70000_out_of_range() {
    let mut raw = common::reference_value();
    raw["networks"]["test"]["port"] = json!(70000);

    let err = ConfigLoader::load_value(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
    assert_eq!(err.path(), Some("networks.test.port"));
}

#[test]
fn test_zero_networks_is_empty_configuration() {
    let mut raw = common::reference_value();
    raw["networks"] = json!({});

    assert!(matches!(
        ConfigLoader::load_value(&raw),
        Err(ConfigError::EmptyConfiguration { .. })
    ));
}

#[test]
fn test_unknown_network_lookup() {
    let accessor: ConfigAccessor = ConfigLoader::load_value(&common::reference_value())
        .unwrap()
        .into();

    let err = accessor.network("nonexistent").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownNetwork(ref name) if name == "nonexistent"));
    assert!(err.is_lookup());
}

#[test]
fn test_invalid_json_file() {
    let file = common::temp_config("{ \"rpc\": ", ".json");
    assert!(matches!(
        ConfigLoader::load_file(file.path()),
        Err(ConfigError::Parse { format: "JSON", .. })
    ));
}

#[test]
fn test_truffle_extras_are_ignored() {
    let yaml = r#"
rpc: { host: localhost, port: 8545 }
contracts_build_directory: ./build
mocha:
  timeout: 100000
networks:
  development:
    host: localhost
    port: 8545
    network_id: 5777
compilers:
  solc:
    version: "0.8.19"
    settings:
      optimizer: { enabled: false, runs: 200 }
"#;
    let file = common::temp_config(yaml, ".yml");
    let validated = ConfigLoader::load_file_with_warnings(file.path()).unwrap();

    assert_eq!(
        validated.document.network("development").unwrap().network_id,
        NetworkId::Id(5777)
    );
    assert!(validated.warnings.contains(&ConfigWarning::UnknownKey {
        path: "mocha".to_string()
    }));
    assert!(validated.warnings.contains(&ConfigWarning::UnknownKey {
        path: "contracts_build_directory".to_string()
    }));
    assert!(validated.warnings.contains(&ConfigWarning::OptimizerRunsIgnored {
        path: "compilers.solc.settings.optimizer.runs".to_string()
    }));
}

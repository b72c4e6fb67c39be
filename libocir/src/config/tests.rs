use super::*;
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.network.timeout, 30);
    assert!(config.registry.region.is_none());
    assert!(config.registry.endpoint.is_none());
    assert!(config.auth.token.is_none());
}

#[test]
fn test_from_str_empty_yaml() {
    let config = Config::from_yaml_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_str_partial_yaml() {
    let yaml = r#"
registry:
  region: us-ashburn-1
network:
  timeout: 60
"#;
    let config = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(config.registry.region.as_deref(), Some("us-ashburn-1"));
    assert_eq!(config.network.timeout, 60);
    assert!(config.auth.token.is_none()); // Default
}

#[test]
fn test_from_str_invalid_yaml_is_config_error() {
    let result = Config::from_yaml_str("network:\n  timeout: [not, a, number]\n");
    assert!(matches!(result.unwrap_err(), OcirError::Config { .. }));
}

#[test]
fn test_endpoint_from_region() {
    let config = Config::from_yaml_str("registry:\n  region: sa-saopaulo-1\n").unwrap();
    assert_eq!(
        config.endpoint().unwrap(),
        "https://artifacts.sa-saopaulo-1.oci.oraclecloud.com/20160918"
    );
}

#[test]
fn test_endpoint_override_wins_over_region() {
    let yaml = r#"
registry:
  region: sa-saopaulo-1
  endpoint: http://localhost:8080/20160918
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    assert_eq!(config.endpoint().unwrap(), "http://localhost:8080/20160918");
}

#[test]
fn test_endpoint_missing_is_config_error() {
    let err = Config::default().endpoint().unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("registry.region"));
}

#[test]
fn test_blank_region_counts_as_missing() {
    let config = Config::from_yaml_str("registry:\n  region: \"  \"\n").unwrap();
    assert!(config.endpoint().is_err());
}

#[test]
fn test_credentials_from_token() {
    let config = Config::from_yaml_str("auth:\n  token: abc\n").unwrap();
    assert_eq!(config.credentials().unwrap(), Credentials::bearer("abc"));
}

#[test]
fn test_credentials_missing_is_config_error() {
    let err = Config::default().credentials().unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_load_without_path_uses_env_only() {
    let config = Config::load_with_env(
        None,
        env(&[
            ("OCIR_REGISTRY__REGION", "ap-tokyo-1"),
            ("OCIR_AUTH__TOKEN", "env-token"),
        ]),
    )
    .unwrap();

    assert_eq!(config.registry.region.as_deref(), Some("ap-tokyo-1"));
    assert_eq!(config.auth.token.as_deref(), Some("env-token"));
}

#[test]
fn test_load_env_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "registry:\n  region: eu-frankfurt-1\nauth:\n  token: file-token\nnetwork:\n  timeout: 10"
    )
    .unwrap();

    let config = Config::load_with_env(
        Some(file.path()),
        env(&[("OCIR_AUTH__TOKEN", "env-token")]),
    )
    .unwrap();

    assert_eq!(config.registry.region.as_deref(), Some("eu-frankfurt-1"));
    assert_eq!(config.auth.token.as_deref(), Some("env-token"));
    assert_eq!(config.network.timeout, 10);
}

#[test]
fn test_load_ignores_unrelated_env_keys() {
    let config = Config::load_with_env(
        None,
        env(&[("OCIR_COMPARTMENT_ID", "ocid1.compartment.oc1..x")]),
    )
    .unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_load_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");

    let err = Config::load_with_env(Some(&missing), env(&[])).unwrap_err();
    match err {
        OcirError::Config { path, .. } => {
            assert!(path.unwrap().ends_with("nope.yaml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_auth_debug_redacts_secrets() {
    let config = Config::from_yaml_str("auth:\n  username: jdoe\n  password: hunter2\n").unwrap();
    let debug = format!("{:?}", config);

    assert!(debug.contains("jdoe"));
    assert!(!debug.contains("hunter2"));
}

use super::*;

#[test]
fn test_credentials_basic() {
    let creds = Credentials::basic("testuser", "testpass");
    match &creds {
        Credentials::Basic { username, password } => {
            assert_eq!(username, "testuser");
            assert_eq!(password, "testpass");
        }
        _ => panic!("Expected Basic credentials"),
    }

    // base64("testuser:testpass")
    assert_eq!(creds.to_header_value(), "Basic dGVzdHVzZXI6dGVzdHBhc3M=");
}

#[test]
fn test_credentials_bearer() {
    let creds = Credentials::bearer("my_token");
    assert_eq!(creds.to_header_value(), "Bearer my_token");
}

#[test]
fn test_from_parts_prefers_token() {
    let creds = Credentials::from_parts(Some("tok"), Some("user"), Some("pass")).unwrap();
    assert_eq!(creds, Credentials::bearer("tok"));
}

#[test]
fn test_from_parts_basic_pair() {
    let creds = Credentials::from_parts(None, Some("tenancy/jdoe"), Some("secret")).unwrap();
    assert_eq!(creds, Credentials::basic("tenancy/jdoe", "secret"));
}

#[test]
fn test_from_parts_blank_token_falls_back_to_basic() {
    let creds = Credentials::from_parts(Some("   "), Some("user"), Some("pass")).unwrap();
    assert_eq!(creds, Credentials::basic("user", "pass"));
}

#[test]
fn test_from_parts_missing_everything_is_config_error() {
    let err = Credentials::from_parts(None, None, None).unwrap_err();
    assert!(matches!(err, OcirError::Config { .. }));
    assert!(err.to_string().contains("Missing credentials"));
}

#[test]
fn test_from_parts_username_without_password_is_config_error() {
    let err = Credentials::from_parts(None, Some("user"), None).unwrap_err();
    assert!(err.to_string().contains("Missing password"));

    let err = Credentials::from_parts(None, Some("user"), Some("")).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_debug_redacts_secrets() {
    let basic = format!("{:?}", Credentials::basic("user", "hunter2"));
    assert!(basic.contains("user"));
    assert!(!basic.contains("hunter2"));

    let bearer = format!("{:?}", Credentials::bearer("sekrit-token"));
    assert!(!bearer.contains("sekrit-token"));
}

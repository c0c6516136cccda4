use api_server::config::{Config, LogFormat};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_is_layered_over_defaults() {
    let file = write_config(
        r#"
[database]
endpoint = "cluster0.example.net"
doctors_database = "clinic_doctors"

[logging]
format = "json"
"#,
    );

    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.database.endpoint, "cluster0.example.net");
    assert_eq!(config.database.doctors_database, "clinic_doctors");
    assert_eq!(config.database.tasks_database, "tasks");
    assert_eq!(config.database.max_pool_size, 10);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_explicit_uri_in_file() {
    let file = write_config(
        r#"
[database]
uri = "mongodb://localhost:27017/?directConnection=true"
"#,
    );

    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    let settings = config.mongo_settings();
    assert_eq!(
        settings.connection_uri(),
        "mongodb://localhost:27017/?directConnection=true"
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let result = Config::from_file("/nonexistent/clinic-api.toml");
    assert!(result.is_err());
}

#[test]
fn test_unknown_log_format_is_rejected() {
    let file = write_config(
        r#"
[logging]
format = "xml"
"#,
    );

    assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
}

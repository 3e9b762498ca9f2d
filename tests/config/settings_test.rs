//! Settings file parsing.

use dbdoc::config::{DialectSetting, Settings, SettingsError};
use dbdoc::dialect::Dialect;
use dbdoc::document::DocType;
use std::io::Write;

const CONFIG: &str = r#"
[connections.shop]
db_type = "mysql"
host = "db.internal"
user = "docs"
password = "${DBDOC_SETTINGS_TEST_PASSWORD}"
database = "shop"

[connections.warehouse]
db_type = 3
database = "warehouse"

[connections.erp]
db_type = "sqlserver"
port = 14330
database = "erp"

[output]
doc_type = "offline"
dir = "./docs"
strict = true
"#;

#[test]
fn test_parse_connections() {
    let settings: Settings = toml::from_str(CONFIG).unwrap();
    assert_eq!(settings.connections.len(), 3);
    assert_eq!(
        settings.get_connection("warehouse").unwrap().db_type,
        DialectSetting::Code(3)
    );
    assert_eq!(settings.output.doc_type, DocType::Offline);
    assert!(settings.output.strict);
    assert_eq!(settings.output.dir.to_str(), Some("./docs"));
}

#[test]
fn test_resolve_with_env_secret() {
    std::env::set_var("DBDOC_SETTINGS_TEST_PASSWORD", "s3cret");
    let settings: Settings = toml::from_str(CONFIG).unwrap();

    let shop = settings.connection_config("shop").unwrap();
    assert_eq!(shop.dialect, Dialect::MySql);
    assert_eq!(shop.host, "db.internal");
    assert_eq!(shop.port(), 3306);
    assert_eq!(shop.user(), "docs");
    assert_eq!(shop.password(), "s3cret");
    assert_eq!(shop.target(), "db.internal:3306/shop");
    std::env::remove_var("DBDOC_SETTINGS_TEST_PASSWORD");
}

#[test]
fn test_resolve_applies_dialect_defaults() {
    let settings: Settings = toml::from_str(CONFIG).unwrap();

    let warehouse = settings.connection_config("warehouse").unwrap();
    assert_eq!(warehouse.dialect, Dialect::Postgres);
    assert_eq!(warehouse.host, "127.0.0.1");
    assert_eq!(warehouse.port(), 5432);
    assert_eq!(warehouse.user(), "postgres");

    let erp = settings.connection_config("erp").unwrap();
    assert_eq!(erp.dialect, Dialect::SqlServer);
    assert_eq!(erp.port(), 14330);
    assert_eq!(erp.user(), "sa");
}

#[test]
fn test_unknown_connection() {
    let settings: Settings = toml::from_str(CONFIG).unwrap();
    assert!(matches!(
        settings.connection_config("missing"),
        Err(SettingsError::ConnectionNotFound(name)) if name == "missing"
    ));
}

#[test]
fn test_default_connection_is_first_by_name() {
    let settings: Settings = toml::from_str(CONFIG).unwrap();
    let (name, _) = settings.default_connection().unwrap();
    assert_eq!(name, "erp");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[connections.default]\ndb_type = 1\ndatabase = \"shop\"\n"
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    let (name, conn) = settings.default_connection().unwrap();
    assert_eq!(name, "default");
    assert_eq!(conn.database, "shop");
    assert_eq!(settings.output.doc_type, DocType::Online);
}

#[test]
fn test_missing_file() {
    let result = Settings::from_file("/nonexistent/dbdoc.toml");
    assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
}

#[test]
fn test_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[connections.shop\ndb_type = ").unwrap();
    assert!(matches!(
        Settings::from_file(file.path()),
        Err(SettingsError::ParseError(_))
    ));
}

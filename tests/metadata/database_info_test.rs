//! Version, charset and collation lookups.

use dbdoc::connection::{CatalogRow, MemoryConnection};
use dbdoc::dialect::Dialect;
use dbdoc::metadata::{DatabaseInfo, InfoStage, IntrospectError, SchemaIntrospector};

#[tokio::test]
async fn test_mysql_info() {
    let conn = MemoryConnection::new(Dialect::MySql)
        .on("@@version", vec![CatalogRow::text(["8.0.36"])])
        .on(
            "character_set_server",
            vec![CatalogRow::text(["character_set_server", "utf8mb4"])],
        )
        .on(
            "collation_server",
            vec![CatalogRow::text(["collation_server", "utf8mb4_0900_ai_ci"])],
        );

    let info = SchemaIntrospector::new(Dialect::MySql, "shop")
        .database_info(&conn)
        .await
        .unwrap();

    assert_eq!(
        info,
        DatabaseInfo {
            version: "8.0.36".to_string(),
            charset: "utf8mb4".to_string(),
            collation: "utf8mb4_0900_ai_ci".to_string(),
        }
    );
    assert_eq!(conn.queries().len(), 3);
}

#[tokio::test]
async fn test_postgres_info() {
    let conn = MemoryConnection::new(Dialect::Postgres)
        .on("version()", vec![CatalogRow::text(["PostgreSQL 16.2"])])
        .on("pg_encoding_to_char", vec![CatalogRow::text(["UTF8"])])
        .on("datcollate", vec![CatalogRow::text(["en_US.UTF-8"])]);

    let info = SchemaIntrospector::new(Dialect::Postgres, "analytics")
        .database_info(&conn)
        .await
        .unwrap();

    assert_eq!(info.version, "PostgreSQL 16.2");
    assert_eq!(info.charset, "UTF8");
    assert_eq!(info.collation, "en_US.UTF-8");
}

#[tokio::test]
async fn test_sqlserver_info() {
    let conn = MemoryConnection::new(Dialect::SqlServer)
        .on("@@VERSION", vec![CatalogRow::text(["Microsoft SQL Server 2022"])])
        .on("CodePage", vec![CatalogRow::text(["1252"])])
        .on("'Collation'", vec![CatalogRow::text(["SQL_Latin1_General_CP1_CI_AS"])]);

    let info = SchemaIntrospector::new(Dialect::SqlServer, "erp")
        .database_info(&conn)
        .await
        .unwrap();

    assert_eq!(info.charset, "1252");
    assert_eq!(info.collation, "SQL_Latin1_General_CP1_CI_AS");
}

#[tokio::test]
async fn test_zero_rows_give_empty_values() {
    let conn = MemoryConnection::new(Dialect::MySql);
    let info = SchemaIntrospector::new(Dialect::MySql, "shop")
        .database_info(&conn)
        .await
        .unwrap();
    assert_eq!(info, DatabaseInfo::default());
}

#[tokio::test]
async fn test_null_value_is_empty() {
    let conn = MemoryConnection::new(Dialect::Postgres)
        .on("datcollate", vec![CatalogRow::new(vec![None])]);
    let info = SchemaIntrospector::new(Dialect::Postgres, "analytics")
        .database_info(&conn)
        .await
        .unwrap();
    assert_eq!(info.collation, "");
}

#[tokio::test]
async fn test_multiple_rows_are_rejected() {
    let conn = MemoryConnection::new(Dialect::MySql).on(
        "character_set_server",
        vec![
            CatalogRow::text(["character_set_server", "latin1"]),
            CatalogRow::text(["character_set_server", "utf8mb4"]),
        ],
    );

    let err = SchemaIntrospector::new(Dialect::MySql, "shop")
        .database_info(&conn)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IntrospectError::UnexpectedRows {
            stage: InfoStage::Charset,
            rows: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_failed_lookup_names_stage() {
    let conn = MemoryConnection::new(Dialect::Postgres).fail_on("version()", "terminated");
    let err = SchemaIntrospector::new(Dialect::Postgres, "analytics")
        .database_info(&conn)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "postgres: version lookup failed: postgres query failed: terminated"
    );
}

#[tokio::test]
async fn test_unreachable_connection() {
    let conn = MemoryConnection::new(Dialect::MySql).unreachable();
    let err = SchemaIntrospector::new(Dialect::MySql, "shop")
        .database_info(&conn)
        .await
        .unwrap_err();
    assert!(matches!(err, IntrospectError::Connection(_)));
    assert!(conn.queries().is_empty());
}

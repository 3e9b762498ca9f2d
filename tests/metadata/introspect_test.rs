//! End-to-end introspection against scripted catalogs.

use dbdoc::connection::{CatalogRow, MemoryConnection};
use dbdoc::dialect::Dialect;
use dbdoc::metadata::{introspect, IntrospectError, RowMapError, SchemaIntrospector};

fn column(name: &str, ty: &str, key: &str, nullable: &str, comment: &str) -> CatalogRow {
    CatalogRow::new(vec![
        Some(name.to_string()),
        Some(ty.to_string()),
        Some(key.to_string()),
        Some(nullable.to_string()),
        Some(comment.to_string()),
        None,
    ])
}

fn shop() -> MemoryConnection {
    MemoryConnection::new(Dialect::MySql)
        .on(
            "information_schema.tables",
            vec![
                CatalogRow::text(["users", ""]),
                CatalogRow::text(["orders", "Customer orders"]),
            ],
        )
        .on(
            "table_name = 'users'",
            vec![
                column("id", "int", "PRI", "NO", "User id"),
                column("email", "varchar(255)", "", "NO", ""),
                column("nickname", "varchar(64)", "", "YES", ""),
            ],
        )
        .on(
            "table_name = 'orders'",
            vec![
                column("id", "bigint", "PRI", "NO", ""),
                column("user_id", "int", "", "NO", "Buyer"),
            ],
        )
}

#[tokio::test]
async fn test_mysql_shop_scenario() {
    let conn = shop();
    let set = introspect(&conn, Dialect::MySql, "shop").await.unwrap();

    assert!(set.is_complete());
    let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["users", "orders"]);

    let users = set.table("users").unwrap();
    assert_eq!(users.comment, "users");
    let columns: Vec<_> = users.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, vec!["id", "email", "nickname"]);
    assert!(users.columns[0].is_primary_key());
    assert_eq!(users.columns[0].comment, "User id");
    assert_eq!(users.columns[2].nullable, "YES");
    assert_eq!(users.columns[2].default, "");

    let orders = set.table("orders").unwrap();
    assert_eq!(orders.comment, "Customer orders");
    assert_eq!(orders.columns.len(), 2);
}

#[tokio::test]
async fn test_queries_run_in_table_order() {
    let conn = shop();
    introspect(&conn, Dialect::MySql, "shop").await.unwrap();

    let queries = conn.queries();
    assert_eq!(queries.len(), 3);
    assert!(queries[0].contains("information_schema.tables"));
    assert!(queries[1].contains("table_name = 'users'"));
    assert!(queries[2].contains("table_name = 'orders'"));
}

#[tokio::test]
async fn test_postgres_columns_descending() {
    // The catalog sorts by ordinal position DESC; rows arrive in that order.
    let conn = MemoryConnection::new(Dialect::Postgres)
        .on(
            "LEFT OUTER JOIN pg_description b",
            vec![CatalogRow::new(vec![Some("events".to_string()), None])],
        )
        .on(
            "table_name = 'events'",
            vec![
                column("payload", "jsonb", "", "YES", ""),
                column("ts", "timestamp with time zone", "", "NO", ""),
                column("id", "bigint", "PRI", "NO", ""),
            ],
        );

    let set = SchemaIntrospector::new(Dialect::Postgres, "analytics")
        .introspect(&conn)
        .await
        .unwrap();

    let events = set.table("events").unwrap();
    assert_eq!(events.comment, "events");
    let order: Vec<_> = events.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec!["payload", "ts", "id"]);
    assert!(conn.queries()[1].contains("ORDER BY ordinal_position DESC"));
}

#[tokio::test]
async fn test_sqlserver_tables_and_views() {
    let conn = MemoryConnection::new(Dialect::SqlServer)
        .on(
            "FROM sysobjects so",
            vec![
                CatalogRow::text(["Invoices", "Billing documents"]),
                CatalogRow::new(vec![Some("vw_OpenInvoices".to_string()), None]),
            ],
        )
        .on(
            "d.name = 'Invoices'",
            vec![column("InvoiceId", "int(10)", "PRI", "NO", "")],
        );

    let set = SchemaIntrospector::new(Dialect::SqlServer, "erp")
        .introspect(&conn)
        .await
        .unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.tables[0].columns.len(), 1);
    assert_eq!(set.tables[1].comment, "vw_OpenInvoices");
    assert!(set.tables[1].columns.is_empty());
    assert!(set.is_complete());
}

#[tokio::test]
async fn test_column_failure_is_isolated() {
    let conn = MemoryConnection::new(Dialect::MySql)
        .fail_on("table_name = 'archive'", "Lost connection to MySQL server")
        .on(
            "information_schema.tables",
            vec![
                CatalogRow::text(["users", ""]),
                CatalogRow::text(["archive", "Old orders"]),
                CatalogRow::text(["orders", ""]),
            ],
        )
        .on("table_name = 'users'", vec![column("id", "int", "PRI", "NO", "")])
        .on("table_name = 'orders'", vec![column("id", "bigint", "PRI", "NO", "")]);

    let set = introspect(&conn, Dialect::MySql, "shop").await.unwrap();

    assert_eq!(set.len(), 3);
    assert!(set.table("archive").unwrap().columns.is_empty());
    assert_eq!(set.table("users").unwrap().columns.len(), 1);
    assert_eq!(set.table("orders").unwrap().columns.len(), 1);

    assert!(!set.is_complete());
    assert_eq!(set.failures.len(), 1);
    assert_eq!(set.failures[0].table, "archive");
    assert!(set.failures[0].message.contains("archive"));
    assert!(set.failures[0].message.contains("Lost connection"));
    assert_eq!(conn.queries().len(), 4);
}

#[tokio::test]
async fn test_strict_mode_stops_at_column_failure() {
    let conn = MemoryConnection::new(Dialect::MySql)
        .fail_on("table_name = 'archive'", "Lost connection to MySQL server")
        .on(
            "information_schema.tables",
            vec![
                CatalogRow::text(["archive", ""]),
                CatalogRow::text(["users", ""]),
            ],
        );

    let err = SchemaIntrospector::new(Dialect::MySql, "shop")
        .strict(true)
        .introspect(&conn)
        .await
        .unwrap_err();

    match err {
        IntrospectError::ColumnQuery { dialect, table, .. } => {
            assert_eq!(dialect, Dialect::MySql);
            assert_eq!(table, "archive");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(conn.queries().len(), 2);
}

#[tokio::test]
async fn test_table_listing_failure_is_fatal() {
    let conn = MemoryConnection::new(Dialect::Postgres).fail_on("pg_class", "permission denied");

    let err = introspect(&conn, Dialect::Postgres, "analytics")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IntrospectError::TableQuery {
            dialect: Dialect::Postgres,
            ..
        }
    ));
    assert!(err.to_string().contains("permission denied"));
    assert_eq!(conn.queries().len(), 1);
}

#[tokio::test]
async fn test_zero_tables_is_empty_set() {
    let conn = MemoryConnection::new(Dialect::MySql);
    let set = introspect(&conn, Dialect::MySql, "empty").await.unwrap();
    assert!(set.is_empty());
    assert!(set.is_complete());
    assert_eq!(conn.queries().len(), 1);
}

#[tokio::test]
async fn test_zero_columns_does_not_stop_other_tables() {
    let conn = MemoryConnection::new(Dialect::MySql)
        .on(
            "information_schema.tables",
            vec![
                CatalogRow::text(["placeholder", ""]),
                CatalogRow::text(["users", ""]),
            ],
        )
        .on("table_name = 'users'", vec![column("id", "int", "PRI", "NO", "")]);

    let set = introspect(&conn, Dialect::MySql, "shop").await.unwrap();
    assert!(set.table("placeholder").unwrap().columns.is_empty());
    assert_eq!(set.table("users").unwrap().columns.len(), 1);
    assert!(set.is_complete());
}

#[tokio::test]
async fn test_short_column_row_is_reported() {
    let conn = MemoryConnection::new(Dialect::MySql)
        .on("information_schema.tables", vec![CatalogRow::text(["users", ""])])
        .on("table_name = 'users'", vec![CatalogRow::text(["id", "int"])]);

    let set = introspect(&conn, Dialect::MySql, "shop").await.unwrap();
    assert!(set.tables[0].columns.is_empty());
    assert!(set.failures[0].message.contains("expected at least 6 values"));

    let err = SchemaIntrospector::new(Dialect::MySql, "shop")
        .strict(true)
        .introspect(&conn)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IntrospectError::ColumnQuery {
            source: RowMapError::Decode { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_dialect_mismatch_sends_nothing() {
    let conn = shop();
    let err = SchemaIntrospector::new(Dialect::Postgres, "shop")
        .introspect(&conn)
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(conn.queries().is_empty());
}

#[tokio::test]
async fn test_unsupported_selector_rejected_before_querying() {
    let conn = shop();
    let result = SchemaIntrospector::try_new(9_i64, "shop");
    assert!(matches!(result, Err(IntrospectError::Configuration(_))));
    assert!(conn.queries().is_empty());
}

#[tokio::test]
async fn test_introspector_is_reusable() {
    let introspector = SchemaIntrospector::new(Dialect::MySql, "shop");
    let first = introspector.introspect(&shop()).await.unwrap();
    let second = introspector.introspect(&shop()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_boxed_connection() {
    let conn: Box<dyn dbdoc::connection::CatalogConnection> = Box::new(shop());
    let set = introspect(&conn, Dialect::MySql, "shop").await.unwrap();
    assert_eq!(set.len(), 2);
}

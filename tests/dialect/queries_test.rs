//! Catalog query text per dialect.

use dbdoc::dialect::{CatalogDialect, ColumnOrder, Dialect};

#[test]
fn test_queries_are_pure() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect.table_query("shop"), dialect.table_query("shop"));
        assert_eq!(
            dialect.column_query("shop", "users"),
            dialect.column_query("shop", "users")
        );
    }
}

#[test]
fn test_column_query_depends_on_table() {
    for dialect in Dialect::ALL {
        assert_ne!(
            dialect.column_query("shop", "users"),
            dialect.column_query("shop", "orders"),
            "{} column query ignores the table name",
            dialect
        );
    }
}

#[test]
fn test_mysql_queries() {
    let tables = Dialect::MySql.table_query("shop");
    assert!(tables.contains("information_schema.tables"));
    assert!(tables.contains("table_schema = 'shop'"));

    let columns = Dialect::MySql.column_query("shop", "users");
    assert!(columns.contains("information_schema.columns"));
    assert!(columns.contains("table_schema = 'shop' AND table_name = 'users'"));
    assert!(columns.trim_end().ends_with("ORDER BY ordinal_position"));
}

#[test]
fn test_sqlserver_queries() {
    let tables = Dialect::SqlServer.table_query("erp");
    assert!(tables.contains("sysobjects"));
    assert!(tables.contains("sys.extended_properties"));
    assert!(tables.contains("xtype = 'U'"));
    assert!(tables.contains("xtype = 'V'"));

    let columns = Dialect::SqlServer.column_query("erp", "Invoices");
    assert!(columns.contains("syscolumns"));
    assert!(columns.contains("systypes"));
    assert!(columns.contains("'Invoices'"));
    assert!(columns.contains("ORDER BY a.id, a.colorder"));
}

#[test]
fn test_postgres_queries() {
    let tables = Dialect::Postgres.table_query("events");
    assert!(tables.contains("pg_class"));
    assert!(tables.contains("pg_description"));
    assert!(tables.contains("'public'"));
    assert!(tables.contains("relkind = 'r'"));

    let columns = Dialect::Postgres.column_query("events", "events");
    assert!(columns.contains("information_schema.columns"));
    assert!(columns.contains("pg_constraint"));
    assert!(columns.contains("ORDER BY ordinal_position DESC"));
    assert!(!columns.contains("file_sources"));
}

#[test]
fn test_postgres_column_query_uses_table_everywhere() {
    let columns = Dialect::Postgres.column_query("events", "page_views");
    assert_eq!(columns.matches("'page_views'").count(), 3);
}

#[test]
fn test_column_order_per_dialect() {
    assert_eq!(Dialect::MySql.column_order(), ColumnOrder::Ascending);
    assert_eq!(Dialect::SqlServer.column_order(), ColumnOrder::Ascending);
    assert_eq!(Dialect::Postgres.column_order(), ColumnOrder::Descending);
}

#[test]
fn test_names_are_quoted() {
    let sql = Dialect::MySql.column_query("shop", "o'neil");
    assert!(sql.contains("'o''neil'"));

    let sql = Dialect::MySql.table_query("it's");
    assert!(sql.contains("'it''s'"));

    let sql = Dialect::Postgres.column_query("events", "it's");
    assert_eq!(sql.matches("'it''s'").count(), 3);

    let sql = Dialect::SqlServer.column_query("erp", "usuários");
    assert!(sql.contains("N'usuários'"));
}

#[test]
fn test_mysql_escapes_backslashes() {
    let sql = Dialect::MySql.column_query("shop", r"x\ty");
    assert!(sql.contains(r"AND table_name = 'x\\ty'"));

    // A trailing backslash must not swallow the closing quote.
    let sql = Dialect::MySql.table_query(r"dump\");
    assert!(sql.contains(r"WHERE table_schema = 'dump\\'"));

    // Other dialects read backslashes literally.
    let sql = Dialect::Postgres.column_query("events", r"x\ty");
    assert!(sql.contains(r"'x\ty'"));
    assert!(!sql.contains(r"x\\ty"));
}

#[test]
fn test_unsupported_selectors() {
    assert!(Dialect::from_code(0).is_err());
    assert!(Dialect::from_code(4).is_err());
    assert!("oracle".parse::<Dialect>().is_err());
    assert!(Dialect::try_from(2_i64).is_ok());
}

//! PostgreSQL catalog dialect.
//!
//! Tables come from `pg_class` in the `public` schema (ordinary tables
//! only) with comments from `pg_description`. Columns come from
//! `information_schema.columns`, joined with a primary key lookup through
//! `pg_constraint` and a comment lookup through `pg_description`.
//!
//! Columns are listed highest ordinal position first.

use super::helpers;
use super::{CatalogDialect, ColumnOrder, InfoQueries, InfoQuery};

/// PostgreSQL catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl CatalogDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn table_query(&self, _database: &str) -> String {
        helpers::dedent(
            r#"
            SELECT a.relname     AS TableName,
                   b.description AS TableComment
            FROM pg_class a
            LEFT OUTER JOIN pg_description b ON b.objsubid = 0 AND a.oid = b.objoid
            WHERE a.relnamespace = (SELECT oid FROM pg_namespace WHERE nspname = 'public')
            AND a.relkind = 'r'
            ORDER BY a.relname
            "#,
        )
    }

    fn column_query(&self, _database: &str, table: &str) -> String {
        let table = self.quote_string(table);
        helpers::dedent(&format!(
            r#"
            SELECT
                column_name AS ColName,
                data_type AS ColType,
                CASE
                    WHEN b.pk_name IS NULL THEN ''
                    ELSE 'PRI'
                END AS ColKey,
                is_nullable AS IsNullable,
                c.DeText AS ColComment,
                column_default AS ColDefault
            FROM information_schema.columns
            LEFT JOIN (
                SELECT
                    pg_attr.attname AS colname,
                    pg_constraint.conname AS pk_name
                FROM pg_constraint
                INNER JOIN pg_class ON pg_constraint.conrelid = pg_class.oid
                INNER JOIN pg_attribute pg_attr ON
                    pg_attr.attrelid = pg_class.oid
                    AND pg_attr.attnum = ANY(pg_constraint.conkey)
                WHERE pg_class.relname = {table}
                AND pg_class.relnamespace = (SELECT oid FROM pg_namespace WHERE nspname = 'public')
                AND pg_constraint.contype = 'p'
            ) b ON b.colname = information_schema.columns.column_name
            LEFT JOIN (
                SELECT
                    attname,
                    description AS DeText
                FROM pg_class
                LEFT JOIN pg_attribute pg_attr ON pg_attr.attrelid = pg_class.oid
                LEFT JOIN pg_description pg_desc ON
                    pg_desc.objoid = pg_attr.attrelid
                    AND pg_desc.objsubid = pg_attr.attnum
                WHERE pg_attr.attnum > 0
                AND pg_class.relname = {table}
                AND pg_class.relnamespace = (SELECT oid FROM pg_namespace WHERE nspname = 'public')
            ) c ON c.attname = information_schema.columns.column_name
            WHERE table_schema = 'public'
            AND table_name = {table}
            ORDER BY ordinal_position DESC
            "#
        ))
    }

    fn column_order(&self) -> ColumnOrder {
        ColumnOrder::Descending
    }

    fn info_queries(&self) -> InfoQueries {
        InfoQueries {
            version: InfoQuery {
                sql: "SELECT version()",
                value_column: 0,
            },
            charset: InfoQuery {
                sql: "SELECT pg_encoding_to_char(encoding) FROM pg_database WHERE datname = current_database()",
                value_column: 0,
            },
            collation: InfoQuery {
                sql: "SELECT datcollate FROM pg_database WHERE datname = current_database()",
                value_column: 0,
            },
        }
    }

    fn default_port(&self) -> u16 {
        5432
    }

    fn default_user(&self) -> &'static str {
        "postgres"
    }
}

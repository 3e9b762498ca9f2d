//! MySQL / MariaDB catalog dialect.
//!
//! Both tables and columns come from `information_schema`, filtered by the
//! schema (database) name. MySQL keeps comments and the `PRI` key marker
//! directly on those views, so no joins are needed.

use super::helpers;
use super::{CatalogDialect, InfoQueries, InfoQuery};

/// MySQL catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl CatalogDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn table_query(&self, database: &str) -> String {
        helpers::dedent(&format!(
            r#"
            SELECT table_name    AS TableName,
                   table_comment AS TableComment
            FROM information_schema.tables
            WHERE table_schema = {}
            "#,
            self.quote_string(database)
        ))
    }

    fn column_query(&self, database: &str, table: &str) -> String {
        helpers::dedent(&format!(
            r#"
            SELECT column_name    AS ColName,
                   column_type    AS ColType,
                   column_key     AS ColKey,
                   is_nullable    AS IsNullable,
                   column_comment AS ColComment,
                   column_default AS ColDefault
            FROM information_schema.columns
            WHERE table_schema = {} AND table_name = {}
            ORDER BY ordinal_position
            "#,
            self.quote_string(database),
            self.quote_string(table)
        ))
    }

    fn info_queries(&self) -> InfoQueries {
        // SHOW VARIABLES yields (Variable_name, Value)
        InfoQueries {
            version: InfoQuery {
                sql: "SELECT @@version",
                value_column: 0,
            },
            charset: InfoQuery {
                sql: "SHOW VARIABLES LIKE 'character_set_server'",
                value_column: 1,
            },
            collation: InfoQuery {
                sql: "SHOW VARIABLES LIKE 'collation_server'",
                value_column: 1,
            },
        }
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn default_port(&self) -> u16 {
        3306
    }

    fn default_user(&self) -> &'static str {
        "root"
    }
}

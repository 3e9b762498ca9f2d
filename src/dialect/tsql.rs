//! SQL Server catalog dialect.
//!
//! SQL Server has no comment column on its catalog views. Comments live in
//! `sys.extended_properties` (minor id 0 for the table itself, the column id
//! otherwise), defaults in `syscomments`, and primary keys have to be found
//! through index membership. The connection already selects the database, so
//! the database name does not appear in the queries.
//!
//! Extended property values are `sql_variant`; they are cast to `nvarchar`
//! so every result column decodes as text.

use super::helpers;
use super::{CatalogDialect, InfoQueries, InfoQuery};

/// SQL Server catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlServer;

impl CatalogDialect for SqlServer {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn table_query(&self, _database: &str) -> String {
        helpers::dedent(
            r#"
            SELECT * FROM (
                SELECT CAST(so.name AS nvarchar(500))   AS TableName,
                       CAST(sep.value AS nvarchar(500)) AS TableComment
                FROM sysobjects so
                LEFT JOIN sys.extended_properties sep ON sep.major_id = so.id AND sep.minor_id = 0
                WHERE (so.xtype = 'U' OR so.xtype = 'V')
            ) t
            "#,
        )
    }

    fn column_query(&self, _database: &str, table: &str) -> String {
        helpers::dedent(&format!(
            r#"
            SELECT
                ColName    = a.name,
                ColType    = b.name + '(' + CAST(COLUMNPROPERTY(a.id, a.name, 'PRECISION') AS varchar) + ')',
                ColKey     = CASE WHEN EXISTS(SELECT 1
                                              FROM sysobjects
                                              WHERE xtype = 'PK'
                                              AND name IN (
                                                  SELECT name
                                                  FROM sysindexes
                                                  WHERE indid IN (
                                                      SELECT indid
                                                      FROM sysindexkeys
                                                      WHERE id = a.id AND colid = a.colid
                                              ))) THEN 'PRI'
                                  ELSE '' END,
                IsNullable = CASE WHEN a.isnullable = 1 THEN 'YES' ELSE 'NO' END,
                ColComment = ISNULL(CAST(g.[value] AS nvarchar(4000)), ''),
                ColDefault = ISNULL(e.text, '')
            FROM syscolumns a
            LEFT JOIN systypes b ON a.xusertype = b.xusertype
            INNER JOIN sysobjects d ON a.id = d.id AND d.xtype = 'U' AND d.name <> 'dtproperties'
            LEFT JOIN syscomments e ON a.cdefault = e.id
            LEFT JOIN sys.extended_properties g ON a.id = g.major_id AND a.colid = g.minor_id
            LEFT JOIN sys.extended_properties f ON d.id = f.major_id AND f.minor_id = 0
            WHERE d.name = {}
            ORDER BY a.id, a.colorder
            "#,
            self.quote_string(table)
        ))
    }

    fn quote_string(&self, s: &str) -> String {
        // N prefix keeps non-ASCII names intact
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }

    fn info_queries(&self) -> InfoQueries {
        InfoQueries {
            version: InfoQuery {
                sql: "SELECT CAST(@@VERSION AS nvarchar(4000))",
                value_column: 0,
            },
            charset: InfoQuery {
                sql: "SELECT CAST(COLLATIONPROPERTY(CAST(DATABASEPROPERTYEX(DB_NAME(), 'Collation') AS nvarchar(128)), 'CodePage') AS nvarchar(16))",
                value_column: 0,
            },
            collation: InfoQuery {
                sql: "SELECT CAST(DATABASEPROPERTYEX(DB_NAME(), 'Collation') AS nvarchar(128))",
                value_column: 0,
            },
        }
    }

    fn default_port(&self) -> u16 {
        1433
    }

    fn default_user(&self) -> &'static str {
        "sa"
    }
}

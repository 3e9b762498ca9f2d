//! MySQL / MariaDB connection.
//!
//! Uses SQLx with a single-connection pool. Catalog queries go through
//! `raw_sql`, i.e. the text protocol, so every value decodes as a string
//! regardless of its column type.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Row, ValueRef};
use tracing::debug;

use super::{CatalogConnection, CatalogRow, ConnectionError, ConnectionResult};
use crate::config::ConnectionConfig;
use crate::dialect::Dialect;

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL / MariaDB catalog connection.
pub struct MySqlConnection {
    pool: MySqlPool,
}

impl MySqlConnection {
    /// Connect using `config`.
    pub async fn connect(config: &ConnectionConfig) -> ConnectionResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port())
            .username(config.user())
            .password(config.password())
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| ConnectionError::connect(config, e.to_string()))?;

        debug!(target = %config.target(), "opened MySQL pool");
        Ok(Self { pool })
    }
}

fn decode_row(row: &MySqlRow) -> ConnectionResult<CatalogRow> {
    (0..row.len())
        .map(|idx| {
            let raw = row
                .try_get_raw(idx)
                .map_err(|e| ConnectionError::query(Dialect::MySql, e.to_string()))?;
            if raw.is_null() {
                return Ok(None);
            }
            row.try_get_unchecked::<String, _>(idx)
                .map(Some)
                .map_err(|e| ConnectionError::query(Dialect::MySql, e.to_string()))
        })
        .collect::<ConnectionResult<Vec<_>>>()
        .map(CatalogRow::new)
}

#[async_trait]
impl CatalogConnection for MySqlConnection {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn ping(&self) -> ConnectionResult<()> {
        sqlx::raw_sql("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| ConnectionError::ping(Dialect::MySql, e.to_string()))
    }

    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>> {
        let rows: Vec<MySqlRow> = sqlx::raw_sql(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ConnectionError::query(Dialect::MySql, e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }
}

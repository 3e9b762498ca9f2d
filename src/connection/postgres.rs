//! PostgreSQL connection.
//!
//! Uses tokio-postgres' simple query protocol, which returns every value as
//! text. The connection future runs on its own task for the lifetime of the
//! client.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage};
use tracing::{debug, warn};

use super::{CatalogConnection, CatalogRow, ConnectionError, ConnectionResult};
use crate::config::ConnectionConfig;
use crate::dialect::Dialect;

/// PostgreSQL catalog connection.
pub struct PostgresConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl PostgresConnection {
    /// Connect using `config`.
    pub async fn connect(config: &ConnectionConfig) -> ConnectionResult<Self> {
        let mut pg = Config::new();
        pg.host(&config.host)
            .port(config.port())
            .user(config.user())
            .password(config.password())
            .dbname(&config.database);

        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| ConnectionError::connect(config, e.to_string()))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "postgres connection closed with error");
            }
        });

        debug!(target = %config.target(), "opened PostgreSQL session");
        Ok(Self { client, driver })
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait]
impl CatalogConnection for PostgresConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn ping(&self) -> ConnectionResult<()> {
        self.client
            .simple_query("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| ConnectionError::ping(Dialect::Postgres, e.to_string()))
    }

    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>> {
        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(|e| ConnectionError::query(Dialect::Postgres, e.to_string()))?;

        Ok(messages
            .into_iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::Row(row) => Some(
                    (0..row.len())
                        .map(|idx| row.get(idx).map(str::to_string))
                        .collect(),
                ),
                _ => None,
            })
            .collect())
    }
}

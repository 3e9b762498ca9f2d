//! SQL Server connection.
//!
//! Uses Tiberius over a Tokio TCP stream. The client needs exclusive access
//! for each request, so it sits behind an async mutex; introspection issues
//! one query at a time anyway.

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, ColumnData, Config, EncryptionLevel, Row};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use super::{CatalogConnection, CatalogRow, ConnectionError, ConnectionResult};
use crate::config::ConnectionConfig;
use crate::dialect::Dialect;

/// SQL Server catalog connection.
pub struct MssqlConnection {
    client: Mutex<Client<Compat<TcpStream>>>,
}

impl MssqlConnection {
    /// Connect using `config`.
    pub async fn connect(config: &ConnectionConfig) -> ConnectionResult<Self> {
        let mut tds = Config::new();
        tds.host(&config.host);
        tds.port(config.port());
        tds.database(&config.database);
        tds.authentication(AuthMethod::sql_server(config.user(), config.password()));
        tds.encryption(EncryptionLevel::NotSupported);
        tds.trust_cert();

        let tcp = TcpStream::connect(tds.get_addr())
            .await
            .map_err(|e| ConnectionError::connect(config, e.to_string()))?;
        tcp.set_nodelay(true).ok();

        let client = Client::connect(tds, tcp.compat_write())
            .await
            .map_err(|e| ConnectionError::connect(config, e.to_string()))?;

        debug!(target = %config.target(), "opened SQL Server session");
        Ok(Self {
            client: Mutex::new(client),
        })
    }
}

fn query_error(e: tiberius::error::Error) -> ConnectionError {
    ConnectionError::query(Dialect::SqlServer, e.to_string())
}

/// Render one cell as text.
fn cell_text(cell: ColumnData<'static>) -> ConnectionResult<Option<String>> {
    let text = match cell {
        ColumnData::String(v) => v.map(|s| s.into_owned()),
        ColumnData::U8(v) => v.map(|n| n.to_string()),
        ColumnData::I16(v) => v.map(|n| n.to_string()),
        ColumnData::I32(v) => v.map(|n| n.to_string()),
        ColumnData::I64(v) => v.map(|n| n.to_string()),
        ColumnData::F32(v) => v.map(|n| n.to_string()),
        ColumnData::F64(v) => v.map(|n| n.to_string()),
        ColumnData::Bit(v) => v.map(|b| if b { "1" } else { "0" }.to_string()),
        other => {
            return Err(ConnectionError::query(
                Dialect::SqlServer,
                format!("unsupported catalog value type: {:?}", other),
            ))
        }
    };
    Ok(text)
}

fn decode_row(row: Row) -> ConnectionResult<CatalogRow> {
    row.into_iter()
        .map(cell_text)
        .collect::<ConnectionResult<Vec<_>>>()
        .map(CatalogRow::new)
}

#[async_trait]
impl CatalogConnection for MssqlConnection {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    async fn ping(&self) -> ConnectionResult<()> {
        let mut client = self.client.lock().await;
        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| ConnectionError::ping(Dialect::SqlServer, e.to_string()))?
            .into_row()
            .await
            .map_err(|e| ConnectionError::ping(Dialect::SqlServer, e.to_string()))?;
        Ok(())
    }

    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>> {
        let mut client = self.client.lock().await;
        // Drain the stream before decoding so the session never keeps
        // pending result packets.
        let rows = client
            .simple_query(sql)
            .await
            .map_err(query_error)?
            .into_first_result()
            .await
            .map_err(query_error)?;

        rows.into_iter().map(decode_row).collect()
    }
}

//! Scripted in-memory connection.
//!
//! `MemoryConnection` answers catalog queries from a list of rules instead
//! of a server. Each rule pairs a fragment of query text with an outcome;
//! the first rule whose fragment occurs in the query decides the answer, and
//! a query matching no rule returns no rows. Every query is recorded, so
//! callers can check exactly what was sent.
//!
//! ```
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use dbdoc::connection::{CatalogConnection, CatalogRow, MemoryConnection};
//! use dbdoc::dialect::Dialect;
//!
//! let conn = MemoryConnection::new(Dialect::MySql)
//!     .on("information_schema.tables", vec![CatalogRow::text(["users", ""])]);
//!
//! let rows = conn.query("SELECT ... FROM information_schema.tables").await.unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(conn.queries().len(), 1);
//! # });
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::trace;

use super::{CatalogConnection, CatalogRow, ConnectionError, ConnectionResult};
use crate::dialect::Dialect;

#[derive(Debug, Clone)]
enum Outcome {
    Rows(Vec<CatalogRow>),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Rule {
    fragment: String,
    outcome: Outcome,
}

/// Connection that replays scripted catalog rows.
#[derive(Debug)]
pub struct MemoryConnection {
    dialect: Dialect,
    alive: bool,
    rules: Vec<Rule>,
    log: Mutex<Vec<String>>,
}

impl MemoryConnection {
    /// Create an empty, live connection for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            alive: true,
            rules: Vec::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Answer queries containing `fragment` with `rows`.
    pub fn on(mut self, fragment: impl Into<String>, rows: Vec<CatalogRow>) -> Self {
        self.rules.push(Rule {
            fragment: fragment.into(),
            outcome: Outcome::Rows(rows),
        });
        self
    }

    /// Fail queries containing `fragment` with `message`.
    pub fn fail_on(mut self, fragment: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            fragment: fragment.into(),
            outcome: Outcome::Fail(message.into()),
        });
        self
    }

    /// Make the liveness check fail.
    pub fn unreachable(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Every query received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, sql: &str) {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sql.to_string());
    }
}

#[async_trait]
impl CatalogConnection for MemoryConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn ping(&self) -> ConnectionResult<()> {
        if self.alive {
            Ok(())
        } else {
            Err(ConnectionError::ping(self.dialect, "server unreachable"))
        }
    }

    async fn query(&self, sql: &str) -> ConnectionResult<Vec<CatalogRow>> {
        self.record(sql);

        match self.rules.iter().find(|r| sql.contains(&r.fragment)) {
            Some(Rule {
                outcome: Outcome::Rows(rows),
                fragment,
            }) => {
                trace!(%fragment, rows = rows.len(), "scripted rows");
                Ok(rows.clone())
            }
            Some(Rule {
                outcome: Outcome::Fail(message),
                ..
            }) => Err(ConnectionError::query(self.dialect, message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

//! PostgreSQL probe implementation.
//!
//! # Responsibilities
//! - Resolve logical connection names to configured URLs
//! - Open one connection per attempt, bounded by a timeout
//! - Classify driver errors into Retryable/Fatal

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tokio::time::timeout;

use crate::config::schema::ConnectionConfig;
use crate::probe::{ConnectionProbe, ProbeError, RetryCause};

// SQLSTATE codes PostgreSQL raises while a freshly started server cannot
// serve the target database yet.
// 57P03 = cannot_connect_now (server starting up or shutting down)
// 3D000 = invalid_catalog_name (database not created yet)
const NOT_READY_SQLSTATES: [&str; 2] = ["57P03", "3D000"];

/// Probes configured PostgreSQL connections by name.
pub struct PostgresProbe {
    connections: HashMap<String, ConnectionConfig>,
}

impl PostgresProbe {
    pub fn new(connections: impl IntoIterator<Item = ConnectionConfig>) -> Self {
        Self {
            connections: connections
                .into_iter()
                .map(|connection| (connection.name.clone(), connection))
                .collect(),
        }
    }
}

#[async_trait]
impl ConnectionProbe for PostgresProbe {
    async fn attempt(&self, connection: &str) -> Result<(), ProbeError> {
        let target = self.connections.get(connection).ok_or_else(|| {
            ProbeError::Fatal(format!("unknown connection '{connection}'").into())
        })?;

        let connect_timeout = Duration::from_secs(target.connect_timeout_secs);

        let mut conn = match timeout(connect_timeout, PgConnection::connect(&target.url)).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => return Err(classify(e)),
            Err(elapsed) => {
                return Err(ProbeError::Retryable {
                    cause: RetryCause::ServerUnreachable,
                    source: Box::new(elapsed),
                })
            }
        };

        // An accepted connection alone is not proof the database serves queries.
        let result = sqlx::query("SELECT 1").execute(&mut conn).await;
        let _ = conn.close().await;

        result.map(|_| ()).map_err(classify)
    }
}

/// Map a driver error onto the probe's outcome taxonomy.
fn classify(error: sqlx::Error) -> ProbeError {
    match &error {
        // TCP-level failure: nothing is listening yet.
        sqlx::Error::Io(_) => ProbeError::Retryable {
            cause: RetryCause::ServerUnreachable,
            source: Box::new(error),
        },
        // The server answered but refused to serve the target database.
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| NOT_READY_SQLSTATES.contains(&code.as_ref())) =>
        {
            ProbeError::Retryable {
                cause: RetryCause::DatabaseNotReady,
                source: Box::new(error),
            }
        }
        _ => ProbeError::Fatal(Box::new(error)),
    }
}

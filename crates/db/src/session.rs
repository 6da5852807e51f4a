use std::time::Duration;

use sqlx::{Connection, PgConnection};

use crate::error::DbError;
use crate::params::ConnectionParams;
use crate::version::ServerVersion;

pub const VERSION_QUERY: &str = "SELECT version()";

/// One live connection to the server. Dropping a session closes the socket
/// without the termination handshake; call [`Session::close`] instead.
pub struct Session {
    conn: PgConnection,
    descriptor: String,
}

impl Session {
    /// Open a connection, bounded by `params.connect_timeout` when set and
    /// non-zero.
    pub async fn open(params: &ConnectionParams) -> Result<Self, DbError> {
        let descriptor = params.descriptor();
        let options = params.connect_options();

        tracing::info!(target: "pgprobe-db", %descriptor, "opening connection");

        let connecting = PgConnection::connect_with(&options);
        let connected = match params.effective_connect_timeout() {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| timed_out(limit))?,
            None => connecting.await,
        };

        let conn = connected.map_err(|source| {
            tracing::warn!(target: "pgprobe-db", error = %source, "connection failed");
            DbError::Connect { source }
        })?;

        tracing::info!(target: "pgprobe-db", %descriptor, "connection established");

        Ok(Self { conn, descriptor })
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Run `SELECT version()` and fetch its single row.
    pub async fn server_version(&mut self) -> Result<ServerVersion, DbError> {
        tracing::debug!(target: "pgprobe-db", query = VERSION_QUERY, "executing");

        let row: (String,) = sqlx::query_as(VERSION_QUERY)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|source| DbError::Query {
                query: VERSION_QUERY,
                source,
            })?;

        Ok(ServerVersion::from_row(row))
    }

    /// Terminate the session gracefully. Consumes the session, so it can only
    /// happen once.
    pub async fn close(self) -> Result<(), DbError> {
        let descriptor = self.descriptor;
        self.conn.close().await.map_err(DbError::Close)?;
        tracing::info!(target: "pgprobe-db", %descriptor, "connection closed");
        Ok(())
    }
}

fn timed_out(limit: Duration) -> DbError {
    tracing::warn!(target: "pgprobe-db", timeout = ?limit, "connection attempt timed out");
    DbError::Timeout { after: limit }
}

use std::io::Write;

use pgprobe_db::{ConnectionParams, DbError, ServerVersion, Session};
use pgprobe_kernel::DatabaseSettings;
use thiserror::Error;

pub const CONNECTING_NOTICE: &str = "Connecting to the PostgreSQL database...";
pub const VERSION_HEADER: &str = "PostgreSQL database version:";
pub const CLOSED_NOTICE: &str = "Database connection closed.";

/// What a successful run printed.
#[derive(Debug, Clone)]
pub struct VersionReport {
    pub version: ServerVersion,
    pub descriptor: String,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("failed to write probe output: {0}")]
    Output(#[from] std::io::Error),
}

impl RunError {
    pub fn as_db_error(&self) -> Option<&DbError> {
        match self {
            RunError::Database(err) => Some(err),
            RunError::Output(_) => None,
        }
    }
}

/// Performs the connect, query, print, disconnect cycle.
#[derive(Debug, Clone)]
pub struct Connector {
    params: ConnectionParams,
}

impl Connector {
    pub fn new(params: ConnectionParams) -> Self {
        Self { params }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self::new(ConnectionParams {
            host: settings.host.clone(),
            port: settings.port,
            dbname: settings.name.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            connect_timeout: settings.connect_timeout(),
        })
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Run one cycle, writing the console lines to `out`.
    ///
    /// Any failure is written to `out` as well as returned. Once a session
    /// has been opened it is closed on every path and the closed notice is
    /// written after any error text.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<VersionReport, RunError> {
        writeln!(out, "{}", CONNECTING_NOTICE)?;

        let mut session = match Session::open(&self.params).await {
            Ok(session) => session,
            Err(err) => {
                // The connect failure is returned even if this write fails.
                let _ = writeln!(out, "{}", err);
                return Err(err.into());
            }
        };

        let outcome = report_version(&mut session, out).await;
        if let Err(err) = &outcome {
            // The first failure is returned even if this write fails too.
            let _ = writeln!(out, "{}", err);
        }

        let closed = session.close().await;
        if let Err(err) = &closed {
            tracing::warn!(error = %err, "graceful close failed; socket dropped");
        }
        let notice = writeln!(out, "{}", CLOSED_NOTICE);

        let report = outcome?;
        closed?;
        notice?;

        Ok(report)
    }
}

async fn report_version<W: Write>(
    session: &mut Session,
    out: &mut W,
) -> Result<VersionReport, RunError> {
    writeln!(out, "{}", VERSION_HEADER)?;

    let version = session.server_version().await?;

    writeln!(out, "{:?}", version)?;
    writeln!(out, "{}", session.descriptor())?;

    tracing::info!(
        product = version.product().unwrap_or_default(),
        version = version.version().unwrap_or_default(),
        "server version fetched"
    );

    Ok(VersionReport {
        version,
        descriptor: session.descriptor().to_string(),
    })
}

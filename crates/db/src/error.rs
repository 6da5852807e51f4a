use std::time::Duration;

use thiserror::Error;

/// SQLSTATE codes the server uses for rejected credentials.
const AUTHENTICATION_SQLSTATES: &[&str] = &["28000", "28P01"];

/// Failure of a database operation. The variant records which stage failed;
/// the message is the driver's.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("{source}")]
    Connect { source: sqlx::Error },

    #[error("connection timed out after {}s", after.as_secs_f64())]
    Timeout { after: Duration },

    #[error("{source}")]
    Query {
        query: &'static str,
        source: sqlx::Error,
    },

    #[error("failed to close connection: {0}")]
    Close(#[source] sqlx::Error),
}

impl DbError {
    /// Whether the server rejected the supplied credentials.
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DbError::Connect {
                source: sqlx::Error::Database(db),
            } => db
                .code()
                .map(|code| AUTHENTICATION_SQLSTATES.iter().any(|state| *state == code))
                .unwrap_or(false),
            _ => false,
        }
    }
}

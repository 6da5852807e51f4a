//! PostgreSQL session handling: connection parameters, a single owned
//! session, and the server version query.

pub mod error;
pub mod params;
pub mod session;
pub mod version;

pub use error::DbError;
pub use params::ConnectionParams;
pub use session::{Session, VERSION_QUERY};
pub use version::ServerVersion;

//! pgprobe application library
//!
//! Hosts the connector that performs one connect, query, print, disconnect
//! cycle against PostgreSQL.

pub mod connector;

pub use connector::{Connector, RunError, VersionReport};

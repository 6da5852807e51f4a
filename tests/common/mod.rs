//! Helpers for tests that need a running PostgreSQL server.
//!
//! ```bash
//! docker run -d --name pgprobe-test -p 5432:5432 \
//!   -e POSTGRES_PASSWORD=postgres -e POSTGRES_DB=testdb postgres:16
//!
//! cargo test --test live_database -- --ignored
//! ```
//!
//! | Environment Variable  | Default     |
//! |-----------------------|-------------|
//! | `PGPROBE_TEST_HOST`   | "localhost" |
//! | `PGPROBE_TEST_PORT`   | 5432        |
//! | `PGPROBE_TEST_DB`     | "testdb"    |
//! | `PGPROBE_TEST_USER`   | "postgres"  |
//! | `PGPROBE_TEST_PASSWD` | "postgres"  |

use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use pgprobe_db::ConnectionParams;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DB: &str = "testdb";
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";

pub fn get_host() -> String {
    env::var("PGPROBE_TEST_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    env::var("PGPROBE_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn get_db() -> String {
    env::var("PGPROBE_TEST_DB").unwrap_or_else(|_| DEFAULT_DB.to_string())
}

pub fn get_user() -> String {
    env::var("PGPROBE_TEST_USER").unwrap_or_else(|_| DEFAULT_USER.to_string())
}

pub fn get_password() -> String {
    env::var("PGPROBE_TEST_PASSWD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string())
}

pub fn test_params() -> ConnectionParams {
    ConnectionParams {
        host: Some(get_host()),
        port: Some(get_port()),
        dbname: Some(get_db()),
        user: Some(get_user()),
        password: Some(get_password()),
        connect_timeout: Some(Duration::from_secs(10)),
    }
}

/// TCP reachability only; says nothing about credentials.
pub fn is_postgres_available() -> bool {
    let addr = format!("{}:{}", get_host(), get_port());
    let socket_addrs: Vec<_> = match addr.to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(_) => return false,
    };

    socket_addrs
        .iter()
        .any(|socket_addr| TcpStream::connect_timeout(socket_addr, Duration::from_secs(2)).is_ok())
}

#[macro_export]
macro_rules! skip_if_no_postgres {
    () => {
        if !$crate::common::is_postgres_available() {
            eprintln!(
                "Skipping test: PostgreSQL not available at {}:{}",
                $crate::common::get_host(),
                $crate::common::get_port()
            );
            return;
        }
    };
}

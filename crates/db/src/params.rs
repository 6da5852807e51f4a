use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

const MASKED_PASSWORD: &str = "xxx";

/// Parameters for one connection. Absent (or empty) values fall back to the
/// driver defaults, which honour the usual `PG*` variables.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub connect_timeout: Option<Duration>,
}

impl ConnectionParams {
    /// Key=value summary in libpq conninfo form, password masked. Only the
    /// parameters that were supplied are listed.
    pub fn descriptor(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(host) = &self.host {
            pairs.push(("host", quote_value(host)));
        }
        if let Some(port) = self.port {
            pairs.push(("port", port.to_string()));
        }
        if let Some(user) = &self.user {
            pairs.push(("user", quote_value(user)));
        }
        if self.password.is_some() {
            pairs.push(("password", MASKED_PASSWORD.to_string()));
        }
        if let Some(dbname) = &self.dbname {
            pairs.push(("dbname", quote_value(dbname)));
        }
        if let Some(timeout) = self.effective_connect_timeout() {
            pairs.push(("connect_timeout", whole_seconds(timeout).to_string()));
        }

        pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The connect limit to enforce. Zero means no limit, as in libpq.
    pub fn effective_connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.filter(|timeout| !timeout.is_zero())
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new();

        if let Some(host) = non_empty(&self.host) {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = non_empty(&self.user) {
            options = options.username(user);
        }
        if let Some(password) = non_empty(&self.password) {
            options = options.password(password);
        }
        if let Some(dbname) = non_empty(&self.dbname) {
            options = options.database(dbname);
        }

        options.application_name("pgprobe")
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

/// Seconds, rounded up so a sub-second limit never reads as `0`.
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Quote a conninfo value when it is empty or holds whitespace, quotes or
/// backslashes.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');

    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

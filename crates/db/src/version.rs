use std::fmt;

/// The single-column row returned by `SELECT version()`.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerVersion {
    row: (String,),
}

impl ServerVersion {
    pub fn from_row(row: (String,)) -> Self {
        Self { row }
    }

    /// Full banner, e.g. `PostgreSQL 16.2 on x86_64-pc-linux-gnu, ...`.
    pub fn banner(&self) -> &str {
        &self.row.0
    }

    /// Product token, e.g. `PostgreSQL`.
    pub fn product(&self) -> Option<&str> {
        self.banner().split_whitespace().next()
    }

    /// Version token, e.g. `16.2`.
    pub fn version(&self) -> Option<&str> {
        self.banner()
            .split_whitespace()
            .nth(1)
            .map(|token| token.trim_end_matches(','))
    }
}

// Printed as the raw fetched row.
impl fmt::Debug for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.row)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}

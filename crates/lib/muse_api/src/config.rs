//! API server configuration.

/// Configuration for the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// Document store connection URL.
    pub database_url: String,
    /// Database holding the document collections.
    pub database_name: String,
}

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432";
pub const DEFAULT_DATABASE_NAME: &str = "appdb";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            database_name: DEFAULT_DATABASE_NAME.into(),
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable        | Default                     |
    /// |-----------------|-----------------------------|
    /// | `BIND_ADDR`     | `127.0.0.1:8000`            |
    /// | `DATABASE_URL`  | `postgres://localhost:5432` |
    /// | `DATABASE_NAME` | `appdb`                     |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.into()),
        }
    }
}

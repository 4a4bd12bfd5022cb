use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use sea_orm::ConnectOptions;
use std::fmt;
use std::time::Duration;
use tracing::log::LevelFilter;

/// Connection settings for the relational task store.
///
/// The URL scheme picks the backend (`postgres://` or `sqlite://`). `Debug`
/// output redacts the password so the config can be logged safely.
#[derive(Clone)]
pub struct SqlConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Timeout for a single connection attempt, in seconds
    pub connect_timeout_secs: u64,

    /// Enable SQL statement logging
    pub sql_logging: bool,
}

impl SqlConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Assemble a PostgreSQL URL from its parts, percent-encoding the credentials.
    pub fn from_parts(host: &str, port: u16, database: &str, user: &str, password: &str) -> Self {
        Self::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(user),
            urlencoding::encode(password),
            host,
            port,
            database
        ))
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections.min(max_connections);
        self
    }

    /// The URL with any password replaced by `***`
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match userinfo.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => self.url.clone(),
        }
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sql_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            sql_logging: false,
        }
    }
}

impl fmt::Debug for SqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("sql_logging", &self.sql_logging)
            .finish()
    }
}

/// Environment variables (all optional):
/// - `DATABASE_URL` - full URL; when set the `DB_*` location parts are ignored
/// - `DB_HOST` (db), `DB_PORT` (5432), `DB_NAME` (todolist)
/// - `DB_USER` (devops), `DB_PASS` (securepassword)
/// - `DB_MAX_CONNECTIONS` (10), `DB_MIN_CONNECTIONS` (1)
/// - `DB_CONNECT_TIMEOUT_SECS` (8)
/// - `DB_SQL_LOGGING` (false)
impl FromEnv for SqlConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::from_parts(
                &env_or_default("DB_HOST", "db"),
                env_parse("DB_PORT", "5432")?,
                &env_or_default("DB_NAME", "todolist"),
                &env_or_default("DB_USER", "devops"),
                &env_or_default("DB_PASS", "securepassword"),
            ),
        };

        let max_connections = env_parse("DB_MAX_CONNECTIONS", "10")?;
        let min_connections = env_parse("DB_MIN_CONNECTIONS", "1")?;

        Ok(Self {
            connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?,
            sql_logging: env_parse("DB_SQL_LOGGING", "false")?,
            ..base.with_pool_size(max_connections, min_connections)
        })
    }
}

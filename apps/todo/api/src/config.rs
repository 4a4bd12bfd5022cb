use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::RetryPolicy;
use database::sql::SqlConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` and `database` libraries
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: SqlConfig,
    pub retry: RetryPolicy,
    pub environment: Environment,
    /// Where the task collection is mounted below `/api`, e.g. `/tasks`
    pub tasks_route: String,
    /// `*` or a comma-separated list of origins
    pub cors_allowed_origin: String,
    pub seed_demo_tasks: bool,
}

impl Config {
    /// Every variable is optional; only malformed values are an error.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let database = SqlConfig::from_env()?;
        let retry = RetryPolicy::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            database,
            retry,
            environment,
            tasks_route: parse_tasks_route(&env_or_default("TASKS_ROUTE", "/tasks"))?,
            cors_allowed_origin: env_or_default("CORS_ALLOWED_ORIGIN", "*"),
            seed_demo_tasks: env_parse("SEED_DEMO_TASKS", "true")?,
        })
    }
}

/// Normalize `TASKS_ROUTE` into something `Router::nest` accepts.
fn parse_tasks_route(raw: &str) -> Result<String, ConfigError> {
    let route = raw.trim().trim_end_matches('/');

    let invalid = |details: &str| ConfigError::InvalidValue {
        key: "TASKS_ROUTE".to_string(),
        details: format!("{details}, got '{raw}'"),
    };

    if !route.starts_with('/') {
        return Err(invalid("must start with '/' and must not be '/'"));
    }
    if route.contains(['{', '}', '*']) {
        return Err(invalid("must not contain path parameters or wildcards"));
    }

    Ok(route.to_string())
}

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument, warn};

use super::SqlConfig;
use super::health::check_health_with_query;
use crate::common::{DatabaseError, DatabaseResult, RetryPolicy, retry_fixed};

/// Single connection attempt with explicit options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Connected to task store");
    Ok(db)
}

/// Single connection attempt from a [`SqlConfig`]
pub async fn connect(config: SqlConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect, retrying with a fixed delay until the policy is exhausted.
///
/// This is the only blocking sequence at start-up. When every attempt fails
/// the caller gets [`DatabaseError::ConnectionFailed`] and is expected to
/// treat the store as unavailable (exit, never serve without a store).
#[instrument(skip_all, fields(url = %config.redacted_url(), max_attempts = policy.attempts()))]
pub async fn connect_with_retry(
    config: SqlConfig,
    policy: &RetryPolicy,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();

    retry_fixed(
        || {
            let opts = options.clone();
            connect_with_options(opts)
        },
        policy,
    )
    .await
    .map_err(|e| DatabaseError::ConnectionFailed {
        attempts: policy.attempts(),
        last_error: e.to_string(),
    })
}

/// Idempotently bring the schema up to date.
///
/// Safe to run on every start and from several instances at once: if the
/// migrator fails (typically because another instance is creating the same
/// objects) the failure is logged and `probe` is run against the schema. Only
/// when the probe also fails is the error returned.
#[instrument(skip(db))]
pub async fn initialize_schema<M: MigratorTrait>(
    db: &DatabaseConnection,
    probe: &str,
) -> DatabaseResult<()> {
    match M::up(db, None).await {
        Ok(()) => {
            info!("Schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Schema initialization reported an error, probing existing schema");
            check_health_with_query(db, probe)
                .await
                .map_err(|probe_err| {
                    DatabaseError::SchemaError(format!("{} (probe: {})", e, probe_err))
                })?;
            info!("Existing schema is usable, continuing");
            Ok(())
        }
    }
}

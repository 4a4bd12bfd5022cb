use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Verify the connection answers a trivial round trip.
///
/// Used by the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("ping failed: {}", e)))?;

    debug!("Store health check passed");
    Ok(())
}

/// Run `query` and succeed if it executes, e.g. to confirm a table exists.
pub async fn check_health_with_query(
    db: &DatabaseConnection,
    query: &str,
) -> Result<(), DatabaseError> {
    debug!(query, "Running store health check");

    let stmt = Statement::from_string(db.get_database_backend(), query.to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("query '{}' failed: {}", query, e))
    })?;

    Ok(())
}

/// Store-level error type shared by connection, schema and health code.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// SeaORM / driver error from a single statement
    #[error("SQL error: {0}")]
    Sql(#[from] sea_orm::DbErr),

    /// Every connection attempt allowed by the retry policy failed
    #[error("Could not connect after {attempts} attempts: {last_error}")]
    ConnectionFailed { attempts: u32, last_error: String },

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Schema could not be created and is not usable
    #[error("Schema initialization failed: {0}")]
    SchemaError(String),
}

/// Result type alias for store plumbing
pub type DatabaseResult<T> = Result<T, DatabaseError>;

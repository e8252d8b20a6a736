//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors. At the engine boundary they are folded into
//! [`pokequiz_core::store::StoreError`] so the quiz loop never sees a
//! database type.

use pokequiz_core::store::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Fold into a read failure for the engine.
    pub fn into_read(self) -> StoreError {
        StoreError::Read(self.to_string())
    }

    /// Fold into a write failure for the engine.
    pub fn into_write(self) -> StoreError {
        StoreError::Write(self.to_string())
    }
}

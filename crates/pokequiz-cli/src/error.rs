//! Error types for the terminal front end.

use pokequiz_core::config::ConfigError;
use pokequiz_db::DbError;

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration file or an override is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be reached or migrated.
    #[error("database error: {0}")]
    Db(#[from] DbError),

    /// The terminal could not be read or written.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

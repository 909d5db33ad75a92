/// Error types for the rosterdb application.
///
/// All fallible operations in the crate share the `RosterError` enum so that
/// errors propagate with `?` across the database, configuration, and menu
/// layers. The database helper additionally collapses these into its
/// sentinel return values on the compatibility path (see `core::db`).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Driver-level errors from SQLite operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// SQL statement errors (preparation, execution, result processing)
    #[error("Query error: {0}")]
    Query(String),

    /// Session lifecycle errors (not connected, open failures)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use RosterError as the error type.
pub type Result<T> = std::result::Result<T, RosterError>;

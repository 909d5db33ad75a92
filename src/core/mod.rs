/// Core infrastructure for rosterdb.
///
/// Shared plumbing used by every feature module: the database access
/// helper and the crate-wide error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, RosterError};

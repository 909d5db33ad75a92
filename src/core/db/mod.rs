/// Database Module
///
/// Groups everything that talks to SQLite: statement assembly
/// (`builder`), the result-set shape and value helpers (`query`), the
/// connection-owning session with its sentinel failure contract
/// (`session`), and schema introspection (`schema`).

pub mod builder;
pub mod query;
pub mod schema;
pub mod session;

pub use query::QueryResult;
pub use rusqlite::types::Value;
pub use session::{ConnectionParams, Session};

/// Session Module
///
/// This module provides the database access helper: a stateful session
/// object owning exactly one SQLite connection, created by an explicit
/// `connect` call and released by an explicit `close` call. All statement
/// execution flows through it, either as raw SQL (`run_statement`,
/// `get_data`) or through the convenience builders (`insert`, `select`,
/// `update`, `delete`, `get_one`, `count`).
///
/// ## Failure model
///
/// The default operations never surface an error: a failed statement is
/// logged and collapsed into a zero/empty sentinel (`0` affected rows, an
/// empty [`QueryResult`], `None`, or a zero count), indistinguishable from
/// a legitimately empty outcome. Each operation also has a `try_`-prefixed
/// variant returning `Result` for callers that need the cause; the
/// sentinel contract stays the default.
///
/// ## Concurrency
///
/// Fully synchronous, blocking I/O. A session has no internal locking and
/// must not be shared across threads; give each thread its own session and
/// let the engine's transaction isolation govern cross-session interaction.

use crate::core::db::builder;
use crate::core::db::query::{integer_value, QueryResult};
use crate::core::{Result, RosterError};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};

/// Where a session's database lives, plus open-time options.
#[derive(Debug, Clone, Default)]
pub struct ConnectionParams {
    /// Database file path; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    /// Busy-timeout applied right after opening, if set
    pub busy_timeout: Option<Duration>,
}

impl ConnectionParams {
    /// Parameters for a file-backed database.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConnectionParams {
            path: Some(path.into()),
            busy_timeout: None,
        }
    }

    /// Parameters for a private in-memory database.
    pub fn in_memory() -> Self {
        ConnectionParams::default()
    }

    /// Sets the busy-timeout applied on connect.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    /// Human-readable database location for diagnostics.
    pub fn location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }
}

/// One connection-owning database session.
///
/// Construction stores the parameters and leaves the session not-live;
/// `connect` opens it. No pooling, no reconnection, no multiplexing:
/// multiple sessions each hold independent connections.
#[derive(Debug)]
pub struct Session {
    params: ConnectionParams,
    conn: Option<Connection>,
}

impl Session {
    /// Creates a session in the not-connected state.
    pub fn new(params: ConnectionParams) -> Self {
        Session { params, conn: None }
    }

    /// The parameters this session was constructed with.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Opens the database and applies session pragmas.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success; the session is live afterwards, and any
    /// previously held connection is dropped. On failure the session keeps
    /// its prior state (not-live unless it was already connected).
    pub fn try_connect(&mut self) -> Result<()> {
        let conn = match &self.params.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if let Some(timeout) = self.params.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        self.conn = Some(conn);
        Ok(())
    }

    /// Attempts to open a session using the configured parameters.
    ///
    /// Returns `true` when the session is live afterwards. Any failure is
    /// logged and reported as `false`; this method never panics and never
    /// returns an error.
    pub fn connect(&mut self) -> bool {
        match self.try_connect() {
            Ok(()) => {
                debug!("connected to {}", self.params.location());
                true
            }
            Err(e) => {
                error!("failed to connect to {}: {}", self.params.location(), e);
                false
            }
        }
    }

    /// Releases the connection unconditionally.
    ///
    /// Safe to call on a never-connected or already-closed session. The
    /// connection also closes if the session is merely dropped, but callers
    /// that want deterministic release on every exit path should call this
    /// explicitly.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                error!("error while closing session: {}", e);
            } else {
                debug!("session closed");
            }
        }
    }

    /// Whether the session currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn connection(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| RosterError::Connection("no active session".to_string()))
    }

    fn connection_mut(&mut self) -> Result<&mut Connection> {
        self.conn
            .as_mut()
            .ok_or_else(|| RosterError::Connection("no active session".to_string()))
    }

    /// Executes one mutating statement (INSERT/UPDATE/DELETE/DDL) with
    /// positional parameters, committing on success and rolling back on
    /// failure.
    ///
    /// # Returns
    ///
    /// The engine-reported affected-row count (DDL statements report 0).
    pub fn try_run_statement(&mut self, sql: &str, params: &[Value]) -> Result<usize> {
        let conn = self.connection_mut()?;
        let tx = conn.transaction()?;
        match tx.execute(sql, params_from_iter(params.iter())) {
            Ok(affected) => {
                tx.commit()?;
                Ok(affected)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!("rollback after failed statement also failed: {}", rollback_err);
                }
                Err(RosterError::Query(format!(
                    "Statement execution failed: {}",
                    e
                )))
            }
        }
    }

    /// Sentinel form of [`Session::try_run_statement`]: on failure, logs a
    /// diagnostic and returns 0. Failure and "zero rows affected" are
    /// indistinguishable here by contract.
    pub fn run_statement(&mut self, sql: &str, params: &[Value]) -> usize {
        match self.try_run_statement(sql, params) {
            Ok(affected) => {
                debug!("statement ok, {} row(s) affected", affected);
                affected
            }
            Err(e) => {
                error!("statement failed: {}", e);
                0
            }
        }
    }

    /// Executes a read-only statement with positional parameters and
    /// materializes the full result set.
    pub fn try_get_data(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| RosterError::Query(format!("Failed to prepare statement: {}", e)))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    values.push(row.get::<_, Value>(i)?);
                }
                Ok(values)
            })
            .map_err(|e| RosterError::Query(format!("Query execution failed: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RosterError::Query(format!("Result processing failed: {}", e)))?;

        Ok(QueryResult::new(columns, rows))
    }

    /// Sentinel form of [`Session::try_get_data`]: on failure, logs a
    /// diagnostic and returns the empty result, indistinguishable from a
    /// genuinely empty result set.
    pub fn get_data(&self, sql: &str, params: &[Value]) -> QueryResult {
        match self.try_get_data(sql, params) {
            Ok(result) => {
                debug!("query ok, {} row(s)", result.row_count);
                result
            }
            Err(e) => {
                error!("query failed: {}", e);
                QueryResult::empty()
            }
        }
    }

    /// Inserts one row built from `(column, value)` pairs; values bind
    /// positionally in the order given. Identifiers are interpolated into
    /// the statement text, so only trusted names may be passed.
    pub fn try_insert(&mut self, table: &str, data: &[(&str, Value)]) -> Result<usize> {
        let columns: Vec<&str> = data.iter().map(|(column, _)| *column).collect();
        let values: Vec<Value> = data.iter().map(|(_, value)| value.clone()).collect();
        let sql = builder::insert_statement(table, &columns);
        self.try_run_statement(&sql, &values)
    }

    /// Sentinel form of [`Session::try_insert`].
    pub fn insert(&mut self, table: &str, data: &[(&str, Value)]) -> usize {
        match self.try_insert(table, data) {
            Ok(affected) => affected,
            Err(e) => {
                error!("insert into {} failed: {}", table, e);
                0
            }
        }
    }

    /// `SELECT * FROM table`, optionally filtered by a raw WHERE expression
    /// whose placeholders bind `params`.
    pub fn try_select(
        &self,
        table: &str,
        where_clause: Option<&str>,
        params: &[Value],
    ) -> Result<QueryResult> {
        let sql = builder::select_statement(table, where_clause);
        self.try_get_data(&sql, params)
    }

    /// Sentinel form of [`Session::try_select`].
    pub fn select(&self, table: &str, where_clause: Option<&str>, params: &[Value]) -> QueryResult {
        match self.try_select(table, where_clause, params) {
            Ok(result) => result,
            Err(e) => {
                error!("select from {} failed: {}", table, e);
                QueryResult::empty()
            }
        }
    }

    /// Updates rows matching the raw WHERE expression. The SET values bind
    /// first, followed by `where_params`.
    pub fn try_update(
        &mut self,
        table: &str,
        data: &[(&str, Value)],
        where_clause: &str,
        where_params: &[Value],
    ) -> Result<usize> {
        let columns: Vec<&str> = data.iter().map(|(column, _)| *column).collect();
        let mut params: Vec<Value> = data.iter().map(|(_, value)| value.clone()).collect();
        params.extend(where_params.iter().cloned());
        let sql = builder::update_statement(table, &columns, where_clause);
        self.try_run_statement(&sql, &params)
    }

    /// Sentinel form of [`Session::try_update`].
    pub fn update(
        &mut self,
        table: &str,
        data: &[(&str, Value)],
        where_clause: &str,
        where_params: &[Value],
    ) -> usize {
        match self.try_update(table, data, where_clause, where_params) {
            Ok(affected) => affected,
            Err(e) => {
                error!("update of {} failed: {}", table, e);
                0
            }
        }
    }

    /// Deletes rows matching the raw WHERE expression.
    pub fn try_delete(&mut self, table: &str, where_clause: &str, params: &[Value]) -> Result<usize> {
        let sql = builder::delete_statement(table, where_clause);
        self.try_run_statement(&sql, params)
    }

    /// Sentinel form of [`Session::try_delete`].
    pub fn delete(&mut self, table: &str, where_clause: &str, params: &[Value]) -> usize {
        match self.try_delete(table, where_clause, params) {
            Ok(affected) => affected,
            Err(e) => {
                error!("delete from {} failed: {}", table, e);
                0
            }
        }
    }

    /// Delegates to `select` and returns the first row, or `None` when the
    /// result set is empty. The full result set is materialized first; no
    /// LIMIT clause is added.
    pub fn try_get_one(
        &self,
        table: &str,
        where_clause: &str,
        params: &[Value],
    ) -> Result<Option<Vec<Value>>> {
        let mut result = self.try_select(table, Some(where_clause), params)?;
        if result.rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.rows.remove(0)))
        }
    }

    /// Sentinel form of [`Session::try_get_one`]: failure and "no matching
    /// row" both come back as `None`.
    pub fn get_one(&self, table: &str, where_clause: &str, params: &[Value]) -> Option<Vec<Value>> {
        match self.try_get_one(table, where_clause, params) {
            Ok(row) => row,
            Err(e) => {
                error!("get_one from {} failed: {}", table, e);
                None
            }
        }
    }

    /// `SELECT COUNT(*) FROM table`, optionally filtered; returns the
    /// scalar from the first row and column, or 0 when the result set is
    /// empty.
    pub fn try_count(
        &self,
        table: &str,
        where_clause: Option<&str>,
        params: &[Value],
    ) -> Result<i64> {
        let sql = builder::count_statement(table, where_clause);
        let result = self.try_get_data(&sql, params)?;
        Ok(result
            .first_row()
            .and_then(|row| row.first())
            .and_then(integer_value)
            .unwrap_or(0))
    }

    /// Sentinel form of [`Session::try_count`]: failure reads as 0.
    pub fn count(&self, table: &str, where_clause: Option<&str>, params: &[Value]) -> i64 {
        match self.try_count(table, where_clause, params) {
            Ok(count) => count,
            Err(e) => {
                error!("count of {} failed: {}", table, e);
                0
            }
        }
    }
}

/// Query Result Module
///
/// This module defines the normalized shape every read operation returns:
/// column names, row tuples, and a row count. Mutating statements report a
/// plain affected-row count instead (see `session`). It also hosts the
/// small value-coercion and display helpers shared by the session, the
/// roster layer, and the grid renderer.

use rusqlite::types::Value;

/// Represents the result of a read-only SQL statement.
///
/// Rows hold typed scalars (null, integer, real, text, or blob) rather than
/// pre-rendered strings; display formatting is a separate concern handled
/// by [`format_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names from the statement's result set
    pub columns: Vec<String>,
    /// Rows of data; each row's arity equals `columns.len()`
    pub rows: Vec<Vec<Value>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data.
    ///
    /// `row_count` is always derived from the row data so the
    /// `row_count == rows.len()` invariant cannot drift.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// The sentinel value returned when a read fails: no columns, no rows,
    /// zero count. Indistinguishable from a genuinely empty result set by
    /// design (the compatibility contract of the helper).
    pub fn empty() -> Self {
        QueryResult {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
        }
    }

    /// Returns true when the result carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row of the result set, if any.
    pub fn first_row(&self) -> Option<&Vec<Value>> {
        self.rows.first()
    }
}

/// Formats a SQLite value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}

/// Extracts an integer scalar, widening from REAL if the engine returned one.
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Real(f) => Some(*f as i64),
        _ => None,
    }
}

/// Extracts a real scalar, widening from INTEGER if the engine returned one.
///
/// SQLite's dynamic typing means aggregates over a REAL column can still
/// come back as INTEGER when every stored value happens to be integral.
pub fn real_value(value: &Value) -> Option<f64> {
    match value {
        Value::Real(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Extracts a text scalar.
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Text(t) => Some(t.clone()),
        _ => None,
    }
}

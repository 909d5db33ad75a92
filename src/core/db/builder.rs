/// SQL Statement Assembly Module
///
/// Builds the statement text for the session's convenience operations from
/// structured arguments: a table name, a column list, and an optional raw
/// WHERE expression. Table and column identifiers are interpolated directly
/// into the text, so callers pass trusted identifiers only. Literal values
/// never appear here; they bind positionally through `?` placeholders at
/// execution time.

/// `INSERT INTO <table> (<columns>) VALUES (<one ? per column>)`
pub fn insert_statement(table: &str, columns: &[&str]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

/// `SELECT * FROM <table>`, optionally suffixed with `WHERE <where_clause>`.
pub fn select_statement(table: &str, where_clause: Option<&str>) -> String {
    match where_clause {
        Some(clause) => format!("SELECT * FROM {} WHERE {}", table, clause),
        None => format!("SELECT * FROM {}", table),
    }
}

/// `UPDATE <table> SET <col> = ?, ... WHERE <where_clause>`
///
/// The caller binds the SET values first, then any WHERE parameters, in
/// that order.
pub fn update_statement(table: &str, columns: &[&str], where_clause: &str) -> String {
    let assignments: Vec<String> = columns.iter().map(|col| format!("{} = ?", col)).collect();
    format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        assignments.join(", "),
        where_clause
    )
}

/// `DELETE FROM <table> WHERE <where_clause>`
pub fn delete_statement(table: &str, where_clause: &str) -> String {
    format!("DELETE FROM {} WHERE {}", table, where_clause)
}

/// `SELECT COUNT(*) FROM <table>`, optionally suffixed with `WHERE <where_clause>`.
pub fn count_statement(table: &str, where_clause: Option<&str>) -> String {
    match where_clause {
        Some(clause) => format!("SELECT COUNT(*) FROM {} WHERE {}", table, clause),
        None => format!("SELECT COUNT(*) FROM {}", table),
    }
}

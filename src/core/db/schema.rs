/// Schema Module
///
/// Lightweight introspection over the connected database, built on the
/// session's own query surface: existence checks against `sqlite_master`
/// and column listings via `PRAGMA table_info`.

use crate::core::db::query::{integer_value, text_value};
use crate::core::db::session::Session;
use rusqlite::types::Value;

/// One column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Whether a table with the given name exists in the main schema.
pub fn table_exists(session: &Session, table: &str) -> bool {
    session.count(
        "sqlite_master",
        Some("type = 'table' AND name = ?"),
        &[Value::Text(table.to_string())],
    ) > 0
}

/// Lists the columns of a table in declaration order. A missing table
/// yields an empty listing, same as the underlying pragma.
///
/// The table name is interpolated into the pragma text (pragmas cannot
/// bind parameters), so only trusted names may be passed.
pub fn table_columns(session: &Session, table: &str) -> Vec<ColumnInfo> {
    let sql = format!("PRAGMA table_info({})", table);
    let result = session.get_data(&sql, &[]);
    result
        .rows
        .iter()
        .filter_map(|row| {
            Some(ColumnInfo {
                name: text_value(row.get(1)?)?,
                data_type: text_value(row.get(2)?).unwrap_or_default(),
                not_null: integer_value(row.get(3)?).unwrap_or(0) != 0,
                primary_key: integer_value(row.get(5)?).unwrap_or(0) != 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::session::ConnectionParams;

    fn session_with_table() -> Session {
        let mut session = Session::new(ConnectionParams::in_memory());
        assert!(session.connect());
        session.run_statement(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL, rank REAL)",
            &[],
        );
        session
    }

    #[test]
    fn test_table_exists() {
        let session = session_with_table();
        assert!(table_exists(&session, "notes"));
        assert!(!table_exists(&session, "missing"));
    }

    #[test]
    fn test_table_columns() {
        let session = session_with_table();
        let columns = table_columns(&session, "notes");
        assert_eq!(columns.len(), 3);

        assert_eq!(columns[0].name, "id");
        assert!(columns[0].primary_key);
        assert_eq!(columns[1].name, "body");
        assert_eq!(columns[1].data_type, "TEXT");
        assert!(columns[1].not_null);
        assert_eq!(columns[2].name, "rank");
        assert!(!columns[2].not_null);
    }

    #[test]
    fn test_missing_table_has_no_columns() {
        let session = session_with_table();
        assert!(table_columns(&session, "missing").is_empty());
    }
}

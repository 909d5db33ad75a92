//! Property-based tests for statement assembly and roster round-trips
//!
//! These tests verify structural invariants through property-based
//! testing, ensuring that:
//! - Built statements keep their shape for arbitrary identifiers
//! - Placeholder counts always match the values being bound
//! - A generated roster survives a real database round-trip intact
//! - Grid rendering is total over arbitrary result sets

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rosterdb::core::db::builder::{
        count_statement, delete_statement, insert_statement, select_statement, update_statement,
    };
    use rosterdb::core::db::{ConnectionParams, QueryResult, Session, Value};
    use rosterdb::grid;
    use rosterdb::roster::Roster;

    fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,15}".prop_map(|s: String| s)
    }

    fn arb_columns() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_identifier(), 1..6)
    }

    fn arb_name() -> impl Strategy<Value = String> {
        "[A-Za-z]{1,12}".prop_map(|s: String| s)
    }

    fn arb_height() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            3 => (1.0f64..=300.0).prop_map(Some),
            1 => Just(None),
        ]
    }

    fn arb_entries() -> impl Strategy<Value = Vec<(String, Option<f64>)>> {
        prop::collection::vec((arb_name(), arb_height()), 0..12)
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::Integer),
            (-1.0e6f64..1.0e6).prop_map(Value::Real),
            "[ -~]{0,16}".prop_map(Value::Text),
            prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Blob),
        ]
    }

    fn arb_result() -> impl Strategy<Value = QueryResult> {
        prop::collection::vec(arb_identifier(), 1..5).prop_flat_map(|columns| {
            let width = columns.len();
            prop::collection::vec(prop::collection::vec(arb_value(), width), 0..8)
                .prop_map(move |rows| QueryResult::new(columns.clone(), rows))
        })
    }

    proptest! {
        /// An insert statement names the table, lists the columns, and
        /// carries exactly one placeholder per column
        #[test]
        fn prop_insert_statement_shape(table in arb_identifier(), columns in arb_columns()) {
            let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
            let sql = insert_statement(&table, &refs);

            let insert_prefix = format!("INSERT INTO {} (", table);
            prop_assert!(sql.starts_with(&insert_prefix));
            prop_assert!(sql.contains(") VALUES ("));
            prop_assert!(sql.ends_with(')'));
            prop_assert_eq!(sql.matches('?').count(), columns.len());
        }

        /// Select statements keep their exact two forms
        #[test]
        fn prop_select_statement_forms(table in arb_identifier(), clause_column in arb_identifier()) {
            prop_assert_eq!(
                select_statement(&table, None),
                format!("SELECT * FROM {}", table)
            );
            let clause = format!("{} = ?", clause_column);
            prop_assert_eq!(
                select_statement(&table, Some(&clause)),
                format!("SELECT * FROM {} WHERE {}", table, clause)
            );
        }

        /// An update statement binds all SET values before the WHERE
        /// placeholder and preserves the raw clause text at the end
        #[test]
        fn prop_update_statement_shape(table in arb_identifier(), columns in arb_columns(), clause_column in arb_identifier()) {
            let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
            let clause = format!("{} = ?", clause_column);
            let sql = update_statement(&table, &refs, &clause);

            let update_prefix = format!("UPDATE {} SET ", table);
            prop_assert!(sql.starts_with(&update_prefix));
            let where_suffix = format!(" WHERE {}", clause);
            prop_assert!(sql.ends_with(&where_suffix));
            prop_assert_eq!(sql.matches('?').count(), columns.len() + 1);
        }

        /// Delete and count statements keep their exact forms
        #[test]
        fn prop_delete_and_count_forms(table in arb_identifier(), clause_column in arb_identifier()) {
            let clause = format!("{} = ?", clause_column);
            prop_assert_eq!(
                delete_statement(&table, &clause),
                format!("DELETE FROM {} WHERE {}", table, clause)
            );
            prop_assert_eq!(
                count_statement(&table, None),
                format!("SELECT COUNT(*) FROM {}", table)
            );
            prop_assert_eq!(
                count_statement(&table, Some(&clause)),
                format!("SELECT COUNT(*) FROM {} WHERE {}", table, clause)
            );
        }

        /// A generated roster round-trips through a real database: order,
        /// names, heights, totals, and aggregates all survive
        #[test]
        fn prop_generated_roster_round_trips(entries in arb_entries(), threshold in 0.0f64..=300.0) {
            let mut session = Session::new(ConnectionParams::in_memory());
            prop_assert!(session.connect());
            let mut roster = Roster::new(session);
            prop_assert!(roster.ensure_schema());

            for (name, height) in &entries {
                prop_assert!(roster.add_student(name, *height));
            }

            prop_assert_eq!(roster.total(), entries.len() as i64);

            let students = roster.students();
            prop_assert_eq!(students.len(), entries.len());
            for (student, (name, height)) in students.iter().zip(entries.iter()) {
                prop_assert_eq!(&student.name, name);
                prop_assert_eq!(student.height, *height);
            }
            for pair in students.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }

            let expected_taller = entries
                .iter()
                .filter(|(_, height)| matches!(height, Some(h) if *h > threshold))
                .count();
            prop_assert_eq!(roster.taller_than(threshold).len(), expected_taller);

            let measured = entries.iter().filter(|(_, height)| height.is_some()).count() as i64;
            match roster.statistics() {
                None => prop_assert!(entries.is_empty()),
                Some(stats) => {
                    prop_assert_eq!(stats.total, entries.len() as i64);
                    prop_assert_eq!(stats.measured, measured);
                    let bucketed: i64 = stats.buckets.iter().map(|b| b.count).sum();
                    prop_assert_eq!(bucketed, measured);
                }
            }
        }

        /// Rendering never panics and always yields a header, a separator,
        /// and one line per row
        #[test]
        fn prop_grid_renders_any_result(result in arb_result()) {
            let rendered = grid::render(&result);
            prop_assert_eq!(rendered.split('\n').count(), result.row_count + 2);

            let header = rendered.split('\n').next().unwrap();
            for column in &result.columns {
                prop_assert!(header.contains(column.as_str()));
            }
        }
    }

    // Edge cases the properties cannot reach

    #[test]
    fn test_update_with_no_columns_is_rejected_by_the_engine() {
        let mut session = Session::new(ConnectionParams::in_memory());
        assert!(session.connect());
        session.run_statement("CREATE TABLE t (x INTEGER)", &[]);
        session.run_statement("INSERT INTO t (x) VALUES (1)", &[]);

        assert_eq!(session.update("t", &[], "x = ?", &[Value::Integer(1)]), 0);
        assert!(session
            .try_update("t", &[], "x = ?", &[Value::Integer(1)])
            .is_err());
        assert_eq!(session.count("t", None, &[]), 1);
    }

    #[test]
    fn test_count_on_missing_table_is_zero() {
        let mut session = Session::new(ConnectionParams::in_memory());
        assert!(session.connect());
        assert_eq!(session.count("never_created", None, &[]), 0);
    }
}

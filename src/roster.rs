/// Roster Module
///
/// Domain layer over the database session: the `students` table schema,
/// typed `Student` records, and the operations the menu exposes (add,
/// list, search, update, remove, statistics). All persistence flows
/// through the session's builders or raw-SQL surface, inheriting its
/// sentinel failure contract; nothing here panics on a broken database.

use crate::core::db::query::{integer_value, real_value, text_value};
use crate::core::db::schema;
use crate::core::db::{Session, Value};
use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

const TABLE: &str = "students";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA_DDL: &str = "CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    height REAL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
)";

/// Height bands used by the statistics report, as `(lower, upper, label)`
/// with each band covering `lower <= height < upper`; the top band has no
/// upper bound.
const HEIGHT_BUCKETS: [(f64, Option<f64>, &str); 4] = [
    (0.0, Some(160.0), "under 160 cm"),
    (160.0, Some(170.0), "160-170 cm"),
    (170.0, Some(180.0), "170-180 cm"),
    (180.0, None, "180 cm and up"),
];

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub height: Option<f64>,
    pub created_at: Option<NaiveDateTime>,
}

/// One height band of the statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightBucket {
    pub label: &'static str,
    /// Inclusive lower bound
    pub lower: f64,
    /// Exclusive upper bound; `None` marks the open-ended top band
    pub upper: Option<f64>,
    pub count: i64,
    /// Share of students with a measured height, in percent
    pub share: f64,
}

/// Aggregate view of the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStatistics {
    pub total: i64,
    /// Students with a non-null height
    pub measured: i64,
    pub average_height: Option<f64>,
    pub tallest: Option<(String, f64)>,
    pub shortest: Option<(String, f64)>,
    pub buckets: Vec<HeightBucket>,
}

/// Whether a name is acceptable for a student record.
pub fn valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Whether a height in centimeters is plausible for a student record.
pub fn valid_height(height: f64) -> bool {
    height.is_finite() && height > 0.0 && height <= 300.0
}

fn student_from_row(row: &[Value]) -> Option<Student> {
    Some(Student {
        id: integer_value(row.first()?)?,
        name: text_value(row.get(1)?)?,
        height: row.get(2).and_then(real_value),
        created_at: row
            .get(3)
            .and_then(text_value)
            .and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok()),
    })
}

/// The student roster, owning the database session it persists through.
pub struct Roster {
    session: Session,
}

impl Roster {
    pub fn new(session: Session) -> Self {
        Roster { session }
    }

    /// Read access to the underlying session, for status display.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Releases the underlying session.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Creates the `students` table when absent and verifies it exists
    /// afterwards.
    pub fn ensure_schema(&mut self) -> bool {
        self.session.run_statement(SCHEMA_DDL, &[]);
        if schema::table_exists(&self.session, TABLE) {
            let columns = schema::table_columns(&self.session, TABLE);
            debug!("{} table ready with {} column(s)", TABLE, columns.len());
            true
        } else {
            error!("failed to create the {} table", TABLE);
            false
        }
    }

    /// Fills an empty roster with a handful of sample students and returns
    /// the number inserted. A non-empty roster is left untouched.
    pub fn seed_demo(&mut self) -> usize {
        if self.total() > 0 {
            return 0;
        }
        let samples: [(&str, f64); 5] = [
            ("Avery", 158.0),
            ("Blake", 172.5),
            ("Casey", 169.0),
            ("Drew", 181.2),
            ("Emery", 175.0),
        ];
        let mut inserted = 0;
        for (name, height) in samples {
            if self.add_student(name, Some(height)) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Inserts one student. Returns `false` when validation rejects the
    /// input or the insert does not affect exactly one row.
    pub fn add_student(&mut self, name: &str, height: Option<f64>) -> bool {
        if !valid_name(name) {
            warn!("rejecting student with a blank name");
            return false;
        }
        let mut data = vec![("name", Value::Text(name.trim().to_string()))];
        if let Some(height) = height {
            if !valid_height(height) {
                warn!("rejecting out-of-range height {}", height);
                return false;
            }
            data.push(("height", Value::Real(height)));
        }
        self.session.insert(TABLE, &data) == 1
    }

    fn collect_students(&self, sql: &str, params: &[Value]) -> Vec<Student> {
        let result = self.session.get_data(sql, params);
        result
            .rows
            .iter()
            .filter_map(|row| student_from_row(row))
            .collect()
    }

    /// All students in id order.
    pub fn students(&self) -> Vec<Student> {
        self.collect_students(
            "SELECT student_id, name, height, created_at FROM students ORDER BY student_id",
            &[],
        )
    }

    /// Students whose name contains the given fragment.
    pub fn find_by_name(&self, fragment: &str) -> Vec<Student> {
        let like = format!("%{}%", fragment.trim());
        self.collect_students(
            "SELECT student_id, name, height, created_at FROM students \
             WHERE name LIKE ? ORDER BY student_id",
            &[Value::Text(like)],
        )
    }

    /// Students strictly taller than the given height.
    pub fn taller_than(&self, height: f64) -> Vec<Student> {
        let result = self
            .session
            .select(TABLE, Some("height > ?"), &[Value::Real(height)]);
        result
            .rows
            .iter()
            .filter_map(|row| student_from_row(row))
            .collect()
    }

    /// Students whose height lies within the inclusive range.
    pub fn find_by_height(&self, min: f64, max: f64) -> Vec<Student> {
        let result = self.session.select(
            TABLE,
            Some("height BETWEEN ? AND ?"),
            &[Value::Real(min), Value::Real(max)],
        );
        result
            .rows
            .iter()
            .filter_map(|row| student_from_row(row))
            .collect()
    }

    /// Looks up one student by id.
    pub fn student(&self, id: i64) -> Option<Student> {
        self.session
            .get_one(TABLE, "student_id = ?", &[Value::Integer(id)])
            .and_then(|row| student_from_row(&row))
    }

    /// Updates the provided fields of one student and returns the affected
    /// row count. Passing no fields, or a field that fails validation,
    /// changes nothing and returns 0.
    pub fn update_student(&mut self, id: i64, name: Option<&str>, height: Option<f64>) -> usize {
        let mut data: Vec<(&str, Value)> = Vec::new();
        if let Some(name) = name {
            if !valid_name(name) {
                warn!("rejecting update with a blank name");
                return 0;
            }
            data.push(("name", Value::Text(name.trim().to_string())));
        }
        if let Some(height) = height {
            if !valid_height(height) {
                warn!("rejecting update with out-of-range height {}", height);
                return 0;
            }
            data.push(("height", Value::Real(height)));
        }
        if data.is_empty() {
            return 0;
        }
        self.session
            .update(TABLE, &data, "student_id = ?", &[Value::Integer(id)])
    }

    /// Deletes one student by id and returns the affected row count.
    pub fn remove_student(&mut self, id: i64) -> usize {
        self.session
            .delete(TABLE, "student_id = ?", &[Value::Integer(id)])
    }

    /// Number of students on the roster.
    pub fn total(&self) -> i64 {
        self.session.count(TABLE, None, &[])
    }

    fn extremum(&self, direction: &str) -> Option<(String, f64)> {
        let sql = format!(
            "SELECT name, height FROM students WHERE height IS NOT NULL \
             ORDER BY height {} LIMIT 1",
            direction
        );
        let result = self.session.get_data(&sql, &[]);
        let row = result.first_row()?;
        Some((text_value(row.first()?)?, real_value(row.get(1)?)?))
    }

    /// Aggregates the roster into totals, extremes, and height bands.
    /// Returns `None` for an empty roster.
    pub fn statistics(&self) -> Option<RosterStatistics> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let measured = self
            .session
            .count(TABLE, Some("height IS NOT NULL"), &[]);
        let average_height = self
            .session
            .get_data("SELECT AVG(height) FROM students", &[])
            .first_row()
            .and_then(|row| row.first())
            .and_then(real_value);
        let buckets = HEIGHT_BUCKETS
            .iter()
            .map(|&(lower, upper, label)| {
                let count = match upper {
                    Some(upper) => self.session.count(
                        TABLE,
                        Some("height >= ? AND height < ?"),
                        &[Value::Real(lower), Value::Real(upper)],
                    ),
                    None => self
                        .session
                        .count(TABLE, Some("height >= ?"), &[Value::Real(lower)]),
                };
                let share = if measured > 0 {
                    count as f64 / measured as f64 * 100.0
                } else {
                    0.0
                };
                HeightBucket {
                    label,
                    lower,
                    upper,
                    count,
                    share,
                }
            })
            .collect();

        Some(RosterStatistics {
            total,
            measured,
            average_height,
            tallest: self.extremum("DESC"),
            shortest: self.extremum("ASC"),
            buckets,
        })
    }
}

/// Grid Module
///
/// Width-aligned plain-text rendering of query results and roster
/// listings for the console. Column widths grow to the widest cell;
/// values render through the same formatting used everywhere else.

use crate::core::db::query::format_value;
use crate::core::db::QueryResult;
use crate::roster::Student;

/// Renders a query result as an aligned text table. A result with no
/// columns renders as a placeholder line.
pub fn render(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return String::from("(no rows)");
    }
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();
    layout(&result.columns, &rows)
}

/// Renders roster listings with a fixed column set; the created-at column
/// is included only when requested.
pub fn render_students(students: &[Student], show_timestamps: bool) -> String {
    let mut columns = vec![
        "id".to_string(),
        "name".to_string(),
        "height".to_string(),
    ];
    if show_timestamps {
        columns.push("added".to_string());
    }

    let rows: Vec<Vec<String>> = students
        .iter()
        .map(|student| {
            let mut row = vec![
                student.id.to_string(),
                student.name.clone(),
                student
                    .height
                    .map(|h| format!("{:.1}", h))
                    .unwrap_or_else(|| "-".to_string()),
            ];
            if show_timestamps {
                row.push(
                    student
                        .created_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            row
        })
        .collect();
    layout(&columns, &rows)
}

fn layout(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(columns, &widths));
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("-+-"));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

// The last cell stays unpadded to keep lines free of trailing spaces.
fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        if i + 1 == cells.len() {
            parts.push(cell.clone());
        } else {
            parts.push(format!("{:<width$}", cell, width = width));
        }
    }
    parts.join(" | ")
}

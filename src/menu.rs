/// Menu Module
///
/// The interactive console loop: a numbered menu over the roster
/// operations, driven by line-based prompts on stdin. End-of-input at any
/// prompt ends the program cleanly, so the menu can be scripted through a
/// pipe as well as used interactively.

use crate::config::Config;
use crate::core::Result;
use crate::grid;
use crate::roster::{self, Roster};
use std::io::{self, Write};

const MENU: &str = "1) Add a student
2) List all students
3) Find students
4) Update a student
5) Remove a student
6) Statistics
7) Quit";

/// Runs the menu loop until the user quits or input ends.
pub fn run_menu(roster: &mut Roster, config: &Config) -> Result<()> {
    println!("Student roster manager");
    println!("Connected to {}.", roster.session().params().location());

    loop {
        println!();
        println!("{}", MENU);
        let choice = match read_line("Choose an option: ")? {
            Some(choice) => choice,
            None => break,
        };
        match choice.as_str() {
            "1" => {
                if !add_flow(roster)? {
                    break;
                }
            }
            "2" => list_flow(roster, config),
            "3" => {
                if !search_flow(roster, config)? {
                    break;
                }
            }
            "4" => {
                if !update_flow(roster)? {
                    break;
                }
            }
            "5" => {
                if !delete_flow(roster)? {
                    break;
                }
            }
            "6" => stats_flow(roster),
            "7" => break,
            "" => continue,
            other => println!("Unknown option '{}', enter a number from 1 to 7.", other),
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Prompts and reads one line, trimmed. `None` means end of input.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_flow(roster: &mut Roster) -> Result<bool> {
    let name = match read_line("Name: ")? {
        Some(name) => name,
        None => return Ok(false),
    };
    if !roster::valid_name(&name) {
        println!("Name cannot be empty.");
        return Ok(true);
    }
    let height_input = match read_line("Height in cm (blank to skip): ")? {
        Some(input) => input,
        None => return Ok(false),
    };
    let height = match parse_height(&height_input) {
        Ok(height) => height,
        Err(message) => {
            println!("{}", message);
            return Ok(true);
        }
    };
    if roster.add_student(&name, height) {
        println!("Added {}.", name);
    } else {
        println!("Could not add the student.");
    }
    Ok(true)
}

fn list_flow(roster: &Roster, config: &Config) {
    let students = roster.students();
    if students.is_empty() {
        println!("The roster is empty.");
    } else {
        println!(
            "{}",
            grid::render_students(&students, config.display.show_timestamps)
        );
        println!("{} student(s) on the roster.", students.len());
    }
}

fn search_flow(roster: &Roster, config: &Config) -> Result<bool> {
    let mode = match read_line("Search by 1) name or 2) height range: ")? {
        Some(mode) => mode,
        None => return Ok(false),
    };
    match mode.as_str() {
        "1" => search_by_name(roster, config),
        "2" => search_by_height(roster, config),
        other => {
            println!("Unknown search mode '{}'.", other);
            Ok(true)
        }
    }
}

fn search_by_name(roster: &Roster, config: &Config) -> Result<bool> {
    let fragment = match read_line("Name contains: ")? {
        Some(fragment) => fragment,
        None => return Ok(false),
    };
    if fragment.is_empty() {
        println!("Nothing to search for.");
        return Ok(true);
    }
    let hits = roster.find_by_name(&fragment);
    if hits.is_empty() {
        println!("No students matched '{}'.", fragment);
    } else {
        println!(
            "{}",
            grid::render_students(&hits, config.display.show_timestamps)
        );
    }
    Ok(true)
}

fn search_by_height(roster: &Roster, config: &Config) -> Result<bool> {
    let min = match read_line("From (cm): ")? {
        Some(input) => input,
        None => return Ok(false),
    };
    let max = match read_line("To (cm): ")? {
        Some(input) => input,
        None => return Ok(false),
    };
    let (min, max) = match (min.parse::<f64>(), max.parse::<f64>()) {
        (Ok(min), Ok(max)) => (min, max),
        _ => {
            println!("Heights must be numbers.");
            return Ok(true);
        }
    };
    if min > max {
        println!("The range start must not exceed the end.");
        return Ok(true);
    }
    let hits = roster.find_by_height(min, max);
    if hits.is_empty() {
        println!("No students in that range.");
    } else {
        println!(
            "{}",
            grid::render_students(&hits, config.display.show_timestamps)
        );
    }
    Ok(true)
}

fn update_flow(roster: &mut Roster) -> Result<bool> {
    let id = match read_id()? {
        IdInput::Id(id) => id,
        IdInput::Invalid => return Ok(true),
        IdInput::Eof => return Ok(false),
    };
    let student = match roster.student(id) {
        Some(student) => student,
        None => {
            println!("No student with id {}.", id);
            return Ok(true);
        }
    };
    println!("{}", grid::render_students(&[student.clone()], false));

    let name_input = match read_line(&format!("New name (blank keeps '{}'): ", student.name))? {
        Some(input) => input,
        None => return Ok(false),
    };
    let height_input = match read_line("New height in cm (blank keeps current): ")? {
        Some(input) => input,
        None => return Ok(false),
    };

    let name = if name_input.is_empty() {
        None
    } else {
        Some(name_input.as_str())
    };
    let height = if height_input.is_empty() {
        None
    } else {
        match parse_height(&height_input) {
            Ok(height) => height,
            Err(message) => {
                println!("{}", message);
                return Ok(true);
            }
        }
    };

    if name.is_none() && height.is_none() {
        println!("Nothing to change.");
        return Ok(true);
    }
    let affected = roster.update_student(id, name, height);
    println!("{} row(s) updated.", affected);
    Ok(true)
}

fn delete_flow(roster: &mut Roster) -> Result<bool> {
    let id = match read_id()? {
        IdInput::Id(id) => id,
        IdInput::Invalid => return Ok(true),
        IdInput::Eof => return Ok(false),
    };
    let student = match roster.student(id) {
        Some(student) => student,
        None => {
            println!("No student with id {}.", id);
            return Ok(true);
        }
    };
    let confirm = match read_line(&format!(
        "Delete {} (id {})? [y/N]: ",
        student.name, student.id
    ))? {
        Some(input) => input,
        None => return Ok(false),
    };
    if confirm.eq_ignore_ascii_case("y") || confirm.eq_ignore_ascii_case("yes") {
        let affected = roster.remove_student(id);
        println!("{} row(s) deleted.", affected);
    } else {
        println!("Cancelled.");
    }
    Ok(true)
}

fn stats_flow(roster: &Roster) {
    let stats = match roster.statistics() {
        Some(stats) => stats,
        None => {
            println!("The roster is empty.");
            return;
        }
    };
    println!("Students on the roster: {}", stats.total);
    println!("With a measured height: {}", stats.measured);
    if let Some(average) = stats.average_height {
        println!("Average height: {:.1} cm", average);
    }
    if let Some((name, height)) = &stats.tallest {
        println!("Tallest: {} at {:.1} cm", name, height);
    }
    if let Some((name, height)) = &stats.shortest {
        println!("Shortest: {} at {:.1} cm", name, height);
    }
    println!("Height distribution:");
    for bucket in &stats.buckets {
        if bucket.count == 0 {
            continue;
        }
        println!(
            "  {:<13} {:>3}  ({:.1}%)",
            bucket.label, bucket.count, bucket.share
        );
    }
}

enum IdInput {
    Id(i64),
    Invalid,
    Eof,
}

fn read_id() -> Result<IdInput> {
    let input = match read_line("Student id: ")? {
        Some(input) => input,
        None => return Ok(IdInput::Eof),
    };
    match parse_id(&input) {
        Some(id) => Ok(IdInput::Id(id)),
        None => {
            println!("'{}' is not a valid id.", input);
            Ok(IdInput::Invalid)
        }
    }
}

fn parse_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

/// Parses a height prompt answer: blank means "no height", otherwise the
/// value must be a number in the accepted range.
fn parse_height(input: &str) -> std::result::Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(height) if roster::valid_height(height) => Ok(Some(height)),
        Ok(height) => Err(format!("Height {} is out of range (0 to 300 cm).", height)),
        Err(_) => Err(format!("'{}' is not a number.", trimmed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("  7 "), Some(7));
        assert_eq!(parse_id("seven"), None);
        assert_eq!(parse_id("4.2"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn test_parse_height() {
        assert_eq!(parse_height(""), Ok(None));
        assert_eq!(parse_height("  "), Ok(None));
        assert_eq!(parse_height("172.5"), Ok(Some(172.5)));
        assert!(parse_height("0").is_err());
        assert!(parse_height("301").is_err());
        assert!(parse_height("tall").is_err());
    }

    #[test]
    fn test_menu_lists_every_option() {
        for n in 1..=7 {
            assert!(MENU.contains(&format!("{})", n)));
        }
    }
}

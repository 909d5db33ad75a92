use rosterdb::config;
use rosterdb::core::db::{ConnectionParams, Session};
use rosterdb::menu;
use rosterdb::roster::Roster;
use std::time::Duration;
use tracing::info;

const USAGE: &str = "Usage: rosterdb [OPTIONS] [DATABASE]

A console student roster manager.

Arguments:
  DATABASE       Database file path, or :memory: for a throwaway session

Options:
      --demo     Seed an empty roster with sample students
  -h, --help     Print this help";

fn main() {
    // Initialize the logging system using tracing subscriber
    tracing_subscriber::fmt::init();

    info!("Starting rosterdb...");

    let mut demo = false;
    let mut path_arg: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--demo" => demo = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            other => path_arg = Some(other.to_string()),
        }
    }

    let config = config::load_config();
    let params = match path_arg.as_deref() {
        Some(":memory:") => ConnectionParams::in_memory(),
        Some(path) => ConnectionParams::new(path),
        None => match config.database.path.clone().or_else(config::default_database_path) {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Cannot create {}: {}", parent.display(), e);
                        std::process::exit(1);
                    }
                }
                ConnectionParams::new(path)
            }
            // No per-user data directory on this platform
            None => ConnectionParams::in_memory(),
        },
    };
    let params = params.with_busy_timeout(Duration::from_millis(config.database.busy_timeout_ms));

    let mut session = Session::new(params);
    if !session.connect() {
        eprintln!(
            "Failed to open the database at {}.",
            session.params().location()
        );
        std::process::exit(1);
    }

    let mut roster = Roster::new(session);
    if !roster.ensure_schema() {
        eprintln!("Failed to prepare the students table.");
        roster.close();
        std::process::exit(1);
    }
    if demo {
        let seeded = roster.seed_demo();
        if seeded > 0 {
            println!("Seeded {} sample student(s).", seeded);
        }
    }

    if let Err(e) = menu::run_menu(&mut roster, &config) {
        eprintln!("Error: {}", e);
        roster.close();
        std::process::exit(1);
    }
    roster.close();
}

//! `orgchart` entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database.
//! - Run the interactive shell on stdin/stdout, then close the connection.

mod args;
mod config;
mod outcome;
mod prompt;
mod shell;
mod table;

use args::Cli;
use clap::Parser;
use log::{error, info};
use orgchart_core::db::open_db;
use orgchart_core::{init_logging, OrgService, SqliteOrgRepository};
use shell::Shell;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match config::resolve(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=app_start module=cli version={}",
        orgchart_core::core_version()
    );

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Failed to connect to the database: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("Connected to the database.");

    let session = run_shell(&conn);

    let mut code = ExitCode::SUCCESS;
    if let Err(err) = session {
        error!("event=shell_exit module=cli status=error error={err}");
        eprintln!("Unexpected error: {err}");
        code = ExitCode::FAILURE;
    }

    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=cli status=ok");
            println!("Disconnected from the database.");
        }
        Err((_, err)) => {
            error!("event=db_close module=cli status=error error={err}");
            eprintln!("Error during disconnection: {err}");
            code = ExitCode::FAILURE;
        }
    }
    code
}

fn run_shell(conn: &rusqlite::Connection) -> Result<(), Box<dyn std::error::Error>> {
    let service = OrgService::new(SqliteOrgRepository::try_new(conn)?);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&service, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

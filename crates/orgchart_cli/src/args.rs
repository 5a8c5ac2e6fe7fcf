use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage departments, roles and employees from an interactive menu",
    long_about = "Connects to the organization database and offers a numbered menu for viewing \
                  and editing departments, roles, employees and reporting lines."
)]
pub struct Cli {
    #[arg(
        long,
        env = "ORGCHART_DB",
        value_name = "PATH",
        help = "SQLite database file (created when missing)"
    )]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        env = "ORGCHART_LOG_LEVEL",
        value_name = "LEVEL",
        help = "Log level: trace, debug, info, warn or error"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "ORGCHART_LOG_DIR",
        value_name = "DIR",
        help = "Directory for rotated log files"
    )]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_are_optional() {
        assert!(Cli::try_parse_from(["orgchart"]).is_ok());

        let cli_with_flags = Cli::try_parse_from([
            "orgchart",
            "--db",
            "data/org.sqlite3",
            "--log-level",
            "warn",
            "--log-dir",
            "/tmp/orgchart-logs",
        ])
        .unwrap();

        assert_eq!(cli_with_flags.db, Some(PathBuf::from("data/org.sqlite3")));
        assert_eq!(cli_with_flags.log_level.as_deref(), Some("warn"));
        assert_eq!(
            cli_with_flags.log_dir,
            Some(PathBuf::from("/tmp/orgchart-logs"))
        );
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["orgchart", "--port", "5432"]).is_err());
    }
}

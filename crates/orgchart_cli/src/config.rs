//! Runtime configuration resolved from flags, environment and platform dirs.

use crate::args::Cli;
use directories::ProjectDirs;
use orgchart_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "orgchart.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    CurrentDir(io::Error),
    /// No platform data directory and no explicit path for `what`.
    NoDataDir { what: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentDir(err) => write!(f, "cannot determine current directory: {err}"),
            Self::NoDataDir { what } => write!(
                f,
                "no platform data directory available; pass the {what} path explicitly"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            Self::NoDataDir { .. } => None,
        }
    }
}

/// Platform data directory for the application, if the OS reports one.
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn resolve(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    resolve_with(cli, &cwd, data_dir().as_deref())
}

/// Resolves every path to an absolute one against `cwd` and `data_dir`.
pub fn resolve_with(
    cli: &Cli,
    cwd: &Path,
    data_dir: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let db_path = match &cli.db {
        Some(path) => absolutize(cwd, path),
        None => data_dir
            .map(|dir| dir.join(DB_FILE_NAME))
            .ok_or(ConfigError::NoDataDir { what: "--db" })?,
    };
    let log_dir = match &cli.log_dir {
        Some(path) => absolutize(cwd, path),
        None => data_dir
            .map(|dir| dir.join(LOG_DIR_NAME))
            .ok_or(ConfigError::NoDataDir { what: "--log-dir" })?,
    };
    let log_level = cli
        .log_level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(default_log_level())
        .to_string();

    Ok(AppConfig {
        db_path,
        log_level,
        log_dir,
    })
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_with, ConfigError};
    use crate::args::Cli;
    use orgchart_core::default_log_level;
    use std::path::PathBuf;

    fn cli(db: Option<&str>, log_level: Option<&str>, log_dir: Option<&str>) -> Cli {
        Cli {
            db: db.map(PathBuf::from),
            log_level: log_level.map(str::to_string),
            log_dir: log_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn defaults_come_from_data_dir() {
        let data = tempfile::tempdir().unwrap();
        let config = resolve_with(&cli(None, None, None), data.path(), Some(data.path())).unwrap();

        assert_eq!(config.db_path, data.path().join("orgchart.sqlite3"));
        assert_eq!(config.log_dir, data.path().join("logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let config = resolve_with(
            &cli(Some("org.db"), Some(" warn "), Some("var/logs")),
            cwd.path(),
            None,
        )
        .unwrap();

        assert_eq!(config.db_path, cwd.path().join("org.db"));
        assert_eq!(config.log_dir, cwd.path().join("var/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let cwd = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let db = elsewhere.path().join("org.db");

        let config = resolve_with(
            &cli(db.to_str(), None, elsewhere.path().to_str()),
            cwd.path(),
            None,
        )
        .unwrap();
        assert_eq!(config.db_path, db);
        assert_eq!(config.log_dir, elsewhere.path());
    }

    #[test]
    fn missing_data_dir_requires_explicit_paths() {
        let cwd = tempfile::tempdir().unwrap();
        let err = resolve_with(&cli(None, None, Some("logs")), cwd.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDir { what: "--db" }));
    }
}

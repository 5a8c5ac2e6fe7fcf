//! What one menu action produced, and how it is shown to the operator.

use crate::table::Table;
use colored::Colorize;
use orgchart_core::ServiceError;
use std::io::{self, Write};

#[derive(Debug)]
pub enum Outcome {
    Listing(Table),
    Done(String),
    /// The action was declined before any input was collected.
    Refused(String),
    Failed(String),
    /// Input ran out mid-action.
    Cancelled,
}

impl Outcome {
    /// Maps a service error to a refusal or a failure prefixed with `context`.
    pub fn failure(context: &str, err: &ServiceError) -> Self {
        if err.is_precondition() {
            return Self::Refused(refusal_message(err));
        }
        Self::Failed(format!("Error {context}: {err}"))
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Listing(table) => write!(out, "{}", table.render()),
            Self::Done(message) => writeln!(out, "{}", message.green()),
            Self::Refused(message) => writeln!(out, "{}", message.yellow()),
            Self::Failed(message) => writeln!(out, "{}", message.red()),
            Self::Cancelled => Ok(()),
        }
    }
}

fn refusal_message(err: &ServiceError) -> String {
    match err {
        ServiceError::NoRolesAvailable => "No roles available. Please add a role first.".to_string(),
        other => other.to_string(),
    }
}

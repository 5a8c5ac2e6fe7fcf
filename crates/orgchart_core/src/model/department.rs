//! Department record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned department identity.
pub type DepartmentId = i64;

/// Organizational unit grouping roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

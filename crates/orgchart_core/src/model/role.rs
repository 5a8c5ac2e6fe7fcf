//! Role record, its listing projection and the `Salary` value type.
//!
//! # Invariants
//! - `Salary` is never negative and carries at most two fractional digits.
//! - A role always references an existing department.

use super::department::DepartmentId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Store-assigned role identity.
pub type RoleId = i64;

/// Job title with a salary, owned by one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub salary: Salary,
    pub department_id: DepartmentId,
}

/// Validated input for inserting a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub title: String,
    pub salary: Salary,
    pub department_id: DepartmentId,
}

/// Role joined with its department name, as shown in the roles view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleListing {
    pub id: RoleId,
    pub title: String,
    pub salary: Salary,
    pub department: String,
}

/// Non-negative money amount kept in minor units (cents).
///
/// Serialized as the integer number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Salary(i64);

impl Salary {
    pub const ZERO: Salary = Salary(0);

    /// Builds a salary from whole currency units.
    pub fn from_whole(units: u32) -> Self {
        Self(i64::from(units) * 100)
    }

    /// Builds a salary from minor units, rejecting negatives.
    pub fn from_cents(cents: i64) -> Result<Self, SalaryParseError> {
        if cents < 0 {
            return Err(SalaryParseError::Negative);
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Salary {
    type Error = SalaryParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_cents(value)
    }
}

impl From<Salary> for i64 {
    fn from(value: Salary) -> Self {
        value.0
    }
}

impl Display for Salary {
    /// Whole amounts print without decimals (`80000`), others with two (`80000.50`).
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{fraction:02}")
        }
    }
}

impl FromStr for Salary {
    type Err = SalaryParseError;

    /// Accepts `80000`, `80000.5`, `80,000.50` and `80_000`.
    ///
    /// `,` and `_` are only valid between groups of three whole digits.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SalaryParseError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(SalaryParseError::Negative);
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let malformed = || SalaryParseError::Malformed(trimmed.to_string());

        let (grouped_whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let whole = ungroup_digits(grouped_whole).ok_or_else(malformed)?;
        let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole.as_str()) || !all_digits(fraction)
        {
            return Err(malformed());
        }
        if fraction.len() > 2 {
            return Err(SalaryParseError::TooPrecise);
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| SalaryParseError::TooLarge)?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| SalaryParseError::TooLarge)? * 10,
            _ => fraction.parse().map_err(|_| SalaryParseError::TooLarge)?,
        };

        whole_units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Salary)
            .ok_or(SalaryParseError::TooLarge)
    }
}

/// Drops thousands separators, or `None` when they are misplaced.
fn ungroup_digits(whole: &str) -> Option<String> {
    let separator = match (whole.contains(','), whole.contains('_')) {
        (false, false) => return Some(whole.to_string()),
        (true, true) => return None,
        (true, false) => ',',
        (false, true) => '_',
    };

    let mut groups = whole.split(separator);
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Why a salary value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryParseError {
    Empty,
    Negative,
    TooPrecise,
    TooLarge,
    Malformed(String),
}

impl Display for SalaryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "salary must not be empty"),
            Self::Negative => write!(f, "salary must not be negative"),
            Self::TooPrecise => write!(f, "salary supports at most two decimal places"),
            Self::TooLarge => write!(f, "salary is too large"),
            Self::Malformed(value) => write!(f, "`{value}` is not a valid salary"),
        }
    }
}

impl Error for SalaryParseError {}

//! Use-case services driven by the interaction shell.
//!
//! # Responsibility
//! - Turn each operator action into validated repository calls.
//! - Keep the shell unaware of SQL and store details.

pub mod org_service;

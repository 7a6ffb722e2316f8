//! Per-table query functions.

pub mod catalog;
pub mod plans;
pub mod profile;
pub mod sessions;
pub mod set_logs;
pub mod users;

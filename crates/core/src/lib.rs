//! Domain logic shared by the CodeProgress database and API crates.
//!
//! Everything in this crate is pure and synchronous: validation rules,
//! the in-memory project filter, and the calendar-grid derivation. No I/O
//! happens here, which keeps all of it unit-testable without a database.

pub mod calendar;
pub mod error;
pub mod progress;
pub mod project;
pub mod types;

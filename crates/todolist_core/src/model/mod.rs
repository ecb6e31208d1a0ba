//! Domain model for projects and their tasks.
//!
//! # Responsibility
//! - Define the records owned by the state store and persisted as one blob.
//! - Keep the persisted field names compatible with existing stored data.
//!
//! # Invariants
//! - A `Project` exclusively owns its ordered task sequence.
//! - Identifiers are integers; uniqueness is maintained by the store, not
//!   by the records themselves.

pub mod project;
pub mod task;

//! Repository layer: key-value access and the project blob adapter.
//!
//! # Responsibility
//! - Define the key-value contract the persisted state is written through.
//! - Isolate SQLite details from the state store.
//!
//! # Invariants
//! - Writes overwrite the stored value wholesale; there are no partial
//!   updates.

pub mod kv_repo;
pub mod projects_repo;

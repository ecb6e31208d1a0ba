//! State store and interaction services.
//!
//! # Responsibility
//! - Own the in-memory project tree and persist it after every mutation.
//! - Gate user input before it reaches the store.
//!
//! # See also
//! - `crate::view` for the read-only projections rendered after each action.

pub mod session;
pub mod store;

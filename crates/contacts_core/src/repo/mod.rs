//! Contact store contract and its SQLite implementation.
//!
//! # Invariants
//! - Store APIs report unknown ids as `RepoError::NotFound` on writes and
//!   `Ok(None)` on reads.

pub mod contact_repo;

//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record used by store, service and views.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is a hard delete; there are no tombstones or history rows.

pub mod contact;

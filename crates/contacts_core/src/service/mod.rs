//! Contact use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into page-level use-cases.
//! - Keep the HTTP layer decoupled from storage details.

pub mod contact_service;

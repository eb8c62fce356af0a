//! Framework-free interaction contracts behind the rendered pages.
//!
//! # Responsibility
//! - Model the optimistic favorite toggle, the search submission flow and
//!   the delete confirmation as plain state machines.
//! - Share page locations between the router and these flows.
//!
//! The HTML renderer draws from these types, and the inline page script
//! applies the same rules in the browser.

pub mod confirm;
pub mod favorite;
pub mod routes;
pub mod search;

//! Edit-session workflow for the lexicat terminology catalog
//!
//! This crate owns the problem-resolution workflow that gates article
//! updates:
//! - [`ledger`]: operations over an article's problem list
//! - [`session`]: the edit-session aggregate, a state machine over a
//!   working copy of one article plus its problems
//! - [`capability`]: the injected auth capability the aggregate consults
//!   for owner-only actions

pub mod capability;
pub mod ledger;
pub mod session;

pub use capability::{CurrentUser, Session, SessionSnapshot};
pub use session::{CommitError, EditError, EditSession, SessionState};

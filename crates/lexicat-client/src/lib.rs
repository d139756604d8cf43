//! Async REST client for the lexicat catalog backend
//!
//! JSON over HTTPS against a conventional REST API. The backend is an
//! external collaborator: this crate implements only the consuming side —
//! article repository, term vocabulary, problem reporting, and the auth
//! endpoints — plus the commit driver that serializes article updates per
//! edit session.
//!
//! Every request carries the bearer access token when one is held; a `401`
//! triggers one token refresh and one retry before the failure surfaces.

pub mod articles;
pub mod client;
pub mod commit;
pub mod error;

pub use articles::ArticleFilter;
pub use client::ApiClient;
pub use commit::{commit_session, CommitFailure, UpdateArticles};
pub use error::ApiError;

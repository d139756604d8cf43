//! Domain types for the lexicat terminology catalog
//!
//! This crate provides the canonical models for catalog records and the
//! pure validation layer applied to them:
//! - Article: a record describing a term's usage in a source publication
//! - Problem: a reported data-quality defect against an Article
//! - Script classification (Cyrillic vs Latin) keyed by the record language
//! - Identifier grammar (DOI and 6-letter short codes)

pub mod article;
pub mod problem;
pub mod validation;

pub use article::*;
pub use problem::*;
pub use validation::*;

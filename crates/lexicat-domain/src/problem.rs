//! Reported data-quality problems.

use serde::{Deserialize, Serialize};

/// A data-quality defect reported against an article.
///
/// The text is fixed at creation; `is_solved` is the only mutable field and
/// flips only through the owner's resolution workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub text: String,
    pub is_solved: bool,
}

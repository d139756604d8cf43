//! Operations over an article's problem ledger.
//!
//! The ledger has no identity of its own; it is the `problems` list carried
//! by an article detail and is always fetched together with it. Mutation is
//! gated by the owning edit session (see [`crate::session`]), which calls
//! [`toggle`] only while in edit mode.

use lexicat_domain::Problem;

/// True iff every problem is resolved. Vacuously true for an empty ledger.
pub fn all_resolved(problems: &[Problem]) -> bool {
    problems.iter().all(|p| p.is_solved)
}

/// True iff at least one problem is resolved.
pub fn any_resolved(problems: &[Problem]) -> bool {
    problems.iter().any(|p| p.is_solved)
}

/// Whether the "fix errors" entry point is offered at all: there must be
/// something to fix.
pub fn has_open_problems(problems: &[Problem]) -> bool {
    !problems.is_empty() && !all_resolved(problems)
}

/// Flip the resolved state of the problem with the given id, if present.
pub fn toggle(problems: &mut [Problem], problem_id: i64) {
    if let Some(problem) = problems.iter_mut().find(|p| p.id == problem_id) {
        problem.is_solved = !problem.is_solved;
    }
}

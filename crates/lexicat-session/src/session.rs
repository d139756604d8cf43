//! The edit-session aggregate.
//!
//! One aggregate owns the working copy of one article plus its problem
//! ledger for the duration of an edit interaction. While `Viewing`, the
//! working copy tracks the last-fetched server copy; while `Editing`, it
//! may diverge until commit or discard. Nothing here is persisted —
//! dropping the aggregate discards partial edits.

use lexicat_domain::{
    normalize_url, validate_article, Article, ArticleDetail, ArticleUpdate, FieldVerdicts, Problem,
};
use thiserror::Error;

use crate::capability::Session;
use crate::ledger;

/// Aggregate state. `Viewing` is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing,
}

/// Why `begin_edit` was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("only the article owner may fix problems")]
    NotOwner,
    #[error("no unresolved problems to fix")]
    NothingToFix,
    #[error("already in edit mode")]
    AlreadyEditing,
}

/// Why `begin_commit` was rejected. Unresolved problems and field
/// validation are reported separately so the caller can surface distinct
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("not in edit mode")]
    NotEditing,
    #[error("unresolved problems remain")]
    UnresolvedProblems,
    #[error("field validation failed: {}", fields.join(", "))]
    InvalidFields { fields: Vec<String> },
    #[error("a commit is already in flight")]
    CommitInFlight,
}

/// Working copy of one article and its problem ledger, plus the injected
/// auth capability used to gate owner-only actions.
#[derive(Debug, Clone)]
pub struct EditSession<S: Session> {
    auth: S,
    server: ArticleDetail,
    working: ArticleDetail,
    state: SessionState,
    commit_in_flight: bool,
}

impl<S: Session> EditSession<S> {
    /// Build an aggregate around a freshly fetched article detail.
    pub fn new(detail: ArticleDetail, auth: S) -> Self {
        Self {
            server: detail.clone(),
            working: detail,
            auth,
            state: SessionState::Viewing,
            commit_in_flight: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == SessionState::Editing
    }

    pub fn commit_in_flight(&self) -> bool {
        self.commit_in_flight
    }

    /// The working copy of the article.
    pub fn article(&self) -> &Article {
        &self.working.article
    }

    /// The working copy of the problem ledger.
    pub fn problems(&self) -> &[Problem] {
        &self.working.problems
    }

    /// Whether the signed-in user owns this article.
    pub fn is_owner(&self) -> bool {
        self.auth
            .current_user()
            .is_some_and(|user| user.id == self.working.user_id)
    }

    /// A non-owning signed-in viewer may report a new problem; the owner
    /// may not report against their own article.
    pub fn can_report_problem(&self) -> bool {
        self.auth.is_authenticated() && !self.is_owner()
    }

    /// Whether the "fix errors" entry point should be offered: owner,
    /// viewing, and an open problem to fix.
    pub fn can_begin_edit(&self) -> bool {
        self.state == SessionState::Viewing
            && self.is_owner()
            && ledger::has_open_problems(&self.working.problems)
    }

    /// `Viewing -> Editing`. Owner-only, and only when the ledger is
    /// non-empty and not already fully resolved.
    pub fn begin_edit(&mut self) -> Result<(), EditError> {
        if !self.auth.is_authenticated() {
            return Err(EditError::NotAuthenticated);
        }
        if !self.is_owner() {
            return Err(EditError::NotOwner);
        }
        if self.state == SessionState::Editing {
            return Err(EditError::AlreadyEditing);
        }
        if !ledger::has_open_problems(&self.working.problems) {
            return Err(EditError::NothingToFix);
        }
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Mutable access to the working article, available only in edit mode.
    pub fn working_mut(&mut self) -> Option<&mut Article> {
        match self.state {
            SessionState::Editing => Some(&mut self.working.article),
            SessionState::Viewing => None,
        }
    }

    /// Replace the source URL from its editable suffix; the stored value
    /// always carries the fixed `https://` prefix.
    pub fn set_url(&mut self, suffix: &str) {
        if let Some(article) = self.working_mut() {
            article.url = normalize_url(suffix);
        }
    }

    /// Flip a problem's resolved state. Outside edit mode this is a strict
    /// no-op.
    pub fn toggle_problem(&mut self, problem_id: i64) {
        if self.state == SessionState::Editing {
            ledger::toggle(&mut self.working.problems, problem_id);
        }
    }

    /// Current verdicts for the validated fields of the working copy.
    pub fn field_verdicts(&self) -> FieldVerdicts {
        validate_article(&self.working.article)
    }

    /// Install a fresh server copy. While `Viewing` this unconditionally
    /// overwrites the working copy; while `Editing` it is ignored so edits
    /// are never clobbered mid-edit.
    pub fn refresh(&mut self, detail: ArticleDetail) {
        if self.state == SessionState::Viewing {
            self.server = detail.clone();
            self.working = detail;
        }
    }

    /// `Editing -> Viewing`, dropping every field and ledger edit made
    /// since `begin_edit`. The working copy reverts to the last-fetched
    /// server state; a subsequent external refresh may replace it again.
    pub fn discard(&mut self) {
        self.working = self.server.clone();
        self.state = SessionState::Viewing;
        self.commit_in_flight = false;
    }

    /// Validate the working copy and, on success, mark a commit in flight
    /// and hand back the update payload (immutable fields stripped by
    /// type). The caller drives the external update and then reports back
    /// via [`complete_commit`](Self::complete_commit) or
    /// [`fail_commit`](Self::fail_commit). A second `begin_commit` while
    /// one is outstanding is rejected — commits are serialized per
    /// aggregate.
    pub fn begin_commit(&mut self) -> Result<ArticleUpdate, CommitError> {
        if self.state != SessionState::Editing {
            return Err(CommitError::NotEditing);
        }
        if self.commit_in_flight {
            return Err(CommitError::CommitInFlight);
        }
        if !ledger::all_resolved(&self.working.problems) {
            return Err(CommitError::UnresolvedProblems);
        }
        let verdicts = self.field_verdicts();
        if !verdicts.all_valid() {
            let fields = verdicts
                .failures()
                .into_iter()
                .map(|(field, _)| field.to_string())
                .collect();
            return Err(CommitError::InvalidFields { fields });
        }
        self.commit_in_flight = true;
        Ok(ArticleUpdate::from(&self.working))
    }

    /// The external update succeeded: install the server response and
    /// return to `Viewing`.
    pub fn complete_commit(&mut self, detail: ArticleDetail) {
        self.server = detail.clone();
        self.working = detail;
        self.state = SessionState::Viewing;
        self.commit_in_flight = false;
    }

    /// The external update failed: stay in `Editing` with the working copy
    /// untouched so the user can retry.
    pub fn fail_commit(&mut self) {
        self.commit_in_flight = false;
    }
}

//! Injected auth capability.
//!
//! The aggregate never reads a process-wide auth store; whoever constructs
//! it passes a capability exposing the signed-in user.

use serde::{Deserialize, Serialize};

/// The signed-in user as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// Read-only view of the authentication state.
pub trait Session {
    fn current_user(&self) -> Option<CurrentUser>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Fixed snapshot of the auth state, taken when the aggregate is built.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    user: Option<CurrentUser>,
}

impl SessionSnapshot {
    pub fn signed_in(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl Session for SessionSnapshot {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}

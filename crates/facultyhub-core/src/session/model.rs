use crate::model::User;
use serde::{Deserialize, Serialize};

/// Client-side record of who, if anyone, is logged in.
///
/// While `loading` is true, `authenticated` is not meaningful and guards
/// must not act on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
}

impl Session {
    /// The state before persisted identity has been read.
    pub fn unresolved() -> Self {
        Self {
            identity: None,
            authenticated: false,
            loading: true,
        }
    }

    pub fn resolved(identity: Option<User>) -> Self {
        Self {
            authenticated: identity.is_some(),
            identity,
            loading: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|u| u.is_admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unresolved()
    }
}

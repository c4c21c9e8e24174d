//! Session boundary
//!
//! Auth lives outside this crate; the editor only consumes the resolved
//! session facts. Mounting the Game Maker requires an admin session.
//! This is a precondition check, not part of the editor's state machine.

/// Resolved session facts handed in by the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Signed-in user id, if any
    pub user: Option<String>,
    pub is_admin: bool,
}

impl Session {
    /// An admin session for the given user
    pub fn admin(user: impl Into<String>) -> Session {
        Session {
            user: Some(user.into()),
            is_admin: true,
        }
    }

    /// A signed-in non-admin session
    pub fn member(user: impl Into<String>) -> Session {
        Session {
            user: Some(user.into()),
            is_admin: false,
        }
    }

    /// An anonymous session
    pub fn guest() -> Session {
        Session {
            user: None,
            is_admin: false,
        }
    }

    /// Check the admin precondition for mounting the editor
    pub fn require_admin(&self) -> Result<(), AccessError> {
        match (&self.user, self.is_admin) {
            (None, _) => Err(AccessError::NotSignedIn),
            (Some(_), false) => Err(AccessError::NotAdmin),
            (Some(_), true) => Ok(()),
        }
    }
}

/// Why a session was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    NotSignedIn,
    NotAdmin,
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::NotSignedIn => write!(f, "not signed in"),
            AccessError::NotAdmin => write!(f, "admin access required"),
        }
    }
}

impl std::error::Error for AccessError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::SceneEditor;
    use crate::world::GameDesign;

    #[test]
    fn test_admin_gate() {
        assert!(Session::admin("u1").require_admin().is_ok());
        assert_eq!(
            Session::member("u2").require_admin(),
            Err(AccessError::NotAdmin)
        );
        assert_eq!(
            Session::guest().require_admin(),
            Err(AccessError::NotSignedIn)
        );
    }

    #[test]
    fn test_editor_refuses_non_admin() {
        let design = GameDesign::new_2d();
        assert!(SceneEditor::open(&Session::member("u"), design.clone()).is_err());
        assert!(SceneEditor::open(&Session::admin("u"), design).is_ok());
    }
}

//! Access gate: an e-mail must exist in the hosted user table before any
//! costing command runs. A successful check is remembered in a local,
//! time-limited session file.

mod directory;
mod email;
mod session;

use thiserror::Error;
use tracing::{info, warn};

use crate::error::{CalcError, Result};

pub use directory::{classify_status, SupabaseDirectory, UserDirectory};
pub use email::{is_valid_email, normalize_email};
pub use session::{SessionRecord, SessionStore};

/// Why an access check failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    #[error("e-mail {0} is not registered; sign up through your interactive action plan")]
    NotFound(String),

    #[error("the user directory refused the query (permission denied)")]
    PermissionDenied,

    #[error("could not reach the user directory: {0}")]
    NetworkUnreachable(String),

    #[error("not a valid e-mail address: {0}")]
    MalformedInput(String),

    #[error("user directory error: {0}")]
    Backend(String),
}

/// Check an e-mail against the directory and open a session for it.
///
/// Returns the normalized e-mail on success.
pub fn authorize(directory: &dyn UserDirectory, store: &SessionStore, raw_email: &str) -> Result<String> {
    let email = normalize_email(raw_email);
    if !is_valid_email(&email) {
        return Err(AccessError::MalformedInput(raw_email.trim().to_string()).into());
    }

    info!("Checking access for {}", email);
    if !directory.lookup(&email)? {
        warn!("{} not found in user directory", email);
        return Err(AccessError::NotFound(email).into());
    }

    store.save_session(&email)?;
    info!("Access granted to {}", email);
    Ok(email)
}

/// The e-mail of the current session, or an error when none is active.
pub fn require_session(store: &SessionStore) -> Result<String> {
    store.get_valid_session().ok_or(CalcError::NotLoggedIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FakeDirectory {
        users: HashSet<String>,
        failure: Option<AccessError>,
    }

    impl UserDirectory for FakeDirectory {
        fn lookup(&self, email: &str) -> std::result::Result<bool, AccessError> {
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(self.users.contains(email)),
            }
        }
    }

    fn directory(users: &[&str]) -> FakeDirectory {
        FakeDirectory {
            users: users.iter().map(|u| u.to_string()).collect(),
            failure: None,
        }
    }

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"), 24);
        (dir, store)
    }

    #[test]
    fn test_authorize_normalizes_and_saves() {
        let (_dir, store) = store();
        let email = authorize(&directory(&["ana@exemplo.com"]), &store, "  Ana@Exemplo.COM ").unwrap();
        assert_eq!(email, "ana@exemplo.com");
        assert_eq!(require_session(&store).unwrap(), "ana@exemplo.com");
    }

    #[test]
    fn test_authorize_unknown_email() {
        let (_dir, store) = store();
        let err = authorize(&directory(&[]), &store, "bia@exemplo.com").unwrap_err();
        assert!(matches!(
            err,
            CalcError::AccessDenied(AccessError::NotFound(ref e)) if e == "bia@exemplo.com"
        ));
        assert!(matches!(require_session(&store), Err(CalcError::NotLoggedIn)));
    }

    #[test]
    fn test_authorize_malformed_email_skips_lookup() {
        let (_dir, store) = store();
        let dir = FakeDirectory {
            users: HashSet::new(),
            failure: Some(AccessError::PermissionDenied),
        };
        let err = authorize(&dir, &store, "sem-arroba").unwrap_err();
        assert!(matches!(
            err,
            CalcError::AccessDenied(AccessError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_authorize_surfaces_directory_failure() {
        let (_dir, store) = store();
        let dir = FakeDirectory {
            users: HashSet::new(),
            failure: Some(AccessError::NetworkUnreachable("timeout".into())),
        };
        let err = authorize(&dir, &store, "ana@exemplo.com").unwrap_err();
        assert!(matches!(
            err,
            CalcError::AccessDenied(AccessError::NetworkUnreachable(_))
        ));
        assert!(store.get_valid_session().is_none());
    }
}

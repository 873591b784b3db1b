use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CalcError, Result};

/// What is persisted for a granted access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// File-backed session with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    ttl_hours: i64,
}

impl SessionStore {
    /// Negative lifetimes count as 0 (every session is already expired).
    pub fn new(path: impl Into<PathBuf>, ttl_hours: i64) -> Self {
        Self {
            path: path.into(),
            ttl_hours: ttl_hours.max(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a session for `email` starting now.
    pub fn save_session(&self, email: &str) -> Result<SessionRecord> {
        self.save_session_at(email, Utc::now())
    }

    /// Open a session starting at `now`. A lifetime too large for a
    /// timestamp is a configuration error.
    pub fn save_session_at(&self, email: &str, now: DateTime<Utc>) -> Result<SessionRecord> {
        let expires_at = Duration::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                CalcError::Config(format!("session lifetime of {} hours is out of range", self.ttl_hours))
            })?;

        let record = SessionRecord {
            email: email.to_string(),
            created_at: now,
            expires_at,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        debug!("Session saved until {}", record.expires_at);
        Ok(record)
    }

    /// The session e-mail if one exists and has not expired.
    pub fn get_valid_session(&self) -> Option<String> {
        self.get_valid_session_at(Utc::now())
    }

    /// Expired or unreadable sessions are removed and reported as absent.
    pub fn get_valid_session_at(&self, now: DateTime<Utc>) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;

        let record: SessionRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("Discarding unreadable session file: {}", e);
                self.discard();
                return None;
            }
        };

        if record.expires_at <= now {
            debug!("Session for {} expired at {}", record.email, record.expires_at);
            self.discard();
            return None;
        }

        Some(record.email)
    }

    fn discard(&self) {
        if let Err(e) = self.clear_session() {
            warn!("Could not remove session file {}: {}", self.path.display(), e);
        }
    }

    /// Remove the session file. Missing files are fine.
    pub fn clear_session(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ttl_hours: i64) -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"), ttl_hours);
        (dir, store)
    }

    #[test]
    fn test_save_then_read() {
        let (_dir, store) = store(24);
        let record = store.save_session("ana@exemplo.com").unwrap();
        assert_eq!(record.expires_at - record.created_at, Duration::hours(24));
        assert_eq!(store.get_valid_session().as_deref(), Some("ana@exemplo.com"));
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let (_dir, store) = store(2);
        let start = Utc::now();
        store.save_session_at("ana@exemplo.com", start).unwrap();

        assert!(store.get_valid_session_at(start + Duration::hours(1)).is_some());
        assert!(store.get_valid_session_at(start + Duration::hours(2)).is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_session_is_cleared() {
        let (_dir, store) = store(24);
        fs::write(store.path(), "not json").unwrap();
        assert!(store.get_valid_session().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_huge_lifetime_is_an_error() {
        let (_dir, far) = store(1_000_000_000_000);
        let result = far.save_session("ana@exemplo.com");
        assert!(matches!(result, Err(CalcError::Config(_))));
        assert!(!far.path().exists());

        let (_dir, overflow) = store(i64::MAX);
        let result = overflow.save_session("ana@exemplo.com");
        assert!(matches!(result, Err(CalcError::Config(_))));
        assert!(overflow.get_valid_session().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = store(24);
        store.clear_session().unwrap();
        store.save_session("ana@exemplo.com").unwrap();
        store.clear_session().unwrap();
        assert!(store.get_valid_session().is_none());
    }
}

use std::collections::HashSet;

use chrono::{Duration, Utc};
use lucro_calc_rs::access::{authorize, require_session, AccessError, SessionStore, UserDirectory};
use lucro_calc_rs::CalcError;

struct MemoryDirectory(HashSet<&'static str>);

impl UserDirectory for MemoryDirectory {
    fn lookup(&self, email: &str) -> Result<bool, AccessError> {
        Ok(self.0.contains(email))
    }
}

struct OfflineDirectory;

impl UserDirectory for OfflineDirectory {
    fn lookup(&self, _email: &str) -> Result<bool, AccessError> {
        Err(AccessError::NetworkUnreachable("connection refused".to_string()))
    }
}

fn store(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"), 24)
}

#[test]
fn test_login_then_session_is_required() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);
    let directory = MemoryDirectory(HashSet::from(["ana@doces.com"]));

    assert!(matches!(require_session(&store), Err(CalcError::NotLoggedIn)));

    let email = authorize(&directory, &store, "  Ana@Doces.com ").unwrap();
    assert_eq!(email, "ana@doces.com");
    assert_eq!(require_session(&store).unwrap(), "ana@doces.com");

    store.clear_session().unwrap();
    assert!(matches!(require_session(&store), Err(CalcError::NotLoggedIn)));
}

#[test]
fn test_rejections_leave_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);
    let directory = MemoryDirectory(HashSet::from(["ana@doces.com"]));

    let unknown = authorize(&directory, &store, "bia@doces.com");
    assert!(matches!(
        unknown,
        Err(CalcError::AccessDenied(AccessError::NotFound(_)))
    ));

    let malformed = authorize(&directory, &store, "not-an-email");
    assert!(matches!(
        malformed,
        Err(CalcError::AccessDenied(AccessError::MalformedInput(_)))
    ));

    let offline = authorize(&OfflineDirectory, &store, "ana@doces.com");
    assert!(matches!(
        offline,
        Err(CalcError::AccessDenied(AccessError::NetworkUnreachable(_)))
    ));

    assert!(store.get_valid_session().is_none());
}

#[test]
fn test_session_expires() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let opened = Utc::now() - Duration::hours(25);
    store.save_session_at("ana@doces.com", opened).unwrap();

    assert!(store.get_valid_session().is_none());
    assert!(!store.path().exists());
}

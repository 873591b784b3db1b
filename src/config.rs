use std::env;
use std::path::PathBuf;

use crate::access::{SessionStore, SupabaseDirectory};
use crate::error::{CalcError, Result};

pub const DEFAULT_USERS_TABLE: &str = "users_hub";
pub const DEFAULT_SESSION_FILE: &str = ".lucro_session.json";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub users_table: String,
    pub session_file: PathBuf,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let session_ttl_hours = match get("LUCRO_SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
                .ok_or_else(|| {
                    CalcError::Config(format!(
                        "LUCRO_SESSION_TTL_HOURS must be between 1 and {}, got '{}'",
                        MAX_SESSION_TTL_HOURS, raw
                    ))
                })?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };

        Ok(Self {
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            users_table: get("LUCRO_USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
            session_file: get("LUCRO_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            session_ttl_hours,
        })
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.session_file, self.session_ttl_hours)
    }

    /// The hosted user directory. Needs both Supabase settings.
    pub fn directory(&self) -> Result<SupabaseDirectory> {
        let (Some(url), Some(key)) = (&self.supabase_url, &self.supabase_anon_key) else {
            return Err(CalcError::Config(
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set to log in".to_string(),
            ));
        };
        Ok(SupabaseDirectory::new(url, key, &self.users_table)?)
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::access::AccessError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks up whether an e-mail belongs to a registered user.
pub trait UserDirectory {
    /// `email` is already normalized. `Ok(false)` means "not registered".
    fn lookup(&self, email: &str) -> Result<bool, AccessError>;
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Map a failed PostgREST response to an access error.
pub fn classify_status(status: u16, code: Option<&str>, message: Option<&str>) -> AccessError {
    match (status, code) {
        (_, Some("42501")) | (_, Some("PGRST301")) | (401, _) | (403, _) => {
            AccessError::PermissionDenied
        }
        _ => AccessError::Backend(
            message
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status)),
        ),
    }
}

fn classify_transport(err: reqwest::Error) -> AccessError {
    if err.is_connect() || err.is_timeout() {
        AccessError::NetworkUnreachable(err.to_string())
    } else {
        AccessError::Backend(err.to_string())
    }
}

/// User table hosted on Supabase, queried through its REST endpoint.
pub struct SupabaseDirectory {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseDirectory {
    pub fn new(base_url: &str, anon_key: &str, table: &str) -> Result<Self, AccessError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AccessError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: table.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

impl UserDirectory for SupabaseDirectory {
    fn lookup(&self, email: &str) -> Result<bool, AccessError> {
        let filter = format!("eq.{}", email);
        debug!("Querying {} for {}", self.endpoint(), email);

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("select", "email"), ("email", filter.as_str())])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .map_err(classify_transport)?;

        let status = response.status();
        if status.is_success() {
            let rows: Vec<serde_json::Value> = response
                .json()
                .map_err(|e| AccessError::Backend(e.to_string()))?;
            return Ok(!rows.is_empty());
        }

        let body: PostgrestError = response.json().unwrap_or_default();
        debug!("Directory answered {}: {:?}", status, body);
        Err(classify_status(
            status.as_u16(),
            body.code.as_deref(),
            body.message.as_deref(),
        ))
    }
}

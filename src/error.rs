use thiserror::Error;

use crate::access::AccessError;
use crate::models::RowId;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Coverage not found: {0}")]
    CoverageNotFound(String),

    #[error("No row with id {0}")]
    RowNotFound(RowId),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessError),

    #[error("No active session. Run 'lucro login <email>' first.")]
    NotLoggedIn,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;

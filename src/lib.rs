pub mod access;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod state;

pub use catalog::Catalog;
pub use error::{CalcError, Result};
pub use models::{Calculation, Coverage, MarginTier, PriceMode, Recipe};
pub use state::CalculationManager;

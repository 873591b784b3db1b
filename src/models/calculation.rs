use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{ExtraRow, IngredientRow};
use crate::pricing::constants::{
    DEFAULT_COVERAGE_WEIGHT, PREMIUM_MULTIPLIER, PRO_MULTIPLIER, REFERENCE_BATCH_WEIGHT,
    STARTER_MULTIPLIER,
};

/// Preset sale-price multipliers over total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarginTier {
    Iniciante,
    Pro,
    Premium,
}

impl MarginTier {
    pub const ALL: [MarginTier; 3] = [MarginTier::Iniciante, MarginTier::Pro, MarginTier::Premium];

    pub fn multiplier(self) -> f64 {
        match self {
            MarginTier::Iniciante => STARTER_MULTIPLIER,
            MarginTier::Pro => PRO_MULTIPLIER,
            MarginTier::Premium => PREMIUM_MULTIPLIER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarginTier::Iniciante => "Iniciante",
            MarginTier::Pro => "Pro",
            MarginTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for MarginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}x)", self.label(), self.multiplier())
    }
}

/// How the sale price is derived. A tier and a custom price never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum PriceMode {
    #[default]
    Unset,
    Tier(MarginTier),
    Custom(f64),
}

/// The whole live calculation. Serialized between CLI invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub recipe_id: Option<String>,

    #[serde(default = "reference_batch_weight")]
    pub target_weight: f64,

    #[serde(default)]
    pub ingredients: Vec<IngredientRow>,

    #[serde(default)]
    pub coverage_id: Option<String>,

    #[serde(default = "default_coverage_weight")]
    pub coverage_weight: f64,

    #[serde(default)]
    pub coverage_ingredients: Vec<IngredientRow>,

    #[serde(default)]
    pub extras: Vec<ExtraRow>,

    #[serde(default)]
    pub price_mode: PriceMode,

    /// Next row id to hand out. Survives resets.
    #[serde(default = "first_row_id")]
    pub next_row_id: u64,
}

fn first_row_id() -> u64 {
    1
}

fn reference_batch_weight() -> f64 {
    REFERENCE_BATCH_WEIGHT
}

fn default_coverage_weight() -> f64 {
    DEFAULT_COVERAGE_WEIGHT
}

impl Default for Calculation {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            recipe_id: None,
            target_weight: REFERENCE_BATCH_WEIGHT,
            ingredients: Vec::new(),
            coverage_id: None,
            coverage_weight: DEFAULT_COVERAGE_WEIGHT,
            coverage_ingredients: Vec::new(),
            extras: Vec::new(),
            price_mode: PriceMode::Unset,
            next_row_id: first_row_id(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A catalog ingredient before the user prices it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseIngredient {
    pub name: String,
    pub quantity: f64,
    pub package_weight: f64,
}

/// A cake formula defined at `base_weight` grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub base_weight: f64,
    pub ingredients: Vec<BaseIngredient>,

    /// Preparation remark carried over from the catalog.
    #[serde(default)]
    pub note: Option<String>,
}

/// A topping or frosting formula with its own catalog yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub id: String,
    pub name: String,
    pub suggested_quantity: f64,

    /// Catalog yield in grams.
    pub package_weight: f64,
    pub ingredients: Vec<BaseIngredient>,
}

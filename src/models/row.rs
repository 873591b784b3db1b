use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pricing::costing::{ingredient_cost, scale_quantity};

/// Opaque identifier for an editable row. Never reused within one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A costed ingredient line, used for both the cake and the coverage lists.
///
/// `cost` is derived from quantity, package price and package weight and is
/// refreshed by every setter and on deserialization, so it is never stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredIngredientRow")]
pub struct IngredientRow {
    pub id: RowId,
    pub name: String,
    quantity: f64,
    package_price: f64,
    package_weight: f64,
    cost: f64,

    /// Catalog quantity this row was created from; `None` for manual rows.
    base_quantity: Option<f64>,
}

/// On-disk shape of an [`IngredientRow`]. The stored cost is ignored.
#[derive(Deserialize)]
struct StoredIngredientRow {
    id: RowId,
    name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    package_price: f64,
    #[serde(default)]
    package_weight: f64,
    #[serde(default)]
    base_quantity: Option<f64>,
}

impl From<StoredIngredientRow> for IngredientRow {
    fn from(stored: StoredIngredientRow) -> Self {
        let mut row = Self::new(stored.id, stored.name, stored.quantity, stored.package_weight);
        row.base_quantity = stored.base_quantity.map(|q| q.max(0.0));
        row.set_package_price(stored.package_price);
        row
    }
}

impl IngredientRow {
    /// A manual row with no catalog source and no price yet.
    pub fn new(id: RowId, name: impl Into<String>, quantity: f64, package_weight: f64) -> Self {
        let mut row = Self {
            id,
            name: name.into(),
            quantity: quantity.max(0.0),
            package_price: 0.0,
            package_weight: package_weight.max(0.0),
            cost: 0.0,
            base_quantity: None,
        };
        row.refresh_cost();
        row
    }

    /// A row that follows the scaling of its catalog source.
    pub fn from_catalog(
        id: RowId,
        name: impl Into<String>,
        base_quantity: f64,
        package_weight: f64,
    ) -> Self {
        let mut row = Self::new(id, name, base_quantity, package_weight);
        row.base_quantity = Some(base_quantity);
        row
    }

    /// Grams used (egg rows too; the egg rule converts at cost time).
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn package_price(&self) -> f64 {
        self.package_price
    }

    /// Package size in grams, or an egg count for egg rows.
    pub fn package_weight(&self) -> f64 {
        self.package_weight
    }

    /// Cost of the quantity used, always in step with the other fields.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Catalog quantity the row rescales from, if any.
    pub fn base_quantity(&self) -> Option<f64> {
        self.base_quantity
    }

    /// Whether the name marks this row as eggs (package weight counts eggs).
    pub fn is_egg(&self) -> bool {
        self.name.to_lowercase().contains("ovo")
    }

    /// Rename the row. Does not detach it from its catalog quantity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        // The egg rule depends on the name.
        self.refresh_cost();
    }

    /// Negative values clamp to 0. Same for the price and weight setters.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity.max(0.0);
        self.refresh_cost();
    }

    pub fn set_package_price(&mut self, price: f64) {
        self.package_price = price.max(0.0);
        self.refresh_cost();
    }

    pub fn set_package_weight(&mut self, weight: f64) {
        self.package_weight = weight.max(0.0);
        self.refresh_cost();
    }

    /// Rescale from the catalog quantity. Manual rows are left untouched.
    pub fn rescale(&mut self, ratio: f64) {
        if let Some(base) = self.base_quantity {
            self.set_quantity(scale_quantity(base, ratio));
        }
    }

    fn refresh_cost(&mut self) {
        self.cost = ingredient_cost(
            &self.name,
            self.quantity,
            self.package_price,
            self.package_weight,
        );
    }
}

/// A miscellaneous cost line such as packaging or decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredExtraRow")]
pub struct ExtraRow {
    pub id: RowId,
    pub item: String,
    quantity: u32,
    unit_price: f64,
    cost: f64,
}

/// On-disk shape of an [`ExtraRow`]. The stored cost is ignored.
#[derive(Deserialize)]
struct StoredExtraRow {
    id: RowId,
    item: String,
    #[serde(default = "one")]
    quantity: i64,
    #[serde(default)]
    unit_price: f64,
}

fn one() -> i64 {
    1
}

impl From<StoredExtraRow> for ExtraRow {
    fn from(stored: StoredExtraRow) -> Self {
        let mut extra = Self::new(stored.id, stored.item);
        extra.set_quantity(u32::try_from(stored.quantity.max(1)).unwrap_or(u32::MAX));
        extra.set_unit_price(stored.unit_price);
        extra
    }
}

impl ExtraRow {
    /// One unit at price 0.
    pub fn new(id: RowId, item: impl Into<String>) -> Self {
        Self {
            id,
            item: item.into(),
            quantity: 1,
            unit_price: 0.0,
            cost: 0.0,
        }
    }

    /// Always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Quantity times unit price.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Quantities below 1 are coerced to 1.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.refresh_cost();
    }

    /// Negative prices clamp to 0.
    pub fn set_unit_price(&mut self, price: f64) {
        self.unit_price = price.max(0.0);
        self.refresh_cost();
    }

    fn refresh_cost(&mut self) {
        self.cost = self.quantity as f64 * self.unit_price;
    }
}

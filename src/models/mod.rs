mod calculation;
mod recipe;
mod row;

pub use calculation::{Calculation, MarginTier, PriceMode};
pub use recipe::{BaseIngredient, Coverage, Recipe};
pub use row::{ExtraRow, IngredientRow, RowId};

mod manager;
mod persistence;

pub use manager::{CalculationManager, ExtraEdit, IngredientEdit};
pub use persistence::{load_calculation, load_or_default, save_calculation};

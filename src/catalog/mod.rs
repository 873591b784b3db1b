//! The bundled recipe and coverage catalog, and the routines that turn its
//! free-text lines into structured, costable ingredients.

pub mod convert;
pub mod data;
pub mod package;
pub mod parser;

pub use convert::{convert_coverages, convert_recipes, parse_yield, Catalog};
pub use data::CatalogData;
pub use package::default_package_weight;
pub use parser::{parse_ingredient, process_ingredient, ParsedIngredient};

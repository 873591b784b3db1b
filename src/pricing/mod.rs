pub mod constants;
pub mod costing;
pub mod currency;

pub use constants::*;
pub use costing::{
    coverage_scale_ratio, ingredient_cost, quote, recipe_scale_ratio, scale_quantity, Quote,
};
pub use currency::{
    format_currency, format_number_input, format_price_input, parse_count, parse_currency,
    parse_extra_quantity,
};

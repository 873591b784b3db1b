use serde::Serialize;

use crate::models::{Calculation, IngredientRow, PriceMode};
use crate::pricing::constants::EGG_GRAMS;

/// Cost of using `quantity` grams of an ingredient bought in packages.
///
/// Eggs (any name containing "ovo") are priced per dozen-style package: the
/// package weight is a count of eggs of `EGG_GRAMS` each.
pub fn ingredient_cost(name: &str, quantity: f64, package_price: f64, package_weight: f64) -> f64 {
    if package_weight == 0.0 {
        return 0.0;
    }

    if name.to_lowercase().contains("ovo") {
        let package_grams = package_weight * EGG_GRAMS;
        (quantity / package_grams) * package_price
    } else {
        (package_price / package_weight) * quantity
    }
}

/// Scale a catalog quantity, rounding to the nearest gram.
#[inline]
pub fn scale_quantity(base_quantity: f64, ratio: f64) -> f64 {
    (base_quantity * ratio).round()
}

/// Ratio between the requested batch and the recipe's reference batch.
pub fn recipe_scale_ratio(base_weight: f64, target_weight: f64) -> f64 {
    if base_weight > 0.0 {
        target_weight / base_weight
    } else {
        1.0
    }
}

/// Ratio between the requested coverage amount and the catalog yield.
pub fn coverage_scale_ratio(catalog_yield: f64, target_weight: f64) -> f64 {
    if catalog_yield > 0.0 {
        target_weight / catalog_yield
    } else {
        1.0
    }
}

fn rows_cost(rows: &[IngredientRow]) -> f64 {
    rows.iter().map(IngredientRow::cost).sum()
}

/// Cost totals and the derived sale price for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Quote {
    pub ingredients_cost: f64,
    pub coverage_cost: f64,
    pub extras_cost: f64,
    pub total_cost: f64,
    pub final_price: f64,
    pub margin_percent: f64,
    pub profit: f64,
}

/// Derive totals, sale price, margin and profit from the current state.
pub fn quote(calc: &Calculation) -> Quote {
    let ingredients_cost = rows_cost(&calc.ingredients);
    let coverage_cost = rows_cost(&calc.coverage_ingredients);
    let extras_cost: f64 = calc.extras.iter().map(|e| e.cost()).sum();
    let total_cost = ingredients_cost + coverage_cost + extras_cost;

    let (final_price, margin_percent) = match calc.price_mode {
        PriceMode::Custom(price) => {
            let margin = if total_cost == 0.0 {
                0.0
            } else {
                (price - total_cost) / total_cost * 100.0
            };
            (price, margin)
        }
        PriceMode::Tier(tier) => (
            total_cost * tier.multiplier(),
            (tier.multiplier() - 1.0) * 100.0,
        ),
        PriceMode::Unset => (0.0, 0.0),
    };

    Quote {
        ingredients_cost,
        coverage_cost,
        extras_cost,
        total_cost,
        final_price,
        margin_percent,
        profit: final_price - total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraRow, MarginTier, RowId};

    fn priced(id: u64, name: &str, quantity: f64, price: f64, weight: f64) -> IngredientRow {
        let mut row = IngredientRow::new(RowId(id), name, quantity, weight);
        row.set_package_price(price);
        row
    }

    #[test]
    fn test_regular_cost_is_linear() {
        let single = ingredient_cost("farinha de trigo", 195.0, 5.0, 1000.0);
        let double = ingredient_cost("farinha de trigo", 390.0, 5.0, 1000.0);
        assert!((single - 0.975).abs() < 1e-9);
        assert!((double - 2.0 * single).abs() < 1e-9);
    }

    #[test]
    fn test_egg_cost_uses_count_times_mass() {
        let cost = ingredient_cost("ovos", 100.0, 12.0, 12.0);
        assert!((cost - 100.0 / 660.0 * 12.0).abs() < 1e-9);

        // Case-insensitive match on the name
        let upper = ingredient_cost("OVOS caipira", 100.0, 12.0, 12.0);
        assert!((upper - cost).abs() < 1e-12);
    }

    #[test]
    fn test_zero_package_weight_costs_nothing() {
        assert_eq!(ingredient_cost("sal", 2.0, 3.0, 0.0), 0.0);
        assert_eq!(ingredient_cost("ovos", 100.0, 12.0, 0.0), 0.0);
    }

    #[test]
    fn test_scale_quantity_rounds() {
        assert_eq!(scale_quantity(195.0, 1000.0 / 900.0), 217.0);
        assert_eq!(scale_quantity(3.0, 0.5), 2.0);
        assert_eq!(scale_quantity(7.0, 2.0), 14.0);
    }

    #[test]
    fn test_ratios_guard_zero_reference() {
        assert_eq!(recipe_scale_ratio(900.0, 1800.0), 2.0);
        assert_eq!(recipe_scale_ratio(0.0, 1800.0), 1.0);
        assert_eq!(coverage_scale_ratio(650.0, 325.0), 0.5);
        assert_eq!(coverage_scale_ratio(0.0, 325.0), 1.0);
    }

    fn sample_calculation() -> Calculation {
        let mut extra = ExtraRow::new(RowId(3), "caixa");
        extra.set_unit_price(4.0);
        Calculation {
            ingredients: vec![priced(1, "açúcar", 500.0, 6.0, 1000.0)],
            coverage_ingredients: vec![priced(2, "leite condensado", 395.0, 7.9, 395.0)],
            extras: vec![extra],
            ..Default::default()
        }
    }

    #[test]
    fn test_quote_totals() {
        let q = quote(&sample_calculation());
        assert!((q.ingredients_cost - 3.0).abs() < 1e-9);
        assert!((q.coverage_cost - 7.9).abs() < 1e-9);
        assert!((q.extras_cost - 4.0).abs() < 1e-9);
        assert!((q.total_cost - 14.9).abs() < 1e-9);
        assert_eq!(q.final_price, 0.0);
        assert!((q.profit + 14.9).abs() < 1e-9);
    }

    #[test]
    fn test_quote_with_tier() {
        let mut calc = sample_calculation();
        calc.price_mode = PriceMode::Tier(MarginTier::Pro);
        let q = quote(&calc);
        assert!((q.final_price - 44.7).abs() < 1e-9);
        assert!((q.margin_percent - 200.0).abs() < 1e-9);
        assert!((q.profit - 29.8).abs() < 1e-9);
    }

    #[test]
    fn test_quote_with_custom_price_below_cost() {
        let mut calc = sample_calculation();
        calc.price_mode = PriceMode::Custom(10.0);
        let q = quote(&calc);
        assert!(q.margin_percent < 0.0);
        assert!(q.profit < 0.0);
    }

    #[test]
    fn test_custom_price_with_zero_cost_has_zero_margin() {
        let calc = Calculation {
            price_mode: PriceMode::Custom(50.0),
            ..Default::default()
        };
        let q = quote(&calc);
        assert_eq!(q.margin_percent, 0.0);
        assert_eq!(q.final_price, 50.0);
        assert_eq!(q.profit, 50.0);
    }
}

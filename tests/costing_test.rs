#[macro_use]
extern crate assert_float_eq;

use lucro_calc_rs::catalog::{parse_ingredient, process_ingredient, Catalog};
use lucro_calc_rs::models::{Calculation, MarginTier, PriceMode};
use lucro_calc_rs::pricing::{format_currency, ingredient_cost, parse_currency};
use lucro_calc_rs::state::{CalculationManager, ExtraEdit, IngredientEdit};

const EPS: f64 = 1e-6;

fn bundled() -> Catalog {
    Catalog::bundled().unwrap()
}

#[test]
fn test_parse_catalog_lines() {
    let flour = parse_ingredient("195g de farinha de trigo");
    assert_eq!(flour.name, "farinha de trigo");
    assert_float_absolute_eq!(flour.quantity, 195.0, EPS);

    let eggs = parse_ingredient("100g de ovos (cerca de 2)");
    assert_eq!(eggs.name, "ovos");

    let lemons = parse_ingredient("2 limões");
    assert_eq!(lemons.name, "limões");
    assert_float_absolute_eq!(lemons.quantity, 2.0, EPS);

    let free = parse_ingredient("raspas de 1 limão");
    assert_eq!(free.name, "raspas de 1 limão");
    assert_float_absolute_eq!(free.quantity, 0.0, EPS);

    let parts = process_ingredient(
        "225g de buttermilk (211g de leite integral + 14g de vinagre branco ou suco de limão)",
    );
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name, "leite integral");
    assert_float_absolute_eq!(parts[1].quantity, 14.0, EPS);
}

#[test]
fn test_egg_cost_uses_unit_weight() {
    // 100 g of egg from a dozen at R$ 12,00 is 100/55 eggs at R$ 1,00 each.
    let cost = ingredient_cost("ovos", 100.0, 12.0, 12.0);
    assert_float_absolute_eq!(cost, 100.0 / 55.0, EPS);
    assert_float_absolute_eq!(cost, 1.818, 1e-3);
}

#[test]
fn test_bundled_catalog_shape() {
    let catalog = bundled();
    assert_eq!(catalog.recipes().len(), 31);
    assert_eq!(catalog.coverages().len(), 20);

    let express = catalog
        .find_recipe("Bolo Baunilha - Versão Express (Óleo)")
        .unwrap();
    assert_eq!(express.ingredients.len(), 10);
    assert_float_absolute_eq!(express.base_weight, 900.0, EPS);

    let brigadeiro = catalog.find_coverage("brigadeiro tradicional").unwrap();
    assert_float_absolute_eq!(brigadeiro.package_weight, 650.0, EPS);
    assert_float_absolute_eq!(brigadeiro.suggested_quantity, 400.0, EPS);
}

#[test]
fn test_full_calculation_flow() {
    let catalog = bundled();
    let recipe_id = catalog
        .find_recipe("Bolo Baunilha - Versão Express (Óleo)")
        .unwrap()
        .id
        .clone();

    let mut manager = CalculationManager::new(&catalog, Calculation::default());
    manager.select_recipe(&recipe_id).unwrap();

    let flour = manager.calculation().ingredients[0].clone();
    assert_eq!(flour.name, "farinha de trigo");
    manager
        .edit_ingredient(flour.id, IngredientEdit::PackagePrice("R$ 6,00".to_string()))
        .unwrap();

    let at_base: Vec<f64> = manager
        .calculation()
        .ingredients
        .iter()
        .map(|r| r.quantity())
        .collect();

    // Doubling the batch doubles every catalog row and keeps prices.
    manager.set_target_weight(1800.0);
    let doubled = &manager.calculation().ingredients;
    assert_eq!(doubled.len(), at_base.len());
    for (row, base) in doubled.iter().zip(&at_base) {
        assert_float_absolute_eq!(row.quantity(), 2.0 * base, 1.0);
    }

    let flour = &manager.calculation().ingredients[0];
    assert_float_absolute_eq!(flour.quantity(), 390.0, EPS);
    assert_float_absolute_eq!(flour.package_price(), 6.0, EPS);
    assert_float_absolute_eq!(flour.cost(), 2.34, EPS);

    let extra = manager.add_extra("caixa");
    manager
        .edit_extra(extra, ExtraEdit::UnitPrice("3,50".to_string()))
        .unwrap();
    manager
        .edit_extra(extra, ExtraEdit::Quantity("2".to_string()))
        .unwrap();

    let total = manager.quote().total_cost;
    assert_float_absolute_eq!(total, 2.34 + 7.0, EPS);

    manager.set_custom_price("R$ 100,00");
    assert_float_absolute_eq!(manager.quote().final_price, 100.0, EPS);

    // Choosing a tier after a custom price drops the custom price.
    manager.select_margin(MarginTier::Premium);
    assert_eq!(
        manager.calculation().price_mode,
        PriceMode::Tier(MarginTier::Premium)
    );
    let quote = manager.quote();
    assert_float_absolute_eq!(quote.final_price, total * 3.5, EPS);
    assert_float_absolute_eq!(quote.margin_percent, 250.0, EPS);
    assert_float_absolute_eq!(quote.profit, total * 2.5, EPS);
}

#[test]
fn test_currency_round_trip_through_display() {
    assert_float_absolute_eq!(parse_currency("R$ 1.234,56"), 1234.56, EPS);
    assert_eq!(format_currency(1234.56), "R$ 1.234,56");
}

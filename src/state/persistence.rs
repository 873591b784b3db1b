use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::Calculation;

/// Load a calculation from a JSON file.
pub fn load_calculation<P: AsRef<Path>>(path: P) -> Result<Calculation> {
    let content = fs::read_to_string(path)?;
    let calc: Calculation = serde_json::from_str(&content)?;
    Ok(calc)
}

/// Load a calculation, starting fresh when the file does not exist yet.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Calculation> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No state at {}, starting a new calculation", path.display());
        return Ok(Calculation::default());
    }
    load_calculation(path)
}

/// Save a calculation to a JSON file.
pub fn save_calculation<P: AsRef<Path>>(path: P, calc: &Calculation) -> Result<()> {
    let json = serde_json::to_string_pretty(calc)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraRow, IngredientRow, MarginTier, PriceMode, RowId};
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut row = IngredientRow::from_catalog(RowId(1), "ovos", 100.0, 12.0);
        row.set_package_price(15.0);
        let mut extra = ExtraRow::new(RowId(2), "caixa");
        extra.set_unit_price(3.5);

        let calc = Calculation {
            product_name: "Bolo Teste".to_string(),
            recipe_id: Some("1".to_string()),
            ingredients: vec![row],
            extras: vec![extra],
            price_mode: PriceMode::Tier(MarginTier::Pro),
            next_row_id: 3,
            ..Default::default()
        };

        let file = NamedTempFile::new().unwrap();
        save_calculation(file.path(), &calc).unwrap();

        let reloaded = load_calculation(file.path()).unwrap();
        assert_eq!(reloaded, calc);
        assert_eq!(reloaded.ingredients[0].base_quantity(), Some(100.0));
    }

    #[test]
    fn test_missing_file_gives_fresh_calculation() {
        let dir = tempfile::tempdir().unwrap();
        let calc = load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(calc, Calculation::default());
    }

    #[test]
    fn test_sparse_file_fills_defaults() {
        use std::io::Write;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"target_weight": 1200, "coverage_weight": 400}"#)
            .unwrap();

        let calc = load_calculation(file.path()).unwrap();
        assert_eq!(calc.target_weight, 1200.0);
        assert_eq!(calc.next_row_id, 1);
        assert_eq!(calc.price_mode, PriceMode::Unset);
    }

    #[test]
    fn test_name_only_file_gets_default_weights() {
        use std::io::Write;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"product_name": "x"}"#).unwrap();

        let calc = load_calculation(file.path()).unwrap();
        assert_eq!(calc.product_name, "x");
        assert_eq!(calc.target_weight, 900.0);
        assert_eq!(calc.coverage_weight, 500.0);
    }

    #[test]
    fn test_stored_costs_are_recomputed() {
        use std::io::Write;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "ingredients": [
                    {"id": 1, "name": "farinha de trigo", "quantity": 500,
                     "package_price": 10, "package_weight": 1000, "cost": 0},
                    {"id": 2, "name": "ovos", "quantity": -50,
                     "package_price": -3, "package_weight": 12, "cost": 99}
                ],
                "extras": [
                    {"id": 3, "item": "caixa", "quantity": 0, "unit_price": 2.5, "cost": 0}
                ]
            }"#,
        )
        .unwrap();

        let calc = load_calculation(file.path()).unwrap();
        let flour = &calc.ingredients[0];
        assert!((flour.cost() - 5.0).abs() < 1e-9);

        let eggs = &calc.ingredients[1];
        assert_eq!(eggs.quantity(), 0.0);
        assert_eq!(eggs.package_price(), 0.0);
        assert_eq!(eggs.cost(), 0.0);

        let extra = &calc.extras[0];
        assert_eq!(extra.quantity(), 1);
        assert!((extra.cost() - 2.5).abs() < 1e-9);

        assert!((crate::pricing::quote(&calc).total_cost - 7.5).abs() < 1e-9);
    }
}

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::error::Result;
use crate::interface::render::summary_text;
use crate::models::{Calculation, IngredientRow};
use crate::pricing::costing::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Shareable summary text.
    #[default]
    Text,
    /// One line per costed row.
    Csv,
}

/// Write the plain-text summary to a file.
pub fn write_summary(calc: &Calculation, quote: &Quote, path: &Path) -> Result<()> {
    fs::write(path, summary_text(calc, quote))?;
    info!("Summary written to {}", path.display());
    Ok(())
}

fn ingredient_record(section: &str, row: &IngredientRow) -> [String; 7] {
    [
        section.to_string(),
        row.id.to_string(),
        row.name.clone(),
        format!("{:.0}", row.quantity()),
        format!("{:.2}", row.package_price()),
        format!("{:.0}", row.package_weight()),
        format!("{:.2}", row.cost()),
    ]
}

/// Write every costed row, then the totals, to a CSV file.
pub fn write_csv(calc: &Calculation, quote: &Quote, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "section",
        "id",
        "name",
        "quantity",
        "package_price",
        "package_weight",
        "cost",
    ])?;

    for row in &calc.ingredients {
        wtr.write_record(ingredient_record("ingredient", row))?;
    }
    for row in &calc.coverage_ingredients {
        wtr.write_record(ingredient_record("coverage", row))?;
    }
    for extra in &calc.extras {
        wtr.write_record([
            "extra".to_string(),
            extra.id.to_string(),
            extra.item.clone(),
            extra.quantity().to_string(),
            format!("{:.2}", extra.unit_price()),
            String::new(),
            format!("{:.2}", extra.cost()),
        ])?;
    }

    for (label, value) in [
        ("total_cost", quote.total_cost),
        ("final_price", quote.final_price),
        ("profit", quote.profit),
    ] {
        wtr.write_record([
            "total".to_string(),
            String::new(),
            label.to_string(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.2}", value),
        ])?;
    }

    wtr.flush()?;
    info!("CSV written to {}", path.display());
    Ok(())
}

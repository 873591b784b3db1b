use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{CalcError, Result};
use crate::models::{Calculation, Coverage, ExtraRow, IngredientRow, MarginTier, PriceMode, Recipe, RowId};
use crate::pricing::constants::{MANUAL_ROW_PACKAGE_WEIGHT, MANUAL_ROW_QUANTITY};
use crate::pricing::costing::{coverage_scale_ratio, quote, recipe_scale_ratio, Quote};
use crate::pricing::currency::{parse_count, parse_currency, parse_extra_quantity};

/// A field edit on an ingredient row, carrying the raw user text.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientEdit {
    Name(String),
    Quantity(String),
    PackagePrice(String),
    PackageWeight(String),
}

/// A field edit on an extra row, carrying the raw user text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraEdit {
    Item(String),
    Quantity(String),
    UnitPrice(String),
}

fn apply_ingredient_edit(row: &mut IngredientRow, edit: IngredientEdit) {
    match edit {
        IngredientEdit::Name(name) => row.set_name(name),
        IngredientEdit::Quantity(raw) => row.set_quantity(parse_count(&raw)),
        IngredientEdit::PackagePrice(raw) => row.set_package_price(parse_currency(&raw)),
        IngredientEdit::PackageWeight(raw) => row.set_package_weight(parse_count(&raw)),
    }
}

fn find_row(rows: &mut [IngredientRow], id: RowId) -> Result<&mut IngredientRow> {
    rows.iter_mut()
        .find(|r| r.id == id)
        .ok_or(CalcError::RowNotFound(id))
}

fn remove_row<T>(rows: &mut Vec<T>, id: RowId, row_id: impl Fn(&T) -> RowId) -> Result<()> {
    let before = rows.len();
    rows.retain(|r| row_id(r) != id);
    if rows.len() == before {
        return Err(CalcError::RowNotFound(id));
    }
    Ok(())
}

/// Applies user events to a [`Calculation`] against the catalog.
///
/// Every numeric edit is lenient and costs are refreshed on the touched row
/// immediately. Only unknown row ids and unknown catalog entries fail.
pub struct CalculationManager<'a> {
    catalog: &'a Catalog,
    calc: Calculation,
}

impl<'a> CalculationManager<'a> {
    /// Wrap a loaded (or fresh) calculation.
    pub fn new(catalog: &'a Catalog, calc: Calculation) -> Self {
        Self { catalog, calc }
    }

    /// Current state, for rendering and saving.
    pub fn calculation(&self) -> &Calculation {
        &self.calc
    }

    /// Consume the manager, returning the state.
    pub fn into_calculation(self) -> Calculation {
        self.calc
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Catalog recipe behind the current rows, if one was selected.
    pub fn selected_recipe(&self) -> Option<&'a Recipe> {
        let catalog: &'a Catalog = self.catalog;
        self.calc.recipe_id.as_deref().and_then(|id| catalog.recipe(id))
    }

    /// Catalog coverage behind the current coverage rows, if one was selected.
    pub fn selected_coverage(&self) -> Option<&'a Coverage> {
        let catalog: &'a Catalog = self.catalog;
        self.calc.coverage_id.as_deref().and_then(|id| catalog.coverage(id))
    }

    fn next_id(&mut self) -> RowId {
        let id = RowId(self.calc.next_row_id);
        self.calc.next_row_id += 1;
        id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Recipe
    // ─────────────────────────────────────────────────────────────────────

    /// Load a recipe at its base weight, replacing the current cake rows.
    pub fn select_recipe(&mut self, recipe_id: &str) -> Result<()> {
        let catalog: &'a Catalog = self.catalog;
        let recipe = catalog
            .recipe(recipe_id)
            .ok_or_else(|| CalcError::RecipeNotFound(recipe_id.to_string()))?;

        let rows: Vec<IngredientRow> = recipe
            .ingredients
            .iter()
            .map(|ing| {
                let id = self.next_id();
                IngredientRow::from_catalog(id, ing.name.clone(), ing.quantity, ing.package_weight)
            })
            .collect();

        info!("Selected recipe {} ({} rows)", recipe.name, rows.len());
        self.calc.recipe_id = Some(recipe.id.clone());
        self.calc.product_name = recipe.name.clone();
        self.calc.target_weight = recipe.base_weight;
        self.calc.ingredients = rows;
        Ok(())
    }

    /// Change the batch weight and rescale rows that came from the recipe.
    pub fn set_target_weight(&mut self, grams: f64) {
        let grams = grams.max(0.0);
        self.calc.target_weight = grams;

        let Some(recipe) = self.selected_recipe() else {
            return;
        };
        let ratio = recipe_scale_ratio(recipe.base_weight, grams);
        debug!("Rescaling recipe rows by {:.4}", ratio);
        for row in &mut self.calc.ingredients {
            row.rescale(ratio);
        }
    }

    /// Add a manual cake row (100 g from a 1000 g package). It never rescales.
    pub fn add_ingredient(&mut self, name: &str) -> RowId {
        let id = self.next_id();
        self.calc.ingredients.push(IngredientRow::new(
            id,
            name,
            MANUAL_ROW_QUANTITY,
            MANUAL_ROW_PACKAGE_WEIGHT,
        ));
        id
    }

    /// Apply one field edit to a cake row. Numbers are parsed leniently.
    pub fn edit_ingredient(&mut self, id: RowId, edit: IngredientEdit) -> Result<()> {
        let row = find_row(&mut self.calc.ingredients, id)?;
        apply_ingredient_edit(row, edit);
        Ok(())
    }

    /// Drop a cake row.
    pub fn remove_ingredient(&mut self, id: RowId) -> Result<()> {
        remove_row(&mut self.calc.ingredients, id, |r| r.id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Coverage
    // ─────────────────────────────────────────────────────────────────────

    /// Load a coverage at its catalog yield, replacing the coverage rows.
    pub fn select_coverage(&mut self, coverage_id: &str) -> Result<()> {
        let catalog: &'a Catalog = self.catalog;
        let coverage = catalog
            .coverage(coverage_id)
            .ok_or_else(|| CalcError::CoverageNotFound(coverage_id.to_string()))?;

        let rows: Vec<IngredientRow> = coverage
            .ingredients
            .iter()
            .map(|ing| {
                let id = self.next_id();
                IngredientRow::from_catalog(id, ing.name.clone(), ing.quantity, ing.package_weight)
            })
            .collect();

        info!("Selected coverage {} ({} rows)", coverage.name, rows.len());
        self.calc.coverage_id = Some(coverage.id.clone());
        self.calc.coverage_weight = coverage.package_weight;
        self.calc.coverage_ingredients = rows;
        Ok(())
    }

    /// Change the coverage amount and rescale rows that came from the catalog.
    pub fn set_coverage_weight(&mut self, grams: f64) {
        let grams = grams.max(0.0);
        self.calc.coverage_weight = grams;

        let Some(coverage) = self.selected_coverage() else {
            return;
        };
        let ratio = coverage_scale_ratio(coverage.package_weight, grams);
        debug!("Rescaling coverage rows by {:.4}", ratio);
        for row in &mut self.calc.coverage_ingredients {
            row.rescale(ratio);
        }
    }

    /// Add a manual coverage row (100 g from a 1000 g package). It never rescales.
    pub fn add_coverage_ingredient(&mut self, name: &str) -> RowId {
        let id = self.next_id();
        self.calc.coverage_ingredients.push(IngredientRow::new(
            id,
            name,
            MANUAL_ROW_QUANTITY,
            MANUAL_ROW_PACKAGE_WEIGHT,
        ));
        id
    }

    /// Apply one field edit to a coverage row.
    pub fn edit_coverage_ingredient(&mut self, id: RowId, edit: IngredientEdit) -> Result<()> {
        let row = find_row(&mut self.calc.coverage_ingredients, id)?;
        apply_ingredient_edit(row, edit);
        Ok(())
    }

    /// Drop a coverage row.
    pub fn remove_coverage_ingredient(&mut self, id: RowId) -> Result<()> {
        remove_row(&mut self.calc.coverage_ingredients, id, |r| r.id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Extras
    // ─────────────────────────────────────────────────────────────────────

    /// Add an extra at quantity 1 and price 0.
    pub fn add_extra(&mut self, item: &str) -> RowId {
        let id = self.next_id();
        self.calc.extras.push(ExtraRow::new(id, item));
        id
    }

    /// Apply one field edit to an extra. Bad quantities become 1.
    pub fn edit_extra(&mut self, id: RowId, edit: ExtraEdit) -> Result<()> {
        let extra = self
            .calc
            .extras
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CalcError::RowNotFound(id))?;

        match edit {
            ExtraEdit::Item(item) => extra.item = item,
            ExtraEdit::Quantity(raw) => extra.set_quantity(parse_extra_quantity(&raw)),
            ExtraEdit::UnitPrice(raw) => extra.set_unit_price(parse_currency(&raw)),
        }
        Ok(())
    }

    /// Drop an extra.
    pub fn remove_extra(&mut self, id: RowId) -> Result<()> {
        remove_row(&mut self.calc.extras, id, |e| e.id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pricing
    // ─────────────────────────────────────────────────────────────────────

    /// Price by a preset multiplier. Drops any custom price.
    pub fn select_margin(&mut self, tier: MarginTier) {
        self.calc.price_mode = PriceMode::Tier(tier);
    }

    /// Price at a user-typed amount. Drops any selected tier.
    pub fn set_custom_price(&mut self, raw: &str) {
        self.calc.price_mode = PriceMode::Custom(parse_currency(raw));
    }

    /// Set the product name shown in the summary.
    pub fn rename_product(&mut self, name: &str) {
        self.calc.product_name = name.trim().to_string();
    }

    /// Start a new calculation. Row ids keep counting so none is reused.
    pub fn reset(&mut self) {
        let next_row_id = self.calc.next_row_id;
        self.calc = Calculation {
            next_row_id,
            ..Default::default()
        };
        info!("Calculation reset");
    }

    /// Totals, sale price and profit for the current state.
    pub fn quote(&self) -> Quote {
        quote(&self.calc)
    }
}

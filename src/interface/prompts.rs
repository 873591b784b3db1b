use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{IngredientRow, MarginTier, RowId};
use crate::pricing::currency::{format_number_input, format_price_input, parse_count};
use crate::state::{CalculationManager, ExtraEdit, IngredientEdit};

/// Prompt for free text, prefilled with `default`.
fn prompt_text(prompt: &str, default: String) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()?)
}

fn prompt_optional(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask package price and weight for each row, returning the edits to apply.
fn prompt_row_prices(rows: &[IngredientRow]) -> Result<Vec<(RowId, IngredientEdit)>> {
    let mut edits = Vec::new();

    for row in rows {
        let unit = if row.is_egg() { "un" } else { "g" };
        let price = prompt_text(
            &format!("{}: preço da embalagem (R$)", row.name),
            format_price_input(row.package_price()),
        )?;
        let weight = prompt_text(
            &format!("{}: tamanho da embalagem ({})", row.name, unit),
            format_number_input(row.package_weight()),
        )?;
        edits.push((row.id, IngredientEdit::PackagePrice(price)));
        edits.push((row.id, IngredientEdit::PackageWeight(weight)));
    }

    Ok(edits)
}

fn wizard_recipe(manager: &mut CalculationManager) -> Result<()> {
    let names: Vec<String> = manager
        .catalog()
        .recipes()
        .iter()
        .map(|r| r.name.clone())
        .collect();
    let ids: Vec<String> = manager.catalog().recipes().iter().map(|r| r.id.clone()).collect();

    let selection = Select::new()
        .with_prompt("Escolha a receita")
        .items(&names)
        .default(0)
        .interact()?;
    manager.select_recipe(&ids[selection])?;

    if let Some(note) = manager.selected_recipe().and_then(|r| r.note.as_deref()) {
        println!("Obs.: {}", note);
    }

    let weight = prompt_text(
        "Peso da massa (g)",
        format_number_input(manager.calculation().target_weight),
    )?;
    manager.set_target_weight(parse_count(&weight));

    let edits = prompt_row_prices(&manager.calculation().ingredients)?;
    for (id, edit) in edits {
        manager.edit_ingredient(id, edit)?;
    }
    Ok(())
}

fn wizard_coverage(manager: &mut CalculationManager) -> Result<()> {
    if !prompt_yes_no("Adicionar cobertura?", true)? {
        return Ok(());
    }

    let names: Vec<String> = manager
        .catalog()
        .coverages()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let ids: Vec<String> = manager.catalog().coverages().iter().map(|c| c.id.clone()).collect();

    let selection = Select::new()
        .with_prompt("Escolha a cobertura")
        .items(&names)
        .default(0)
        .interact()?;
    manager.select_coverage(&ids[selection])?;

    let weight = prompt_text(
        "Quantidade de cobertura (g)",
        format_number_input(manager.calculation().coverage_weight),
    )?;
    manager.set_coverage_weight(parse_count(&weight));

    let edits = prompt_row_prices(&manager.calculation().coverage_ingredients)?;
    for (id, edit) in edits {
        manager.edit_coverage_ingredient(id, edit)?;
    }
    Ok(())
}

fn wizard_extras(manager: &mut CalculationManager) -> Result<()> {
    loop {
        let item = prompt_optional("Item extra (embalagem, topo...) ou Enter para seguir")?;
        if item.is_empty() {
            break;
        }

        let quantity = prompt_text("Quantidade", "1".to_string())?;
        let price = prompt_text("Preço unitário (R$)", "0,00".to_string())?;

        let id = manager.add_extra(&item);
        manager.edit_extra(id, ExtraEdit::Quantity(quantity))?;
        manager.edit_extra(id, ExtraEdit::UnitPrice(price))?;
    }
    Ok(())
}

fn wizard_pricing(manager: &mut CalculationManager) -> Result<()> {
    let mut options: Vec<String> = MarginTier::ALL.iter().map(|t| t.to_string()).collect();
    options.push("Preço personalizado".to_string());

    let selection = Select::new()
        .with_prompt("Como definir o preço?")
        .items(&options)
        .default(1)
        .interact()?;

    match MarginTier::ALL.get(selection) {
        Some(tier) => manager.select_margin(*tier),
        None => {
            let price = prompt_text("Preço de venda (R$)", "0,00".to_string())?;
            manager.set_custom_price(&price);
        }
    }
    Ok(())
}

/// Walk through recipe, coverage, extras and pricing in order.
pub fn run_wizard(manager: &mut CalculationManager) -> Result<()> {
    wizard_recipe(manager)?;
    wizard_coverage(manager)?;
    wizard_extras(manager)?;
    wizard_pricing(manager)?;
    Ok(())
}

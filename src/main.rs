use clap::Parser;
use std::path::Path;

use lucro_calc_rs::access::{authorize, require_session};
use lucro_calc_rs::catalog::Catalog;
use lucro_calc_rs::cli::{Cli, Command, ExtraAction, IngredientAction};
use lucro_calc_rs::config::Config;
use lucro_calc_rs::error::{CalcError, Result};
use lucro_calc_rs::interface::{
    display_calculation, display_coverages, display_recipes, prompt_yes_no, run_wizard,
    summary_text, write_csv, write_summary, ExportFormat,
};
use lucro_calc_rs::logging::init_logging;
use lucro_calc_rs::models::RowId;
use lucro_calc_rs::pricing::parse_count;
use lucro_calc_rs::state::{
    load_or_default, save_calculation, CalculationManager, ExtraEdit, IngredientEdit,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env()?;
    let store = config.session_store();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Login { email } => {
            let directory = config.directory()?;
            let email = authorize(&directory, &store, &email)?;
            println!("Logged in as {}", email);
            return Ok(());
        }
        Command::Logout => {
            store.clear_session()?;
            println!("Logged out.");
            return Ok(());
        }
        Command::Whoami => {
            match store.get_valid_session() {
                Some(email) => println!("{}", email),
                None => println!("Not logged in."),
            }
            return Ok(());
        }
        _ => {}
    }

    // Everything below needs an open session.
    require_session(&store)?;

    let catalog = Catalog::bundled()?;
    let path = Path::new(&cli.file);
    let calc = load_or_default(path)?;
    let mut manager = CalculationManager::new(&catalog, calc);

    let changed = match command {
        Command::Recipes => {
            display_recipes(catalog.recipes());
            false
        }
        Command::Coverages => {
            display_coverages(catalog.coverages());
            false
        }
        Command::SelectRecipe { recipe } => {
            let id = catalog
                .find_recipe(&recipe)
                .map(|r| r.id.clone())
                .ok_or(CalcError::RecipeNotFound(recipe))?;
            manager.select_recipe(&id)?;
            true
        }
        Command::Weight { grams } => {
            manager.set_target_weight(parse_count(&grams));
            true
        }
        Command::Ingredient(action) => cmd_ingredient(&mut manager, action, false)?,
        Command::SelectCoverage { coverage } => {
            let id = catalog
                .find_coverage(&coverage)
                .map(|c| c.id.clone())
                .ok_or(CalcError::CoverageNotFound(coverage))?;
            manager.select_coverage(&id)?;
            true
        }
        Command::CoverageWeight { grams } => {
            manager.set_coverage_weight(parse_count(&grams));
            true
        }
        Command::Coverage(action) => cmd_ingredient(&mut manager, action, true)?,
        Command::Extra(action) => cmd_extra(&mut manager, action)?,
        Command::Margin { tier } => {
            manager.select_margin(tier);
            true
        }
        Command::Price { amount } => {
            manager.set_custom_price(&amount);
            true
        }
        Command::Rename { name } => {
            manager.rename_product(&name);
            true
        }
        Command::Show => false,
        Command::New => {
            if !prompt_yes_no("Discard the current calculation?", true)? {
                return Ok(());
            }
            manager.reset();
            true
        }
        Command::Export { format, output } => {
            cmd_export(&manager, format, output.as_deref())?;
            return Ok(());
        }
        Command::Wizard => {
            run_wizard(&mut manager)?;
            true
        }
        Command::Login { .. } | Command::Logout | Command::Whoami => false,
    };

    let note = manager.selected_recipe().and_then(|r| r.note.as_deref());
    display_calculation(manager.calculation(), &manager.quote(), note);

    if changed {
        save_calculation(path, manager.calculation())?;
    }
    Ok(())
}

/// Apply an ingredient action to the cake rows or the coverage rows.
fn cmd_ingredient(
    manager: &mut CalculationManager,
    action: IngredientAction,
    coverage: bool,
) -> Result<bool> {
    match action {
        IngredientAction::Add { name } => {
            let id = if coverage {
                manager.add_coverage_ingredient(&name)
            } else {
                manager.add_ingredient(&name)
            };
            println!("Added row {}", id);
        }
        IngredientAction::Set {
            id,
            name,
            quantity,
            price,
            weight,
        } => {
            let edits = [
                name.map(IngredientEdit::Name),
                quantity.map(IngredientEdit::Quantity),
                price.map(IngredientEdit::PackagePrice),
                weight.map(IngredientEdit::PackageWeight),
            ];
            for edit in edits.into_iter().flatten() {
                if coverage {
                    manager.edit_coverage_ingredient(RowId(id), edit)?;
                } else {
                    manager.edit_ingredient(RowId(id), edit)?;
                }
            }
        }
        IngredientAction::Remove { id } => {
            if coverage {
                manager.remove_coverage_ingredient(RowId(id))?;
            } else {
                manager.remove_ingredient(RowId(id))?;
            }
        }
    }
    Ok(true)
}

fn cmd_extra(manager: &mut CalculationManager, action: ExtraAction) -> Result<bool> {
    match action {
        ExtraAction::Add { item } => {
            let id = manager.add_extra(&item);
            println!("Added extra {}", id);
        }
        ExtraAction::Set {
            id,
            item,
            quantity,
            price,
        } => {
            let edits = [
                item.map(ExtraEdit::Item),
                quantity.map(ExtraEdit::Quantity),
                price.map(ExtraEdit::UnitPrice),
            ];
            for edit in edits.into_iter().flatten() {
                manager.edit_extra(RowId(id), edit)?;
            }
        }
        ExtraAction::Remove { id } => manager.remove_extra(RowId(id))?,
    }
    Ok(true)
}

fn cmd_export(
    manager: &CalculationManager,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let calc = manager.calculation();
    let quote = manager.quote();

    match (format, output) {
        (ExportFormat::Text, None) => print!("{}", summary_text(calc, &quote)),
        (ExportFormat::Text, Some(path)) => write_summary(calc, &quote, path)?,
        (ExportFormat::Csv, Some(path)) => write_csv(calc, &quote, path)?,
        (ExportFormat::Csv, None) => {
            return Err(CalcError::InvalidInput(
                "CSV export needs --output <file>".to_string(),
            ));
        }
    }
    Ok(())
}

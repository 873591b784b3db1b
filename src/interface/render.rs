use crate::models::{Calculation, Coverage, IngredientRow, PriceMode, Recipe};
use crate::pricing::costing::Quote;
use crate::pricing::currency::format_currency;

/// Display the recipe catalog with ids.
pub fn display_recipes(recipes: &[Recipe]) {
    println!();
    println!("=== Receitas ({} items) ===", recipes.len());
    println!();
    for recipe in recipes {
        println!(
            "{:>3}. {} ({} ingredientes, {:.0}g)",
            recipe.id,
            recipe.name,
            recipe.ingredients.len(),
            recipe.base_weight
        );
    }
    println!();
}

/// Display the coverage catalog with ids.
pub fn display_coverages(coverages: &[Coverage]) {
    println!();
    println!("=== Coberturas ({} items) ===", coverages.len());
    println!();
    for coverage in coverages {
        println!(
            "{:>3}. {} (rende {:.0}g, sugestão {:.0}g)",
            coverage.id, coverage.name, coverage.package_weight, coverage.suggested_quantity
        );
    }
    println!();
}

fn display_rows(title: &str, rows: &[IngredientRow]) {
    if rows.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!("{}:", title);
    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(10);

    for row in rows {
        let unit = if row.is_egg() { "un" } else { "g" };
        println!(
            "  [{:>3}] {:<width$}  {:>6.0}g | emb. {} / {:.0}{} | custo {}",
            row.id,
            row.name,
            row.quantity(),
            format_currency(row.package_price()),
            row.package_weight(),
            unit,
            format_currency(row.cost()),
            width = width
        );
    }
}

/// Display the live calculation and its quote.
pub fn display_calculation(calc: &Calculation, quote: &Quote, note: Option<&str>) {
    println!();
    let name = if calc.product_name.is_empty() {
        "(sem receita)"
    } else {
        calc.product_name.as_str()
    };
    println!("=== {} ({:.0}g) ===", name, calc.target_weight);
    if let Some(note) = note {
        println!("Obs.: {}", note);
    }
    println!();

    display_rows("Ingredientes", &calc.ingredients);
    println!();

    if calc.coverage_id.is_some() || !calc.coverage_ingredients.is_empty() {
        display_rows(
            &format!("Cobertura ({:.0}g)", calc.coverage_weight),
            &calc.coverage_ingredients,
        );
        println!();
    }

    if calc.extras.is_empty() {
        println!("Extras: (none)");
    } else {
        println!("Extras:");
        for extra in &calc.extras {
            println!(
                "  [{:>3}] {} x{} @ {} = {}",
                extra.id,
                extra.item,
                extra.quantity(),
                format_currency(extra.unit_price()),
                format_currency(extra.cost())
            );
        }
    }

    println!();
    println!("--- Resumo ---");
    println!("Custo ingredientes: {}", format_currency(quote.ingredients_cost));
    println!("Custo cobertura:    {}", format_currency(quote.coverage_cost));
    println!("Custo extras:       {}", format_currency(quote.extras_cost));
    println!("Custo total:        {}", format_currency(quote.total_cost));

    match calc.price_mode {
        PriceMode::Tier(tier) => println!("Margem:             {}", tier),
        PriceMode::Custom(_) => println!("Margem:             preço personalizado"),
        PriceMode::Unset => println!("Margem:             (escolha uma margem ou informe o preço)"),
    }

    println!("Preço final:        {}", format_currency(quote.final_price));
    println!("Margem aplicada:    {:.0}%", quote.margin_percent);
    println!("Lucro:              {}", format_currency(quote.profit));
    println!();
}

/// Shareable plain-text summary of a calculation.
pub fn summary_text(calc: &Calculation, quote: &Quote) -> String {
    let name = if calc.product_name.is_empty() {
        "Não selecionada"
    } else {
        calc.product_name.as_str()
    };

    format!(
        "CÁLCULO DE PRECIFICAÇÃO\n\
         \n\
         Receita: {} ({:.0}g)\n\
         \n\
         CUSTO TOTAL: {}\n\
         • Ingredientes: {}\n\
         • Cobertura: {}\n\
         • Extras: {}\n\
         \n\
         PREÇO FINAL: {}\n\
         • Margem aplicada: {:.0}%\n\
         • Lucro: {}\n\
         \n\
         Calculado com Calculadora Express LUCRÔ\n",
        name,
        calc.target_weight,
        format_currency(quote.total_cost),
        format_currency(quote.ingredients_cost),
        format_currency(quote.coverage_cost),
        format_currency(quote.extras_cost),
        format_currency(quote.final_price),
        quote.margin_percent,
        format_currency(quote.profit),
    )
}

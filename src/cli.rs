use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::interface::ExportFormat;
use crate::models::MarginTier;

/// LUCRÔ: cost and price home-baked cakes from a recipe catalog.
#[derive(Parser, Debug)]
#[command(name = "lucro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the calculation state JSON file.
    #[arg(short, long, default_value = "lucro_state.json")]
    pub file: String,

    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Field of an ingredient row.
#[derive(Subcommand, Debug)]
pub enum IngredientAction {
    /// Add a manual row (100 g, package 1000 g).
    Add { name: String },

    /// Edit fields of a row. Numbers are read leniently.
    Set {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        /// Package price, e.g. "R$ 5,50".
        #[arg(long)]
        price: Option<String>,
        /// Package weight in grams (eggs: units).
        #[arg(long)]
        weight: Option<String>,
    },

    /// Remove a row.
    Remove { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ExtraAction {
    /// Add an extra item (quantity 1, price 0).
    Add { item: String },

    /// Edit fields of an extra.
    Set {
        id: u64,
        #[arg(long)]
        item: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },

    /// Remove an extra.
    Remove { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check an e-mail against the user directory and open a session.
    Login { email: String },

    /// Close the current session.
    Logout,

    /// Show who is logged in.
    Whoami,

    /// List catalog recipes.
    Recipes,

    /// List catalog coverages.
    Coverages,

    /// Load a recipe by id or name at its base weight.
    SelectRecipe { recipe: String },

    /// Set the cake batch weight in grams and rescale recipe rows.
    Weight { grams: String },

    /// Edit cake ingredient rows.
    #[command(subcommand)]
    Ingredient(IngredientAction),

    /// Load a coverage by id or name at its catalog yield.
    SelectCoverage { coverage: String },

    /// Set the coverage weight in grams and rescale coverage rows.
    CoverageWeight { grams: String },

    /// Edit coverage ingredient rows.
    #[command(subcommand)]
    Coverage(IngredientAction),

    /// Edit extra cost rows.
    #[command(subcommand)]
    Extra(ExtraAction),

    /// Price with a preset margin multiplier.
    Margin {
        #[arg(value_enum)]
        tier: MarginTier,
    },

    /// Price at a typed amount, e.g. "R$ 120,00".
    Price { amount: String },

    /// Rename the product.
    Rename { name: String },

    /// Show the calculation and its quote.
    Show,

    /// Start a new calculation.
    New,

    /// Write the summary or a CSV breakdown.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Output file. Text summaries go to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a calculation interactively.
    Wizard,
}

impl Default for Command {
    fn default() -> Self {
        Command::Show
    }
}

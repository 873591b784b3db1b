pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_csv, write_summary, ExportFormat};
pub use prompts::{prompt_yes_no, run_wizard};
pub use render::{display_calculation, display_coverages, display_recipes, summary_text};

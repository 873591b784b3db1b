use std::sync::LazyLock;

use regex::Regex;
use strsim::jaro_winkler;
use tracing::{debug, info};

use crate::catalog::data::{CakeShape, CatalogData, CoverageEntry};
use crate::catalog::package::default_package_weight;
use crate::catalog::parser::{parse_ingredient, process_ingredient};
use crate::error::Result;
use crate::models::{BaseIngredient, Coverage, Recipe};
use crate::pricing::constants::{
    DEFAULT_COVERAGE_YIELD, MAX_SUGGESTED_COVERAGE, REFERENCE_BATCH_WEIGHT,
};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.7;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("integer pattern is valid"));

/// Read the yield in grams from text like "650g" or "400 a 450g".
///
/// Only the first number counts. Missing or numberless text gives the default yield.
pub fn parse_yield(text: Option<&str>) -> f64 {
    text.and_then(|t| FIRST_INTEGER.captures(t))
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(DEFAULT_COVERAGE_YIELD)
}

fn recipe_ingredients(lines: &[String]) -> Vec<BaseIngredient> {
    lines
        .iter()
        .flat_map(|line| process_ingredient(line))
        .map(|parsed| BaseIngredient {
            package_weight: default_package_weight(&parsed.name),
            name: parsed.name,
            quantity: parsed.quantity,
        })
        .collect()
}

fn coverage_ingredients(lines: &[String]) -> Vec<BaseIngredient> {
    lines
        .iter()
        .map(|line| parse_ingredient(line))
        .map(|parsed| BaseIngredient {
            package_weight: default_package_weight(&parsed.name),
            name: parsed.name,
            quantity: parsed.quantity,
        })
        .collect()
}

/// Flatten every cake entry into recipes defined at the reference batch weight.
///
/// Each version of a multi-version cake becomes its own recipe. For layered
/// cakes only the cake layer is costed.
pub fn convert_recipes(data: &CatalogData) -> Vec<Recipe> {
    let mut recipes = Vec::new();

    let mut push = |name: String, lines: &[String], note: Option<String>| {
        let id = recipes.len() + 1;
        recipes.push(Recipe {
            id: id.to_string(),
            name,
            base_weight: REFERENCE_BATCH_WEIGHT,
            ingredients: recipe_ingredients(lines),
            note,
        });
    };

    for cake in &data.cakes {
        match cake.shape() {
            CakeShape::Versions(versions) => {
                for version in versions {
                    push(
                        format!("{} - {}", cake.title, version.kind),
                        &version.ingredients,
                        cake.note.clone(),
                    );
                }
            }
            CakeShape::Flat(lines) => push(cake.title.clone(), lines, cake.note.clone()),
            CakeShape::Layered { base, topping } => {
                debug!(
                    "{}: costing cake layer only, {} topping lines left out",
                    cake.title,
                    topping.len()
                );
                push(cake.title.clone(), base, cake.note.clone());
            }
            CakeShape::Empty => debug!("{}: no ingredient list, skipped", cake.title),
        }
    }

    recipes
}

fn convert_coverage(id: usize, entry: &CoverageEntry) -> Coverage {
    let catalog_yield = parse_yield(entry.yield_text.as_deref());

    // Multi-version coverages keep only their first version.
    let ingredients = match (&entry.ingredients, &entry.versions) {
        (Some(lines), _) => coverage_ingredients(lines),
        (None, Some(versions)) => versions
            .first()
            .map(|v| coverage_ingredients(&v.ingredients))
            .unwrap_or_default(),
        (None, None) => Vec::new(),
    };

    Coverage {
        id: id.to_string(),
        name: entry.title.clone(),
        suggested_quantity: catalog_yield.min(MAX_SUGGESTED_COVERAGE),
        package_weight: catalog_yield,
        ingredients,
    }
}

/// Flatten every coverage entry.
pub fn convert_coverages(data: &CatalogData) -> Vec<Coverage> {
    data.coverages
        .iter()
        .enumerate()
        .map(|(i, entry)| convert_coverage(i + 1, entry))
        .collect()
}

/// Find an entry by id, then exact name, then closest fuzzy name.
fn find_entry<'a, T>(
    items: &'a [T],
    query: &str,
    id: fn(&T) -> &str,
    name: fn(&T) -> &str,
) -> Option<&'a T> {
    let query = query.trim();
    let lowered = query.to_lowercase();

    if let Some(item) = items
        .iter()
        .find(|item| id(item) == query || name(item).to_lowercase() == lowered)
    {
        return Some(item);
    }

    items
        .iter()
        .map(|item| (item, jaro_winkler(&name(item).to_lowercase(), &lowered)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(item, _)| item)
}

/// The recipe and coverage lists, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    coverages: Vec<Coverage>,
}

impl Catalog {
    pub fn from_data(data: &CatalogData) -> Self {
        let recipes = convert_recipes(data);
        let coverages = convert_coverages(data);
        info!(
            "Catalog loaded: {} recipes, {} coverages",
            recipes.len(),
            coverages.len()
        );
        Self { recipes, coverages }
    }

    /// Build from the catalog embedded in the binary.
    pub fn bundled() -> Result<Self> {
        Ok(Self::from_data(&CatalogData::bundled()?))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn coverages(&self) -> &[Coverage] {
        &self.coverages
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn coverage(&self, id: &str) -> Option<&Coverage> {
        self.coverages.iter().find(|c| c.id == id)
    }

    /// Look up a recipe by id, exact name (case-insensitive) or fuzzy name.
    pub fn find_recipe(&self, query: &str) -> Option<&Recipe> {
        find_entry(&self.recipes, query, |r| r.id.as_str(), |r| r.name.as_str())
    }

    /// Look up a coverage by id, exact name (case-insensitive) or fuzzy name.
    pub fn find_coverage(&self, query: &str) -> Option<&Coverage> {
        find_entry(&self.coverages, query, |c| c.id.as_str(), |c| c.name.as_str())
    }
}

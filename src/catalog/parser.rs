//! # Ingredient Line Parser
//!
//! Turns hand-written catalog lines such as `"195g de farinha de trigo"` into
//! a quantity in grams and a clean ingredient name. Parsing never fails: a
//! line that does not start with a number becomes a zero-quantity entry
//! carrying the original text as its name.

use std::sync::LazyLock;

use regex::Regex;

/// A quantity/name pair read from one catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub name: String,
    pub quantity: f64,
}

/// `<n>g [de] <name>`
static GRAM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)g\s+(?:de\s+)?(.+)$").expect("gram line pattern is valid")
});

/// `<n> <name>`
static COUNT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s+(.+)$").expect("count line pattern is valid")
});

/// `<n>g de buttermilk (<a> + <b>)`
static BUTTERMILK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)g\s+de\s+buttermilk\s*\(([^)]+)\)$")
        .expect("buttermilk pattern is valid")
});

/// One `<n>g de <name>` piece inside the buttermilk parentheses.
static BUTTERMILK_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)g\s+de\s+(.+)").expect("buttermilk part pattern is valid")
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

fn clean_name(raw: &str) -> String {
    PARENTHETICAL.replace_all(raw, "").trim().to_string()
}

/// Parse a single ingredient line.
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    for pattern in [&*GRAM_LINE, &*COUNT_LINE] {
        if let Some(caps) = pattern.captures(line) {
            if let Ok(quantity) = caps[1].parse::<f64>() {
                return ParsedIngredient {
                    name: clean_name(&caps[2]),
                    quantity,
                };
            }
        }
    }

    ParsedIngredient {
        name: line.to_string(),
        quantity: 0.0,
    }
}

/// Parse a recipe line, splitting composite buttermilk into what is bought.
///
/// `"225g de buttermilk (211g de leite integral + 14g de vinagre)"` yields
/// two entries, one per component. Every other line yields exactly one.
pub fn process_ingredient(line: &str) -> Vec<ParsedIngredient> {
    let Some(caps) = BUTTERMILK_LINE.captures(line) else {
        return vec![parse_ingredient(line)];
    };

    caps[2]
        .split('+')
        .filter_map(|part| {
            let part_caps = BUTTERMILK_PART.captures(part.trim())?;
            let quantity = part_caps[1].parse::<f64>().ok()?;
            Some(ParsedIngredient {
                name: part_caps[2].trim().to_string(),
                quantity,
            })
        })
        .collect()
}

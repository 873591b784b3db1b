/// Fallback package weight when no rule matches.
pub const DEFAULT_PACKAGE_WEIGHT: f64 = 1000.0;

/// Ordered (keywords, package weight) rules. First match wins.
///
/// Eggs are priced per unit, so their "weight" is an egg count. The "gotas"
/// rule sits behind "chocolate", which means "gotas de chocolate" resolves to
/// the chocolate weight; the order is kept as-is so catalog defaults stay
/// reproducible.
pub const PACKAGE_WEIGHT_RULES: &[(&[&str], f64)] = &[
    (&["farinha", "fubá", "açúcar", "amido"], 1000.0),
    (&["ovo"], 12.0),
    (&["leite", "iogurte", "buttermilk"], 1000.0),
    (&["manteiga", "óleo"], 500.0),
    (&["cacau", "chocolate"], 250.0),
    (&["fermento", "bicarbonato", "sal"], 100.0),
    (&["essência", "extrato", "corante"], 50.0),
    (&["canela", "gengibre", "noz-moscada"], 50.0),
    (&["paçoca"], 50.0),
    (&["coco", "tapioca"], 500.0),
    (&["cenoura", "banana", "maçã"], 500.0),
    (&["milho"], 200.0),
    (&["aipim"], 500.0),
    (&["abacaxi"], 500.0),
    (&["nozes", "castanhas"], 200.0),
    (&["gotas"], 200.0),
];

/// Typical package size for an ingredient, guessed from its name.
pub fn default_package_weight(name: &str) -> f64 {
    let name = name.to_lowercase();
    PACKAGE_WEIGHT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_PACKAGE_WEIGHT)
}

/// Average mass of one egg in grams.
pub const EGG_GRAMS: f64 = 55.0;

/// Batch weight every catalog recipe is written for.
pub const REFERENCE_BATCH_WEIGHT: f64 = 900.0;

/// Coverage target before any coverage is chosen.
pub const DEFAULT_COVERAGE_WEIGHT: f64 = 500.0;

/// Yield assumed when a coverage entry does not state one.
pub const DEFAULT_COVERAGE_YIELD: f64 = 500.0;

/// Upper bound for the suggested coverage amount.
pub const MAX_SUGGESTED_COVERAGE: f64 = 400.0;

/// Starting quantity for rows added by hand.
pub const MANUAL_ROW_QUANTITY: f64 = 100.0;

/// Starting package weight for rows added by hand.
pub const MANUAL_ROW_PACKAGE_WEIGHT: f64 = 1000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Margin tiers (sale price = total cost × multiplier)
// ─────────────────────────────────────────────────────────────────────────────

pub const STARTER_MULTIPLIER: f64 = 2.5;
pub const PRO_MULTIPLIER: f64 = 3.0;
pub const PREMIUM_MULTIPLIER: f64 = 3.5;

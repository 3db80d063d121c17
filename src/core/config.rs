//! Economy configuration with documented constants
//!
//! The expense formula coefficients and variance band are collected here
//! with explanations of their purpose. Occupation base incomes and age
//! factors are static tables and live next to the `Occupation` enum.

use serde::{Deserialize, Serialize};

/// Tunable constants for the household economy
///
/// These values are illustrative, not calibrated macroeconomic data.
/// Changing them shifts the wealth trajectories every household follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyConfig {
    // === MONTHLY EXPENSE BASELINE ===
    // Baseline = housing + food + other, each a flat part plus a
    // per-person part scaled by members + dependents. Computed once at
    // household construction and held fixed for the life of the run.
    /// Flat housing cost per month
    pub housing_base: f64,
    /// Additional housing cost per household person
    pub housing_per_person: f64,
    /// Flat food cost per month
    pub food_base: f64,
    /// Additional food cost per household person
    pub food_per_person: f64,
    /// Flat cost of everything else per month
    pub other_base: f64,
    /// Additional other cost per household person
    pub other_per_person: f64,

    // === MONTHLY VARIANCE ===
    /// Half-width of the uniform expense variance band
    ///
    /// Each simulated month multiplies expenses by (1 + U) with U drawn
    /// uniformly from [-expense_variance, expense_variance]. At the
    /// default 0.10, expenses swing up to 10% either way. Set to 0.0
    /// for fully deterministic runs.
    pub expense_variance: f64,

    // === SPATIAL PLACEMENT ===
    /// Fraction of a community's radius available for household placement
    ///
    /// Households are placed uniformly within `radius * placement_margin`
    /// of the origin, leaving a margin at the community edge.
    pub placement_margin: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            housing_base: 1500.0,
            housing_per_person: 400.0,
            food_base: 300.0,
            food_per_person: 150.0,
            other_base: 500.0,
            other_per_person: 100.0,

            expense_variance: 0.10,

            placement_margin: 0.8,
        }
    }
}

impl EconomyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with the expense variance band collapsed to zero,
    /// for reproducible runs and exact-value tests.
    pub fn deterministic() -> Self {
        Self {
            expense_variance: 0.0,
            ..Self::default()
        }
    }

    /// Monthly expense baseline for a household of `persons` people
    /// (members plus dependents)
    pub fn expense_baseline(&self, persons: u32) -> f64 {
        let n = persons as f64;
        let housing = self.housing_base + self.housing_per_person * n;
        let food = self.food_base + self.food_per_person * n;
        let other = self.other_base + self.other_per_person * n;
        housing + food + other
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.expense_variance < 0.0 || self.expense_variance >= 1.0 {
            return Err(format!(
                "expense_variance ({}) must be in [0, 1)",
                self.expense_variance
            ));
        }

        if self.placement_margin <= 0.0 || self.placement_margin > 1.0 {
            return Err(format!(
                "placement_margin ({}) must be in (0, 1]",
                self.placement_margin
            ));
        }

        if self.housing_base < 0.0 || self.food_base < 0.0 || self.other_base < 0.0 {
            return Err("Expense baselines must be non-negative".into());
        }

        Ok(())
    }
}

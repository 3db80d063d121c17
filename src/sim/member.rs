//! Household member - the individual income earner

use serde::{Deserialize, Serialize};

/// Occupation categories with fixed base incomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Professional,
    SkilledTrade,
    Service,
    Retail,
    Unemployed,
}

/// Income is reduced outside the prime working years
pub const PRIME_AGE_FACTOR: f64 = 1.2;
pub const OFF_PEAK_AGE_FACTOR: f64 = 0.8;

impl Occupation {
    pub const ALL: [Occupation; 5] = [
        Occupation::Professional,
        Occupation::SkilledTrade,
        Occupation::Service,
        Occupation::Retail,
        Occupation::Unemployed,
    ];

    /// Monthly base income in currency units
    pub fn base_income(&self) -> f64 {
        match self {
            Occupation::Professional => 8000.0,
            Occupation::SkilledTrade => 5000.0,
            Occupation::Service => 3000.0,
            Occupation::Retail => 2500.0,
            Occupation::Unemployed => 0.0,
        }
    }

    /// Parse an occupation name as it appears in scenario files.
    /// Returns None for unrecognized names; callers fall back to Unemployed.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "professional" => Some(Occupation::Professional),
            "skilled_trade" => Some(Occupation::SkilledTrade),
            "service" => Some(Occupation::Service),
            "retail" => Some(Occupation::Retail),
            "unemployed" => Some(Occupation::Unemployed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Occupation::Professional => "professional",
            Occupation::SkilledTrade => "skilled_trade",
            Occupation::Service => "service",
            Occupation::Retail => "retail",
            Occupation::Unemployed => "unemployed",
        }
    }
}

/// An individual household member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub age: u32,
    pub occupation: Occupation,
    pub is_working: bool,
}

impl Member {
    pub fn new(age: u32, occupation: Occupation, is_working: bool) -> Self {
        Self {
            age,
            occupation,
            is_working,
        }
    }

    /// Monthly income: occupation base times age factor, zero when not
    /// working. Unemployed members earn nothing regardless of the flag.
    pub fn monthly_income(&self) -> f64 {
        if !self.is_working {
            return 0.0;
        }
        self.occupation.base_income() * self.age_factor()
    }

    /// Earnings peak in the 25-50 band and taper outside 25-65
    fn age_factor(&self) -> f64 {
        if (25..=50).contains(&self.age) {
            PRIME_AGE_FACTOR
        } else if self.age < 25 || self.age > 65 {
            OFF_PEAK_AGE_FACTOR
        } else {
            1.0
        }
    }
}

//! Typed scenario configuration
//!
//! Replaces ad-hoc key-value setup with named, defaulted fields that
//! can be read from a TOML file. Unrecognized occupation names degrade
//! to Unemployed rather than failing the whole build; structurally
//! invalid parameters (non-positive radius or multipliers) are errors.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::Path;

use crate::core::config::EconomyConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CommunityId, HouseholdId};
use crate::sim::community::Community;
use crate::sim::generation::generate_members;
use crate::sim::household::Household;
use crate::sim::member::{Member, Occupation};
use crate::sim::simulation::Simulation;

/// A complete simulation scenario
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub communities: Vec<CommunityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    pub id: Option<String>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_multiplier")]
    pub economic_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub cost_of_living_index: f64,
    #[serde(default)]
    pub households: Vec<HouseholdConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdConfig {
    /// Member count; a random 1-6 when absent and no occupations given
    pub members: Option<u32>,
    #[serde(default)]
    pub dependents: u32,
    /// Explicit occupations by name; members are auto-generated when empty
    #[serde(default)]
    pub occupations: Vec<String>,
    #[serde(default = "default_savings_rate")]
    pub savings_rate: f64,
    #[serde(default)]
    pub initial_wealth: f64,
}

fn default_radius() -> f64 {
    100.0
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_savings_rate() -> f64 {
    0.15
}

impl ScenarioConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build a simulation from this scenario, seeding all construction
    /// randomness (member generation, placement) from `seed`.
    pub fn build(&self, seed: u64) -> Result<Simulation> {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut communities = Vec::with_capacity(self.communities.len());
        for (i, community_config) in self.communities.iter().enumerate() {
            communities.push(community_config.build(i, &config, &mut rng)?);
        }

        tracing::info!(communities = communities.len(), seed, "scenario built");
        Ok(Simulation::from_parts(config, communities, rng))
    }
}

impl CommunityConfig {
    fn build(&self, index: usize, config: &EconomyConfig, rng: &mut impl Rng) -> Result<Community> {
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("Town_{:02}", index + 1));

        if self.radius <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "community {id}: radius must be positive, got {}",
                self.radius
            )));
        }
        if self.economic_multiplier <= 0.0 || self.cost_of_living_index <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "community {id}: multipliers must be positive"
            )));
        }

        let mut community = Community::new(
            CommunityId::new(id.clone()),
            self.radius,
            self.economic_multiplier,
            self.cost_of_living_index,
        );

        for (i, household_config) in self.households.iter().enumerate() {
            let household_id = HouseholdId::new(format!("{}_HH{:03}", id, i + 1));
            let household = household_config.build(household_id, config, rng);
            community.add_household(household, config, rng);
        }

        Ok(community)
    }
}

impl HouseholdConfig {
    fn build(&self, id: HouseholdId, config: &EconomyConfig, rng: &mut impl Rng) -> Household {
        let member_count = self.members.unwrap_or_else(|| rng.gen_range(1..=6));

        let members = if self.occupations.is_empty() {
            generate_members(member_count, rng)
        } else {
            self.occupations
                .iter()
                .take(member_count as usize)
                .enumerate()
                .map(|(i, name)| {
                    let occupation = Occupation::from_name(name).unwrap_or_else(|| {
                        tracing::warn!(occupation = %name, household = %id, "unknown occupation, defaulting to unemployed");
                        Occupation::Unemployed
                    });

                    let age = if i == 0 {
                        rng.gen_range(25..=65)
                    } else {
                        rng.gen_range(0..=80)
                    };
                    let is_working =
                        (18..=65).contains(&age) && occupation != Occupation::Unemployed;

                    Member::new(age, occupation, is_working)
                })
                .collect()
        };

        Household::new(
            id,
            members,
            self.dependents,
            self.savings_rate,
            self.initial_wealth,
            config,
        )
    }
}

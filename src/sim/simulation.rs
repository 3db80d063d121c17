//! Top-level time-stepping controller

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CommunityId, HouseholdId, Month};
use crate::sim::community::Community;
use crate::sim::household::{Household, ShockKind};

/// The simulation: a set of communities plus the month counter.
///
/// Single-threaded by design. All randomness (placement, expense
/// variance, shock targeting) flows through the owned seeded generator,
/// so a run is reproducible from its seed.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub communities: Vec<Community>,
    /// Completed step calls since construction or last reset
    pub current_month: Month,
    pub is_paused: bool,
    pub config: EconomyConfig,
    rng: ChaCha8Rng,
}

/// Aggregate statistics across every household in every community
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalStatistics {
    pub total_households: usize,
    pub total_communities: usize,
    pub current_month: Month,
    pub average_wealth: f64,
    pub total_wealth: f64,
    pub min_wealth: f64,
    pub max_wealth: f64,
}

impl Simulation {
    /// Create an empty simulation with default economy constants
    pub fn new(seed: u64) -> Self {
        Self::with_config(EconomyConfig::default(), seed)
    }

    pub fn with_config(config: EconomyConfig, seed: u64) -> Self {
        Self {
            communities: Vec::new(),
            current_month: 0,
            is_paused: false,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Assemble a simulation from pre-built communities, taking over the
    /// generator that built them so the whole run stays one seeded stream.
    pub fn from_parts(config: EconomyConfig, communities: Vec<Community>, rng: ChaCha8Rng) -> Self {
        Self {
            communities,
            current_month: 0,
            is_paused: false,
            config,
            rng,
        }
    }

    pub fn add_community(&mut self, community: Community) {
        self.communities.push(community);
    }

    pub fn community(&self, id: &CommunityId) -> Option<&Community> {
        self.communities.iter().find(|c| &c.id == id)
    }

    pub fn community_mut(&mut self, id: &CommunityId) -> Option<&mut Community> {
        self.communities.iter_mut().find(|c| &c.id == id)
    }

    /// Add a household to the named community; placement uses the
    /// simulation's own generator.
    pub fn add_household(&mut self, community_id: &CommunityId, household: Household) -> Result<()> {
        let config = &self.config;
        let rng = &mut self.rng;
        let community = self
            .communities
            .iter_mut()
            .find(|c| &c.id == community_id)
            .ok_or_else(|| SimError::UnknownCommunity(community_id.to_string()))?;

        community.add_household(household, config, rng);
        Ok(())
    }

    /// Simulate `months` months. A no-op while paused; once started, a
    /// multi-month step always runs to completion. Pause only takes
    /// effect on the next call to step or run_until, never mid-step.
    pub fn step(&mut self, months: u32) {
        if self.is_paused {
            return;
        }

        for _ in 0..months {
            for community in &mut self.communities {
                community.simulate_month(&self.config, &mut self.rng);
            }
            self.current_month += 1;
        }
    }

    /// Step one month at a time until the target month is reached.
    /// A no-op if paused or if the target is already behind us.
    pub fn run_until(&mut self, target_month: Month) {
        while self.current_month < target_month && !self.is_paused {
            self.step(1);
        }
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.is_paused = false;
    }

    /// Apply an economic shock to one household. Targeting for job-loss
    /// shocks uses the simulation's generator.
    pub fn apply_shock(
        &mut self,
        community_id: &CommunityId,
        household_id: &HouseholdId,
        kind: ShockKind,
        magnitude: f64,
    ) -> Result<()> {
        let rng = &mut self.rng;
        let community = self
            .communities
            .iter_mut()
            .find(|c| &c.id == community_id)
            .ok_or_else(|| SimError::UnknownCommunity(community_id.to_string()))?;
        let household = community
            .household_mut(household_id)
            .ok_or_else(|| SimError::UnknownHousehold(household_id.to_string()))?;

        household.apply_shock(kind, magnitude, rng);
        Ok(())
    }

    /// Return to month 0: wealth and histories are cleared in place.
    /// Membership, economic parameters, and member state mutated by
    /// prior shocks all persist.
    pub fn reset(&mut self) {
        self.current_month = 0;
        for community in &mut self.communities {
            for household in &mut community.households {
                household.reset();
            }
            community.reset_metrics();
        }
        tracing::info!("simulation reset to month 0");
    }

    /// Aggregate statistics over every household everywhere.
    /// None when no households exist.
    pub fn global_statistics(&self) -> Option<GlobalStatistics> {
        let wealths: Vec<f64> = self
            .communities
            .iter()
            .flat_map(|c| c.households.iter().map(|h| h.wealth))
            .collect();

        if wealths.is_empty() {
            return None;
        }

        let total: f64 = wealths.iter().sum();
        let min = wealths.iter().copied().fold(f64::INFINITY, f64::min);
        let max = wealths.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(GlobalStatistics {
            total_households: wealths.len(),
            total_communities: self.communities.len(),
            current_month: self.current_month,
            average_wealth: total / wealths.len() as f64,
            total_wealth: total,
            min_wealth: min,
            max_wealth: max,
        })
    }
}

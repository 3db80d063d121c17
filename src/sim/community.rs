//! Community - a circular town of households sharing economic conditions

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::core::types::{CommunityId, HouseholdId, Vec2};
use crate::sim::household::Household;

/// A circular town containing households
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    /// Radius of the town's disk in world units
    pub radius: f64,
    /// Local economic health (0.5 = struggling, 1.5 = prosperous)
    pub economic_multiplier: f64,
    /// Local cost multiplier (0.8 = cheap, 1.5 = expensive)
    pub cost_of_living_index: f64,

    /// Membership order is insertion order
    pub households: Vec<Household>,

    // Collective metrics, recomputed after every simulated month
    pub total_wealth: f64,
    pub average_wealth: f64,
    /// One average-wealth sample per simulated month
    pub wealth_history: Vec<f64>,
}

/// Wealth distribution statistics over current household wealth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WealthDistribution {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub total: f64,
}

impl Community {
    pub fn new(
        id: CommunityId,
        radius: f64,
        economic_multiplier: f64,
        cost_of_living_index: f64,
    ) -> Self {
        Self {
            id,
            radius,
            economic_multiplier,
            cost_of_living_index,
            households: Vec::new(),
            total_wealth: 0.0,
            average_wealth: 0.0,
            wealth_history: Vec::new(),
        }
    }

    /// Add a household, placing it uniformly at random within
    /// `radius * placement_margin` of the origin. The location is
    /// assigned exactly once, here.
    pub fn add_household(
        &mut self,
        mut household: Household,
        config: &EconomyConfig,
        rng: &mut impl Rng,
    ) {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let distance = rng.gen_range(0.0..=self.radius * config.placement_margin);
        household.location = Vec2::new(distance * angle.cos(), distance * angle.sin());
        self.households.push(household);
    }

    pub fn household(&self, id: &HouseholdId) -> Option<&Household> {
        self.households.iter().find(|h| &h.id == id)
    }

    pub fn household_mut(&mut self, id: &HouseholdId) -> Option<&mut Household> {
        self.households.iter_mut().find(|h| &h.id == id)
    }

    /// Simulate one month for every household, then recompute the
    /// collective metrics. An empty community still records a 0.0
    /// history sample, so community histories always count time-steps.
    pub fn simulate_month(&mut self, config: &EconomyConfig, rng: &mut impl Rng) {
        for household in &mut self.households {
            household.simulate_month(
                config,
                self.cost_of_living_index,
                self.economic_multiplier,
                rng,
            );
        }

        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.households.is_empty() {
            self.total_wealth = 0.0;
            self.average_wealth = 0.0;
            self.wealth_history.push(0.0);
            return;
        }

        self.total_wealth = self.households.iter().map(|h| h.wealth).sum();
        self.average_wealth = self.total_wealth / self.households.len() as f64;
        self.wealth_history.push(self.average_wealth);
    }

    /// Wealth distribution over current household wealth. The median is
    /// the element at index n/2 in ascending order (for even n, the upper
    /// of the two middle elements, not an average).
    pub fn wealth_distribution(&self) -> Option<WealthDistribution> {
        if self.households.is_empty() {
            return None;
        }

        let mut wealths: Vec<f64> = self.households.iter().map(|h| h.wealth).collect();
        wealths.sort_by(f64::total_cmp);

        let n = wealths.len();
        let total: f64 = wealths.iter().sum();

        Some(WealthDistribution {
            min: wealths[0],
            max: wealths[n - 1],
            mean: total / n as f64,
            median: wealths[n / 2],
            total,
        })
    }

    /// Discrete Gini coefficient over current household wealth
    /// (0 = perfect equality, 1 = perfect inequality).
    ///
    /// Returns 0.0 for fewer than two households or zero total wealth.
    /// Negative wealths flow through the formula unclamped, so values
    /// outside [0, 1] are possible after uncapped shocks.
    pub fn gini_coefficient(&self) -> f64 {
        if self.households.len() < 2 {
            return 0.0;
        }

        let mut wealths: Vec<f64> = self.households.iter().map(|h| h.wealth).collect();
        wealths.sort_by(f64::total_cmp);

        let n = wealths.len();
        let total: f64 = wealths.iter().sum();
        if total == 0.0 {
            return 0.0;
        }

        let cumsum: f64 = wealths
            .iter()
            .enumerate()
            .map(|(i, w)| w * (2.0 * (i as f64 + 1.0) - n as f64 - 1.0))
            .sum();

        cumsum / (n as f64 * total)
    }

    /// Clear collective history; household state is reset by the caller
    pub fn reset_metrics(&mut self) {
        self.total_wealth = 0.0;
        self.average_wealth = 0.0;
        self.wealth_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::member::{Member, Occupation};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn household_with_wealth(id: &str, wealth: f64, config: &EconomyConfig) -> Household {
        Household::new(
            HouseholdId::new(id),
            vec![Member::new(40, Occupation::Service, true)],
            0,
            0.15,
            wealth,
            config,
        )
    }

    fn community_with_wealths(wealths: &[f64]) -> Community {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut community = Community::new(CommunityId::new("Test"), 100.0, 1.0, 1.0);
        for (i, &w) in wealths.iter().enumerate() {
            let household = household_with_wealth(&format!("HH{:03}", i + 1), w, &config);
            community.add_household(household, &config, &mut rng);
        }
        community
    }

    #[test]
    fn test_placement_within_margin() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut community = Community::new(CommunityId::new("Spatial"), 50.0, 1.0, 1.0);

        for i in 0..200 {
            let household = household_with_wealth(&format!("HH{:03}", i), 0.0, &config);
            community.add_household(household, &config, &mut rng);
        }

        for household in &community.households {
            assert!(household.location.length() <= 50.0 * 0.8 + 1e-9);
        }
    }

    #[test]
    fn test_average_equals_total_over_count() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut community = community_with_wealths(&[0.0, 0.0, 0.0]);

        for _ in 0..6 {
            community.simulate_month(&config, &mut rng);
            let expected = community.total_wealth / community.households.len() as f64;
            assert_eq!(community.average_wealth, expected);
        }
        assert_eq!(community.wealth_history.len(), 6);
    }

    #[test]
    fn test_empty_community_still_counts_timesteps() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut community = Community::new(CommunityId::new("Ghost"), 100.0, 1.0, 1.0);

        community.simulate_month(&config, &mut rng);
        community.simulate_month(&config, &mut rng);

        assert_eq!(community.wealth_history, vec![0.0, 0.0]);
        assert_eq!(community.total_wealth, 0.0);
        assert_eq!(community.average_wealth, 0.0);
        assert!(community.wealth_distribution().is_none());
    }

    #[test]
    fn test_wealth_distribution_median_upper_middle() {
        // Even count: median is the upper of the two middle elements
        let community = community_with_wealths(&[400.0, 100.0, 300.0, 200.0]);
        let dist = community.wealth_distribution().unwrap();

        assert_eq!(dist.min, 100.0);
        assert_eq!(dist.max, 400.0);
        assert_eq!(dist.mean, 250.0);
        assert_eq!(dist.median, 300.0);
        assert_eq!(dist.total, 1000.0);
    }

    #[test]
    fn test_gini_equal_wealths_is_zero() {
        let community = community_with_wealths(&[100.0, 100.0, 100.0]);
        assert_eq!(community.gini_coefficient(), 0.0);
    }

    #[test]
    fn test_gini_known_value() {
        let community = community_with_wealths(&[0.0, 0.0, 100.0]);
        let gini = community.gini_coefficient();
        assert!((gini - 200.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_gini_degenerate_cases() {
        assert_eq!(community_with_wealths(&[500.0]).gini_coefficient(), 0.0);
        assert_eq!(community_with_wealths(&[]).gini_coefficient(), 0.0);
        // Zero total wealth
        assert_eq!(community_with_wealths(&[0.0, 0.0]).gini_coefficient(), 0.0);
    }

    #[test]
    fn test_gini_negative_wealth_unclamped() {
        // Negative wealths are applied as-is and may push the
        // coefficient outside [0, 1]
        let community = community_with_wealths(&[-100.0, 10.0, 100.0]);
        let gini = community.gini_coefficient();
        // cumsum = -100*(-2) + 10*0 + 100*2 = 400; total = 10; n = 3
        assert!((gini - 400.0 / 30.0).abs() < 1e-12);
        assert!(gini > 1.0);
    }
}

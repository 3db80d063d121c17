//! Household - the financial unit that accumulates wealth month by month

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::core::types::{HouseholdId, Vec2};
use crate::sim::member::{Member, Occupation};

/// A household of members plus dependents, positioned within a community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: HouseholdId,
    pub members: Vec<Member>,
    /// Children/elderly who consume but do not earn
    pub dependents: u32,
    /// Position within the owning community, assigned once at insertion
    pub location: Vec2,

    pub wealth: f64,
    /// Fraction of positive net income saved each month
    pub savings_rate: f64,
    /// Monthly expense baseline, fixed at construction from household size
    expense_baseline: f64,

    // Parallel histories, one entry per simulated month
    pub wealth_history: Vec<f64>,
    pub income_history: Vec<f64>,
    pub expense_history: Vec<f64>,
}

/// Snapshot of a single simulated month, returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthOutcome {
    pub income: f64,
    pub expenses: f64,
    pub net_income: f64,
    pub savings: f64,
    pub wealth: f64,
}

/// Economic shocks a household can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShockKind {
    /// A random working member loses their job, irreversibly
    JobLoss,
    /// Large unexpected expense; magnitude is expected to be negative
    Medical,
    /// Unexpected income; magnitude is expected to be positive
    Windfall,
}

impl ShockKind {
    /// Parse a shock name as it appears at the command boundary.
    /// Unknown names yield None; applying an unknown shock is a no-op
    /// by contract, never an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "job_loss" => Some(ShockKind::JobLoss),
            "medical" => Some(ShockKind::Medical),
            "windfall" => Some(ShockKind::Windfall),
            _ => None,
        }
    }
}

impl Household {
    /// Create a household from explicit members. The expense baseline is
    /// computed here, once, from member and dependent counts.
    pub fn new(
        id: HouseholdId,
        members: Vec<Member>,
        dependents: u32,
        savings_rate: f64,
        initial_wealth: f64,
        config: &EconomyConfig,
    ) -> Self {
        let persons = members.len() as u32 + dependents;
        let expense_baseline = config.expense_baseline(persons);

        Self {
            id,
            members,
            dependents,
            location: Vec2::default(),
            wealth: initial_wealth,
            savings_rate,
            expense_baseline,
            wealth_history: Vec::new(),
            income_history: Vec::new(),
            expense_history: Vec::new(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn expense_baseline(&self) -> f64 {
        self.expense_baseline
    }

    /// Total household monthly income, before any local multiplier
    pub fn total_income(&self) -> f64 {
        self.members.iter().map(|m| m.monthly_income()).sum()
    }

    /// Advance this household's finances by one month.
    ///
    /// Exactly one entry lands in each history per call. Negative net
    /// income neither draws down wealth nor accrues debt; only positive
    /// net contributes, scaled by the savings rate.
    pub fn simulate_month(
        &mut self,
        config: &EconomyConfig,
        cost_of_living_index: f64,
        economic_multiplier: f64,
        rng: &mut impl Rng,
    ) -> MonthOutcome {
        let income = self.total_income() * economic_multiplier;

        let mut expenses = self.expense_baseline * cost_of_living_index;
        if config.expense_variance > 0.0 {
            let v = config.expense_variance;
            expenses *= 1.0 + rng.gen_range(-v..=v);
        }

        let net_income = income - expenses;
        let savings = if net_income > 0.0 {
            net_income * self.savings_rate
        } else {
            0.0
        };

        self.wealth += savings;

        self.wealth_history.push(self.wealth);
        self.income_history.push(income);
        self.expense_history.push(expenses);

        MonthOutcome {
            income,
            expenses,
            net_income,
            savings,
            wealth: self.wealth,
        }
    }

    /// Apply an economic shock. Magnitude is added to wealth unvalidated
    /// for medical and windfall shocks; job loss ignores it.
    pub fn apply_shock(&mut self, kind: ShockKind, magnitude: f64, rng: &mut impl Rng) {
        match kind {
            ShockKind::JobLoss => {
                let working: Vec<usize> = self
                    .members
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.is_working && m.occupation != Occupation::Unemployed)
                    .map(|(i, _)| i)
                    .collect();

                if working.is_empty() {
                    return;
                }

                let idx = working[rng.gen_range(0..working.len())];
                let member = &mut self.members[idx];
                member.occupation = Occupation::Unemployed;
                member.is_working = false;
                tracing::debug!(household = %self.id, member = idx, "job loss shock applied");
            }
            ShockKind::Medical | ShockKind::Windfall => {
                self.wealth += magnitude;
            }
        }
    }

    /// Clear wealth and histories in place. Members, shocks already
    /// applied to them, and the expense baseline all persist.
    pub fn reset(&mut self) {
        self.wealth = 0.0;
        self.wealth_history.clear();
        self.income_history.clear();
        self.expense_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_member_household(config: &EconomyConfig) -> Household {
        Household::new(
            HouseholdId::new("HH001"),
            vec![
                Member::new(35, Occupation::Professional, true),
                Member::new(32, Occupation::Unemployed, false),
            ],
            0,
            0.20,
            0.0,
            config,
        )
    }

    #[test]
    fn test_expense_baseline_from_household_size() {
        let config = EconomyConfig::default();
        let household = two_member_household(&config);
        // (1500+800) + (300+300) + (500+200)
        assert_eq!(household.expense_baseline(), 3600.0);
    }

    #[test]
    fn test_deterministic_month() {
        let config = EconomyConfig::deterministic();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = household.simulate_month(&config, 1.0, 1.0, &mut rng);

        assert_eq!(outcome.income, 9600.0);
        assert_eq!(outcome.expenses, 3600.0);
        assert_eq!(outcome.net_income, 6000.0);
        assert_eq!(outcome.savings, 1200.0);
        assert_eq!(outcome.wealth, 1200.0);
        assert_eq!(household.wealth, 1200.0);
    }

    #[test]
    fn test_histories_grow_in_lockstep() {
        let config = EconomyConfig::default();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for month in 1..=12 {
            household.simulate_month(&config, 1.1, 0.9, &mut rng);
            assert_eq!(household.wealth_history.len(), month);
            assert_eq!(household.income_history.len(), month);
            assert_eq!(household.expense_history.len(), month);
        }
    }

    #[test]
    fn test_negative_net_income_does_not_dissave() {
        let config = EconomyConfig::deterministic();
        let mut household = Household::new(
            HouseholdId::new("HH002"),
            vec![Member::new(40, Occupation::Retail, true)],
            3,
            0.15,
            500.0,
            &config,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // Retail income 2500*1.2 = 3000 < baseline for 4 persons (4900)
        let outcome = household.simulate_month(&config, 1.0, 1.0, &mut rng);

        assert!(outcome.net_income < 0.0);
        assert_eq!(outcome.savings, 0.0);
        assert_eq!(household.wealth, 500.0);
        // The bad month is still recorded
        assert_eq!(household.wealth_history.len(), 1);
    }

    #[test]
    fn test_expense_variance_stays_in_band() {
        let config = EconomyConfig::default();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..100 {
            let outcome = household.simulate_month(&config, 1.0, 1.0, &mut rng);
            assert!(outcome.expenses >= 3600.0 * 0.9 - 1e-9);
            assert!(outcome.expenses <= 3600.0 * 1.1 + 1e-9);
        }
    }

    #[test]
    fn test_job_loss_shock_is_irreversible_unemployment() {
        let config = EconomyConfig::default();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        household.apply_shock(ShockKind::JobLoss, 0.0, &mut rng);

        // Only the professional was eligible
        assert_eq!(household.members[0].occupation, Occupation::Unemployed);
        assert!(!household.members[0].is_working);
        assert_eq!(household.total_income(), 0.0);
    }

    #[test]
    fn test_job_loss_with_no_workers_is_noop() {
        let config = EconomyConfig::default();
        let mut household = Household::new(
            HouseholdId::new("HH003"),
            vec![Member::new(70, Occupation::Unemployed, false)],
            0,
            0.15,
            0.0,
            &config,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        household.apply_shock(ShockKind::JobLoss, -100.0, &mut rng);
        assert_eq!(household.wealth, 0.0);
        assert_eq!(household.members[0].age, 70);
    }

    #[test]
    fn test_medical_and_windfall_adjust_wealth_unvalidated() {
        let config = EconomyConfig::default();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        household.apply_shock(ShockKind::Windfall, 10_000.0, &mut rng);
        assert_eq!(household.wealth, 10_000.0);

        household.apply_shock(ShockKind::Medical, -25_000.0, &mut rng);
        assert_eq!(household.wealth, -15_000.0);
    }

    #[test]
    fn test_unknown_shock_name_parses_to_none() {
        assert_eq!(ShockKind::from_name("job_loss"), Some(ShockKind::JobLoss));
        assert_eq!(ShockKind::from_name("asteroid"), None);
    }

    #[test]
    fn test_reset_preserves_members_and_baseline() {
        let config = EconomyConfig::default();
        let mut household = two_member_household(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        household.apply_shock(ShockKind::JobLoss, 0.0, &mut rng);
        household.simulate_month(&config, 1.0, 1.0, &mut rng);
        household.reset();

        assert_eq!(household.wealth, 0.0);
        assert!(household.wealth_history.is_empty());
        assert!(household.income_history.is_empty());
        assert!(household.expense_history.is_empty());
        // Shock damage and baseline survive the reset
        assert_eq!(household.members[0].occupation, Occupation::Unemployed);
        assert_eq!(household.expense_baseline(), 3600.0);
    }
}

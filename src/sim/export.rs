//! Tabular export rows and state snapshots
//!
//! The core produces the rows; writing them to a CSV file is the
//! runner's job.

use serde::Serialize;

use crate::core::types::{CommunityId, HouseholdId, Month};
use crate::sim::community::Community;
use crate::sim::simulation::Simulation;

/// One (month, community, household) sample of the simulation history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRecord {
    pub month: Month,
    pub community_id: CommunityId,
    pub household_id: HouseholdId,
    pub wealth: f64,
    pub income: f64,
    pub expenses: f64,
    pub member_count: usize,
    pub dependent_count: u32,
    pub location_x: f64,
    pub location_y: f64,
}

/// Flatten the per-household histories into export rows, one per
/// (elapsed month, community, household) with a wealth sample for that
/// month. Income and expenses default to 0.0 when a history is shorter
/// than expected; uneven lengths never panic.
pub fn month_records(sim: &Simulation) -> Vec<MonthRecord> {
    let mut records = Vec::new();

    for month in 0..sim.current_month {
        for community in &sim.communities {
            for household in &community.households {
                let m = month as usize;
                let Some(&wealth) = household.wealth_history.get(m) else {
                    continue;
                };

                records.push(MonthRecord {
                    month,
                    community_id: community.id.clone(),
                    household_id: household.id.clone(),
                    wealth,
                    income: household.income_history.get(m).copied().unwrap_or(0.0),
                    expenses: household.expense_history.get(m).copied().unwrap_or(0.0),
                    member_count: household.member_count(),
                    dependent_count: household.dependents,
                    location_x: household.location.x,
                    location_y: household.location.y,
                });
            }
        }
    }

    records
}

/// Serializable snapshot of simulation state for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot<'a> {
    pub current_month: Month,
    pub is_paused: bool,
    pub communities: &'a [Community],
}

impl<'a> SimulationSnapshot<'a> {
    pub fn of(sim: &'a Simulation) -> Self {
        Self {
            current_month: sim.current_month,
            is_paused: sim.is_paused,
            communities: &sim.communities,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EconomyConfig;
    use crate::sim::generation::random_simulation;
    use crate::sim::household::Household;
    use crate::sim::member::{Member, Occupation};

    #[test]
    fn test_records_cover_every_month_and_household() {
        let mut sim = random_simulation(2, 4, 31);
        sim.step(6);

        let records = month_records(&sim);
        assert_eq!(records.len(), 6 * 2 * 4);

        // Months are emitted in order, every household each month
        assert_eq!(records[0].month, 0);
        assert_eq!(records.last().unwrap().month, 5);
    }

    #[test]
    fn test_records_empty_before_first_step() {
        let sim = random_simulation(1, 3, 31);
        assert!(month_records(&sim).is_empty());
    }

    #[test]
    fn test_uneven_histories_do_not_panic() {
        let mut sim = random_simulation(1, 2, 31);
        sim.step(4);

        // Truncate one household's income history to force the
        // out-of-range default path
        sim.communities[0].households[0].income_history.truncate(1);
        sim.communities[0].households[0].expense_history.clear();

        let records = month_records(&sim);
        assert_eq!(records.len(), 4 * 2);

        let truncated: Vec<&MonthRecord> = records
            .iter()
            .filter(|r| r.household_id == sim.communities[0].households[0].id)
            .collect();
        assert_eq!(truncated[1].income, 0.0);
        assert_eq!(truncated[0].expenses, 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = Simulation::with_config(EconomyConfig::deterministic(), 1);
        sim.add_community(crate::sim::community::Community::new(
            CommunityId::new("Town"),
            100.0,
            1.0,
            1.0,
        ));
        let config = sim.config.clone();
        let household = Household::new(
            HouseholdId::new("Town_HH001"),
            vec![Member::new(35, Occupation::Professional, true)],
            0,
            0.20,
            0.0,
            &config,
        );
        sim.add_household(&CommunityId::new("Town"), household).unwrap();
        sim.step(2);

        let json = SimulationSnapshot::of(&sim).to_json();
        assert!(json.contains("\"current_month\": 2"));
        assert!(json.contains("Town_HH001"));
    }
}

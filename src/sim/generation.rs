//! Random generation of members, households, and communities

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EconomyConfig;
use crate::core::types::{CommunityId, HouseholdId};
use crate::sim::community::Community;
use crate::sim::household::Household;
use crate::sim::member::{Member, Occupation};
use crate::sim::simulation::Simulation;

/// Generate random household members.
///
/// The first member is always a working-age adult (25-65); the rest can
/// be any age 0-80. Members outside 18-65 are forced to Unemployed, and
/// only the 18-65 band works.
pub fn generate_members(count: u32, rng: &mut impl Rng) -> Vec<Member> {
    (0..count)
        .map(|i| {
            let age = if i == 0 {
                rng.gen_range(25..=65)
            } else {
                rng.gen_range(0..=80)
            };

            let mut occupation = Occupation::ALL[rng.gen_range(0..Occupation::ALL.len())];
            if !(18..=65).contains(&age) {
                occupation = Occupation::Unemployed;
            }

            Member::new(age, occupation, (18..=65).contains(&age))
        })
        .collect()
}

/// Generate a household with random size, dependents, and savings rate
pub fn generate_household(id: HouseholdId, config: &EconomyConfig, rng: &mut impl Rng) -> Household {
    let member_count = rng.gen_range(1..=6);
    let dependents = rng.gen_range(0..=3);
    let savings_rate = rng.gen_range(0.05..0.25);

    let members = generate_members(member_count, rng);
    Household::new(id, members, dependents, savings_rate, 0.0, config)
}

/// Generate a community full of random households.
///
/// Economic multiplier and cost-of-living index default to random draws
/// (0.7-1.3 and 0.8-1.4) when not supplied.
pub fn generate_community(
    id: CommunityId,
    num_households: u32,
    radius: f64,
    economic_multiplier: Option<f64>,
    cost_of_living_index: Option<f64>,
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> Community {
    let economic_multiplier = economic_multiplier.unwrap_or_else(|| rng.gen_range(0.7..1.3));
    let cost_of_living_index = cost_of_living_index.unwrap_or_else(|| rng.gen_range(0.8..1.4));

    let mut community = Community::new(id.clone(), radius, economic_multiplier, cost_of_living_index);

    for i in 0..num_households {
        let household_id = HouseholdId::new(format!("{}_HH{:03}", id, i + 1));
        let household = generate_household(household_id, config, rng);
        community.add_household(household, config, rng);
    }

    tracing::info!(
        community = %id,
        households = num_households,
        economic_multiplier,
        cost_of_living_index,
        "generated community"
    );

    community
}

/// Fully random simulation: `num_communities` towns of
/// `households_per_community` households each
pub fn random_simulation(num_communities: u32, households_per_community: u32, seed: u64) -> Simulation {
    let config = EconomyConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let communities = (0..num_communities)
        .map(|i| {
            generate_community(
                CommunityId::new(format!("Town_{:02}", i + 1)),
                households_per_community,
                100.0,
                None,
                None,
                &config,
                &mut rng,
            )
        })
        .collect();

    Simulation::from_parts(config, communities, rng)
}

/// The canonical three-town example: one prosperous, one struggling,
/// one balanced.
pub fn example_simulation(seed: u64) -> Simulation {
    let config = EconomyConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let communities = vec![
        generate_community(
            CommunityId::new("Prosperity"),
            15,
            100.0,
            Some(1.4),
            Some(1.1),
            &config,
            &mut rng,
        ),
        generate_community(
            CommunityId::new("Struggleville"),
            18,
            100.0,
            Some(0.7),
            Some(1.3),
            &config,
            &mut rng,
        ),
        generate_community(
            CommunityId::new("Balance"),
            12,
            100.0,
            Some(1.0),
            Some(1.0),
            &config,
            &mut rng,
        ),
    ];

    Simulation::from_parts(config, communities, rng)
}

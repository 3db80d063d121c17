//! Circleverse runner - builds a simulation, steps it, and reports
//!
//! All simulation logic lives in the library; this binary only drives
//! the core and writes its output.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use circleverse::core::error::Result;
use circleverse::scenario::ScenarioConfig;
use circleverse::sim::{self, month_records, Simulation, SimulationSnapshot};

#[derive(Parser, Debug)]
#[command(name = "circleverse", about = "Household wealth formation simulation")]
struct Args {
    /// Seed for all randomness in the run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Months to simulate
    #[arg(long, default_value_t = 120)]
    months: u32,

    /// TOML scenario file (default: the built-in three-town example)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Random setup: number of communities and households per community
    #[arg(long, num_args = 2, value_names = ["COMMUNITIES", "HOUSEHOLDS"])]
    random: Option<Vec<u32>>,

    /// Write per-month household rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write a JSON snapshot of the final state to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circleverse=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut simulation = build_simulation(&args)?;
    tracing::info!(
        communities = simulation.communities.len(),
        months = args.months,
        seed = args.seed,
        "starting run"
    );

    simulation.run_until(args.months);

    print_report(&simulation);

    if let Some(path) = &args.export {
        write_csv(&simulation, path)?;
        println!("Exported rows to {}", path.display());
    }

    if let Some(path) = &args.snapshot {
        std::fs::write(path, SimulationSnapshot::of(&simulation).to_json())?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn build_simulation(args: &Args) -> Result<Simulation> {
    if let Some(path) = &args.scenario {
        return ScenarioConfig::load(path)?.build(args.seed);
    }
    if let Some(random) = &args.random {
        return Ok(sim::random_simulation(random[0], random[1], args.seed));
    }
    Ok(sim::example_simulation(args.seed))
}

fn print_report(simulation: &Simulation) {
    println!("Month {}", simulation.current_month);
    println!("===============================");

    for community in &simulation.communities {
        println!(
            "{}: {} households, avg wealth {:.2}, gini {:.3}",
            community.id,
            community.households.len(),
            community.average_wealth,
            community.gini_coefficient(),
        );
    }

    match simulation.global_statistics() {
        Some(stats) => {
            println!(
                "Global: {} households in {} communities, avg {:.2}, total {:.2}, range [{:.2}, {:.2}]",
                stats.total_households,
                stats.total_communities,
                stats.average_wealth,
                stats.total_wealth,
                stats.min_wealth,
                stats.max_wealth,
            );
        }
        None => println!("Global: no households"),
    }
}

fn write_csv(simulation: &Simulation, path: &PathBuf) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "Month,Community_ID,Household_ID,Wealth,Income,Expenses,Num_Members,Num_Dependents,Location_X,Location_Y"
    )?;

    for record in month_records(simulation) {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{}",
            record.month,
            record.community_id,
            record.household_id,
            record.wealth,
            record.income,
            record.expenses,
            record.member_count,
            record.dependent_count,
            record.location_x,
            record.location_y,
        )?;
    }

    Ok(())
}

//! Household Wealth Simulation
//!
//! The simulation core: members earn, households save, communities
//! aggregate, and the simulation steps everything month by month.
//! Presentation and file output consume this module's public state.

pub mod community;
pub mod export;
pub mod generation;
pub mod household;
pub mod member;
pub mod simulation;

pub use community::{Community, WealthDistribution};
pub use export::{month_records, MonthRecord, SimulationSnapshot};
pub use generation::{example_simulation, random_simulation};
pub use household::{Household, MonthOutcome, ShockKind};
pub use member::{Member, Occupation};
pub use simulation::{GlobalStatistics, Simulation};

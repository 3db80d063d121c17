//! Circleverse - Household Wealth Formation Simulation

pub mod core;
pub mod scenario;
pub mod sim;

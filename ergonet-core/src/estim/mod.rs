//! Outer drivers: loading a run, simulating, and estimating.
//!
//! The samplers are the inner loop; these drivers own the fixed-point
//! iteration around them. They are deliberately free of file output
//! (apart from simulation snapshots): callers decide what to persist.

mod ee;
mod load;
mod simulate;

pub use self::{
    ee::{EstimationReport, estimate_ee, estimate_ee_parallel},
    load::load_run,
    simulate::{SimulationReport, simulate},
};

#[cfg(test)]
mod tests;

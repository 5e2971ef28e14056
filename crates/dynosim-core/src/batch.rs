//! Batch simulation
//!
//! Each configuration is simulated independently. With the `parallel`
//! feature the work is spread over the rayon thread pool; results keep the
//! input order either way.

use crate::config::EngineConfiguration;
use crate::error::SimResult;
use crate::simulator::{simulate, Simulation};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Simulate every configuration, preserving input order
pub fn simulate_all(configs: &[EngineConfiguration]) -> Vec<SimResult<Simulation>> {
    #[cfg(feature = "parallel")]
    let results = configs.par_iter().map(simulate).collect();

    #[cfg(not(feature = "parallel"))]
    let results = configs.iter().map(simulate).collect();

    results
}

/// Index of the configuration with the highest peak power among successful runs
///
/// Ties go to the earlier run.
pub fn strongest<E>(results: &[Result<Simulation, E>]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.as_ref().ok().map(|sim| (i, sim.summary.peak_hp)))
        .fold(None, |best: Option<(usize, f64)>, (i, hp)| match best {
            Some((_, best_hp)) if best_hp >= hp => best,
            _ => Some((i, hp)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineType, ForcedInductionType};

    #[test]
    fn test_order_preserved_and_errors_isolated() {
        let na = EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 7500);
        let mut broken = na.clone();
        broken.cylinders = 0;
        let turbo = na
            .clone()
            .with_boost(EngineType::Turbo, ForcedInductionType::Single, 1.0);

        let results = simulate_all(&[na, broken, turbo]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(strongest(&results), Some(2));
    }

    #[test]
    fn test_strongest_of_nothing() {
        let empty: Vec<SimResult<Simulation>> = Vec::new();
        assert_eq!(strongest(&empty), None);
    }
}

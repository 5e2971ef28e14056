//! Simulation entry point
//!
//! Runs the full pipeline for one configuration:
//! base power and boost, the RPM grid and its VVL gains, the torque bell,
//! the sampled curve and finally its peaks. Nothing is cached between calls.

use crate::boost::boost_multiplier;
use crate::calibration::Calibration;
use crate::config::EngineConfiguration;
use crate::curve::{rpm_grid, synthesize, CurveShape, PerformanceCurve};
use crate::error::{SimResult, SimulationError};
use crate::peaks::CurveSummary;
use crate::power::BasePower;
use crate::vvl::VvlSettings;
use serde::{Deserialize, Serialize};

/// Intermediate quantities of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    /// Swept volume in liters
    pub displacement_l: f64,
    /// Naturally aspirated horsepower
    pub base_hp_na: f64,
    /// Forced induction multiplier; 1.0 when NA
    pub boost_multiplier: f64,
    /// Boosted power level that anchors the torque scale
    pub max_hp_base: f64,
    /// Model power peak, whole RPM
    pub peak_hp_rpm: u32,
    /// Torque bell center, whole RPM
    pub peak_torque_rpm: u32,
    /// Torque at the bell center before VVL gain
    pub max_torque: f64,
    /// Width of the torque bell in RPM
    pub sigma: f64,
}

/// Result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Sampled torque and horsepower
    pub curve: PerformanceCurve,
    /// Peaks of the curve
    pub summary: CurveSummary,
    /// Intermediate model quantities
    pub breakdown: ModelBreakdown,
}

impl Simulation {
    /// Split into the curve and its summary
    pub fn into_parts(self) -> (PerformanceCurve, CurveSummary) {
        (self.curve, self.summary)
    }
}

/// Simulate with the default calibration
pub fn simulate(config: &EngineConfiguration) -> SimResult<Simulation> {
    simulate_with(config, &Calibration::default())
}

/// Simulate with an explicit calibration
pub fn simulate_with(
    config: &EngineConfiguration,
    calibration: &Calibration,
) -> SimResult<Simulation> {
    config.validate()?;
    calibration.validate()?;

    let base = BasePower::compute(config, calibration);
    let multiplier = boost_multiplier(
        &config.engine_type,
        &config.forced_induction_type,
        config.boost_bar,
    );
    let max_hp_base = base.base_hp_na * multiplier;
    if !max_hp_base.is_finite() {
        return Err(SimulationError::Configuration(format!(
            "base power overflows for {:.3e} L displacement",
            base.displacement_l
        )));
    }

    let shape = CurveShape::derive(
        max_hp_base,
        config.redline_rpm,
        base.layout_torque_modifier,
        calibration,
    )?;

    tracing::debug!(
        displacement_l = base.displacement_l,
        base_hp_na = base.base_hp_na,
        boost_multiplier = multiplier,
        peak_hp_rpm = shape.peak_hp_rpm,
        peak_torque_rpm = shape.peak_torque_rpm,
        max_torque = shape.max_torque,
        "Derived curve shape"
    );

    let grid = rpm_grid(config.redline_rpm, calibration);
    let gains = VvlSettings::from_config(config, calibration).gains(&grid);
    let curve = synthesize(&grid, &shape, &gains, calibration)?;
    if let Some(sample) = curve
        .iter()
        .find(|s| !s.torque_nm.is_finite() || !s.horsepower.is_finite())
    {
        return Err(SimulationError::Configuration(format!(
            "curve is not finite at {:.0} RPM",
            sample.rpm
        )));
    }

    let summary = CurveSummary::from_curve(&curve).ok_or_else(|| {
        SimulationError::Configuration("simulation produced an empty curve".to_string())
    })?;

    Ok(Simulation {
        curve,
        summary,
        breakdown: ModelBreakdown {
            displacement_l: base.displacement_l,
            base_hp_na: base.base_hp_na,
            boost_multiplier: multiplier,
            max_hp_base,
            peak_hp_rpm: shape.peak_hp_rpm,
            peak_torque_rpm: shape.peak_torque_rpm,
            max_torque: shape.max_torque,
            sigma: shape.sigma,
        },
    })
}

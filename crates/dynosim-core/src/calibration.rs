//! Model calibration
//!
//! The curve model is empirical. Its shape is controlled by a handful of
//! constants that encode calibration choices rather than physics; they are
//! gathered here so they can be inspected and tuned together.

use crate::error::{SimResult, SimulationError};
use serde::{Deserialize, Serialize};

/// Number of samples in a performance curve
pub const SAMPLE_COUNT: usize = 1000;

/// First RPM of the sampled range
pub const GRID_START_RPM: f64 = 1000.0;

/// Naturally aspirated horsepower per liter per unit of compression ratio
pub const POWER_DENSITY: f64 = 10.0;

/// Conversion between horsepower and torque (N·m) times RPM
///
/// Plays the role 5252 plays for lb·ft. It is a fitted constant of this
/// model, not a derived one.
pub const HP_TORQUE_CONSTANT: f64 = 7127.0;

/// Fraction of redline at which the model places peak power
pub const PEAK_POWER_FRACTION: f64 = 0.85;

/// Fraction of redline at which the model centers the torque bell,
/// before the layout modifier
pub const PEAK_TORQUE_FRACTION: f64 = 0.65;

/// The torque bell's sigma is the RPM range divided by this
pub const TORQUE_SPREAD_DIVISOR: f64 = 3.5;

/// Width of the RPM window over which VVL gain ramps to full effect
pub const VVL_RAMP_RPM: f64 = 300.0;

/// Tunable constants of the curve model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Points sampled from the grid start to redline
    pub sample_count: usize,
    /// First RPM of the grid
    pub grid_start_rpm: f64,
    /// NA horsepower per liter per unit of compression ratio
    pub power_density: f64,
    /// Divisor relating torque times RPM to horsepower
    pub hp_torque_constant: f64,
    /// Fraction of redline placing peak power
    pub peak_power_fraction: f64,
    /// Fraction of redline centering the torque bell
    pub peak_torque_fraction: f64,
    /// RPM range over this gives the bell's sigma
    pub torque_spread_divisor: f64,
    /// Window over which VVL gain reaches full effect
    pub vvl_ramp_rpm: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            grid_start_rpm: GRID_START_RPM,
            power_density: POWER_DENSITY,
            hp_torque_constant: HP_TORQUE_CONSTANT,
            peak_power_fraction: PEAK_POWER_FRACTION,
            peak_torque_fraction: PEAK_TORQUE_FRACTION,
            torque_spread_divisor: TORQUE_SPREAD_DIVISOR,
            vvl_ramp_rpm: VVL_RAMP_RPM,
        }
    }
}

impl Calibration {
    /// Reject calibrations for which the model is undefined
    pub fn validate(&self) -> SimResult<()> {
        if self.sample_count < 2 {
            return Err(SimulationError::Configuration(format!(
                "sample count must be at least 2, got {}",
                self.sample_count
            )));
        }

        if !self.grid_start_rpm.is_finite() || self.grid_start_rpm < 0.0 {
            return Err(SimulationError::Configuration(format!(
                "grid start must be a non-negative RPM, got {}",
                self.grid_start_rpm
            )));
        }

        let positive = [
            ("power density", self.power_density),
            ("hp/torque constant", self.hp_torque_constant),
            ("peak power fraction", self.peak_power_fraction),
            ("peak torque fraction", self.peak_torque_fraction),
            ("torque spread divisor", self.torque_spread_divisor),
            ("VVL ramp width", self.vvl_ramp_rpm),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::Configuration(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

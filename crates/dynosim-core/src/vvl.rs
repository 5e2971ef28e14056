//! Variable valve lift gain profile
//!
//! Above the activation RPM the cam switches to its high-lift profile. The
//! model ramps the extra power and torque in linearly over a short window
//! and holds the full gain from there to redline.

use crate::calibration::Calibration;
use crate::config::{EngineConfiguration, VvlProfile};
use serde::{Deserialize, Serialize};

/// Multiplicative power and torque gain at one RPM
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VvlGain {
    /// Horsepower multiplier
    pub hp: f64,
    /// Torque multiplier
    pub torque: f64,
}

impl VvlGain {
    /// No gain
    pub const UNITY: VvlGain = VvlGain {
        hp: 1.0,
        torque: 1.0,
    };
}

/// Full-effect gain increments `(hp, torque)` of a cam profile
pub fn profile_increments(profile: &VvlProfile) -> (f64, f64) {
    match profile {
        VvlProfile::Mild => (0.05, 0.05),
        VvlProfile::Aggressive => (0.10, 0.08),
        VvlProfile::Unrecognized(_) => (0.0, 0.0),
    }
}

/// VVL settings extracted from a configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VvlSettings {
    /// Whether VVL is fitted
    pub enabled: bool,
    /// RPM above which the gain starts
    pub activation_rpm: f64,
    /// Cam profile
    pub profile: VvlProfile,
    /// Window to reach full gain
    pub ramp_rpm: f64,
}

impl VvlSettings {
    /// Settings of a configuration
    pub fn from_config(config: &EngineConfiguration, calibration: &Calibration) -> Self {
        Self {
            enabled: config.vvl_enabled,
            activation_rpm: f64::from(config.vvl_activation_rpm),
            profile: config.vvl_profile.clone(),
            ramp_rpm: calibration.vvl_ramp_rpm,
        }
    }

    /// Gain at a single RPM
    pub fn gain_at(&self, rpm: f64) -> VvlGain {
        if !self.enabled || rpm <= self.activation_rpm {
            return VvlGain::UNITY;
        }
        let scale = ((rpm - self.activation_rpm) / self.ramp_rpm).min(1.0);
        let (hp, torque) = profile_increments(&self.profile);
        VvlGain {
            hp: 1.0 + hp * scale,
            torque: 1.0 + torque * scale,
        }
    }

    /// Gain sequences for every RPM of a grid
    pub fn gains(&self, rpm_grid: &[f64]) -> VvlGains {
        let (hp, torque) = rpm_grid
            .iter()
            .map(|&rpm| {
                let gain = self.gain_at(rpm);
                (gain.hp, gain.torque)
            })
            .unzip();
        VvlGains { hp, torque }
    }
}

/// Per-sample VVL gains, parallel to an RPM grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VvlGains {
    /// Horsepower multiplier per sample
    pub hp: Vec<f64>,
    /// Torque multiplier per sample
    pub torque: Vec<f64>,
}

impl VvlGains {
    /// Number of samples covered
    pub fn len(&self) -> usize {
        self.hp.len()
    }

    /// True when no samples are covered
    pub fn is_empty(&self) -> bool {
        self.hp.is_empty()
    }
}

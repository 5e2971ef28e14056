//! Peak extraction

use crate::curve::PerformanceCurve;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maxima of a performance curve and where they occur
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Highest horsepower on the curve
    pub peak_hp: f64,
    /// RPM of the first sample reaching `peak_hp`
    pub peak_hp_rpm: f64,
    /// Highest torque on the curve, N·m
    pub peak_torque: f64,
    /// RPM of the first sample reaching `peak_torque`
    pub peak_torque_rpm: f64,
}

impl CurveSummary {
    /// Scan a curve for its maxima
    ///
    /// Ties resolve to the lowest RPM. Returns `None` for an empty curve.
    pub fn from_curve(curve: &PerformanceCurve) -> Option<Self> {
        let first = curve.samples().first()?;
        let mut summary = CurveSummary {
            peak_hp: first.horsepower,
            peak_hp_rpm: first.rpm,
            peak_torque: first.torque_nm,
            peak_torque_rpm: first.rpm,
        };

        for sample in &curve.samples()[1..] {
            if sample.horsepower > summary.peak_hp {
                summary.peak_hp = sample.horsepower;
                summary.peak_hp_rpm = sample.rpm;
            }
            if sample.torque_nm > summary.peak_torque {
                summary.peak_torque = sample.torque_nm;
                summary.peak_torque_rpm = sample.rpm;
            }
        }

        Some(summary)
    }
}

impl fmt::Display for CurveSummary {
    /// Values are truncated to whole units, the way chart annotations show them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} HP @ {} RPM, {} Nm @ {} RPM",
            self.peak_hp.trunc(),
            self.peak_hp_rpm.trunc(),
            self.peak_torque.trunc(),
            self.peak_torque_rpm.trunc()
        )
    }
}

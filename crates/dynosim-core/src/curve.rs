//! Torque and horsepower curve synthesis
//!
//! Torque follows a single Gaussian bell centered on the torque peak, with a
//! spread proportional to the usable RPM range. Horsepower is derived from
//! torque through the model's hp/torque constant, then scaled by the VVL power
//! gain on its own, so the two curves part slightly once VVL engages.

use crate::calibration::Calibration;
use crate::error::{SimResult, SimulationError};
use crate::vvl::VvlGains;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One point of a performance curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    /// Engine speed
    pub rpm: f64,
    /// Torque in N·m
    pub torque_nm: f64,
    /// Power in horsepower
    pub horsepower: f64,
}

/// Sampled torque and horsepower over the RPM range, in ascending RPM order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceCurve {
    samples: Vec<CurveSample>,
}

impl PerformanceCurve {
    /// All samples in RPM order
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True for a curve with no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over samples
    pub fn iter(&self) -> std::slice::Iter<'_, CurveSample> {
        self.samples.iter()
    }

    /// RPM of every sample
    pub fn rpm(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.rpm)
    }

    /// Torque of every sample
    pub fn torque(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.torque_nm)
    }

    /// Horsepower of every sample
    pub fn horsepower(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.horsepower)
    }

    /// Write the curve as CSV with an `rpm,torque_nm,horsepower` header
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "rpm,torque_nm,horsepower")?;
        for sample in &self.samples {
            writeln!(
                writer,
                "{:.3},{:.6},{:.6}",
                sample.rpm, sample.torque_nm, sample.horsepower
            )?;
        }
        writer.flush()
    }
}

impl<'a> IntoIterator for &'a PerformanceCurve {
    type Item = &'a CurveSample;
    type IntoIter = std::slice::Iter<'a, CurveSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Uniform RPM grid from the calibrated start to redline, both inclusive
///
/// The last point is set to the redline exactly rather than accumulated.
pub fn rpm_grid(redline_rpm: u32, calibration: &Calibration) -> Vec<f64> {
    let start = calibration.grid_start_rpm;
    let stop = f64::from(redline_rpm);
    let count = calibration.sample_count;
    let step = (stop - start) / (count - 1) as f64;

    (0..count)
        .map(|i| {
            if i == count - 1 {
                stop
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}

/// Parameters of the torque bell for one engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveShape {
    /// Model power peak; anchors the torque scale
    pub peak_hp_rpm: u32,
    /// Center of the torque bell
    pub peak_torque_rpm: u32,
    /// Torque at the bell center before VVL gain
    pub max_torque: f64,
    /// Standard deviation of the bell in RPM
    pub sigma: f64,
}

impl CurveShape {
    /// Derive the bell from peak power, redline and layout
    ///
    /// Both peak RPMs are truncated to whole RPM before use.
    pub fn derive(
        max_hp_base: f64,
        redline_rpm: u32,
        layout_torque_modifier: f64,
        calibration: &Calibration,
    ) -> SimResult<Self> {
        let redline = f64::from(redline_rpm);
        let peak_hp_rpm = (redline * calibration.peak_power_fraction).floor() as u32;
        let peak_torque_rpm =
            (redline * calibration.peak_torque_fraction * layout_torque_modifier).floor() as u32;

        if peak_hp_rpm == 0 {
            return Err(SimulationError::Configuration(format!(
                "peak power RPM truncates to zero for a redline of {redline_rpm}"
            )));
        }

        let sigma = (redline - calibration.grid_start_rpm) / calibration.torque_spread_divisor;
        if sigma <= 0.0 {
            return Err(SimulationError::Configuration(format!(
                "redline {redline_rpm} leaves no RPM range above {}",
                calibration.grid_start_rpm
            )));
        }

        let max_torque = max_hp_base * calibration.hp_torque_constant / f64::from(peak_hp_rpm);

        Ok(Self {
            peak_hp_rpm,
            peak_torque_rpm,
            max_torque,
            sigma,
        })
    }

    /// Torque before VVL gain at one RPM
    pub fn base_torque_at(&self, rpm: f64) -> f64 {
        let offset = rpm - f64::from(self.peak_torque_rpm);
        self.max_torque * (-(offset * offset) / (2.0 * self.sigma * self.sigma)).exp()
    }
}

/// Build the curve from a grid, a bell and the VVL gains for that grid
pub fn synthesize(
    rpm_grid: &[f64],
    shape: &CurveShape,
    gains: &VvlGains,
    calibration: &Calibration,
) -> SimResult<PerformanceCurve> {
    if gains.hp.len() != rpm_grid.len() || gains.torque.len() != rpm_grid.len() {
        return Err(SimulationError::Configuration(format!(
            "VVL gains cover {} samples but the grid has {}",
            gains.len(),
            rpm_grid.len()
        )));
    }

    let samples = rpm_grid
        .iter()
        .zip(gains.hp.iter().zip(&gains.torque))
        .map(|(&rpm, (&hp_gain, &torque_gain))| {
            let torque_nm = shape.base_torque_at(rpm) * torque_gain;
            let horsepower = torque_nm * rpm / calibration.hp_torque_constant * hp_gain;
            CurveSample {
                rpm,
                torque_nm,
                horsepower,
            }
        })
        .collect();

    Ok(PerformanceCurve { samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vvl::VvlGain;

    fn unity_gains(len: usize) -> VvlGains {
        VvlGains {
            hp: vec![VvlGain::UNITY.hp; len],
            torque: vec![VvlGain::UNITY.torque; len],
        }
    }

    #[test]
    fn test_grid_endpoints_and_spacing() {
        let grid = rpm_grid(7500, &Calibration::default());
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 1000.0);
        assert_eq!(grid[999], 7500.0);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
        let step = 6500.0 / 999.0;
        assert!((grid[1] - grid[0] - step).abs() < 1e-9);
    }

    #[test]
    fn test_shape_for_reference_redline() {
        let shape = CurveShape::derive(209.7, 7500, 1.0, &Calibration::default()).unwrap();
        assert_eq!(shape.peak_hp_rpm, 6375);
        assert_eq!(shape.peak_torque_rpm, 4875);
        assert!((shape.sigma - 6500.0 / 3.5).abs() < 1e-9);
        assert!((shape.max_torque - 209.7 * 7127.0 / 6375.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_shifts_torque_peak() {
        let v = CurveShape::derive(200.0, 7500, 1.10, &Calibration::default()).unwrap();
        let boxer = CurveShape::derive(200.0, 7500, 0.85, &Calibration::default()).unwrap();
        assert_eq!(v.peak_torque_rpm, 5362);
        assert_eq!(boxer.peak_torque_rpm, 4143);
    }

    #[test]
    fn test_zero_peak_power_rpm_is_configuration_error() {
        let calibration = Calibration {
            peak_power_fraction: 1e-6,
            ..Default::default()
        };
        let err = CurveShape::derive(200.0, 7500, 1.0, &calibration).unwrap_err();
        assert!(matches!(err, SimulationError::Configuration(_)));
    }

    #[test]
    fn test_torque_peaks_at_bell_center() {
        let shape = CurveShape::derive(200.0, 7500, 1.0, &Calibration::default()).unwrap();
        let center = shape.base_torque_at(4875.0);
        assert!((center - shape.max_torque).abs() < 1e-9);
        assert!(shape.base_torque_at(3000.0) < center);
        assert!(shape.base_torque_at(7000.0) < center);
    }

    #[test]
    fn test_synthesize_hp_from_torque() {
        let calibration = Calibration::default();
        let grid = rpm_grid(7500, &calibration);
        let shape = CurveShape::derive(200.0, 7500, 1.0, &calibration).unwrap();
        let curve = synthesize(&grid, &shape, &unity_gains(grid.len()), &calibration).unwrap();

        assert_eq!(curve.len(), 1000);
        for sample in curve.iter() {
            let expected = sample.torque_nm * sample.rpm / 7127.0;
            assert!((sample.horsepower - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mismatched_gains_rejected() {
        let calibration = Calibration::default();
        let grid = rpm_grid(7500, &calibration);
        let shape = CurveShape::derive(200.0, 7500, 1.0, &calibration).unwrap();
        assert!(synthesize(&grid, &shape, &unity_gains(10), &calibration).is_err());
    }

    #[test]
    fn test_csv_output() {
        let calibration = Calibration {
            sample_count: 3,
            ..Default::default()
        };
        let grid = rpm_grid(3000, &calibration);
        let shape = CurveShape::derive(100.0, 3000, 1.0, &calibration).unwrap();
        let curve = synthesize(&grid, &shape, &unity_gains(3), &calibration).unwrap();

        let mut out = Vec::new();
        curve.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "rpm,torque_nm,horsepower");
        assert!(lines[1].starts_with("1000.000,"));
        assert!(lines[3].starts_with("3000.000,"));
    }
}

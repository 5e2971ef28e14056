//! Text and JSON reports

use dynosim_core::prelude::*;
use dynosim_core::units::hp_to_kw;
use serde::Serialize;
use std::fmt;

/// Human readable report of one simulation
pub struct TextReport<'a> {
    config: &'a EngineConfiguration,
    sim: &'a Simulation,
    units: UnitSystem,
}

impl<'a> TextReport<'a> {
    pub fn new(config: &'a EngineConfiguration, sim: &'a Simulation, units: UnitSystem) -> Self {
        Self { config, sim, units }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        let units = self.units;
        let b = &self.sim.breakdown;
        let s = &self.sim.summary;

        writeln!(
            f,
            "Engine: {} {} {}-cyl, {} fuel, {} ambient",
            config.layout,
            config.engine_type,
            config.cylinders,
            config.fuel_type,
            config.ambient_condition
        )?;
        writeln!(
            f,
            "Bore x stroke: {:.2} x {:.2} {}",
            units.length(config.bore_mm),
            units.length(config.stroke_mm),
            units.length_unit()
        )?;
        if config.engine_type.is_forced() {
            writeln!(
                f,
                "Induction: {} at {:.2} {}",
                config.forced_induction_type,
                units.boost(config.boost_bar),
                units.boost_unit()
            )?;
        }
        if config.vvl_enabled {
            writeln!(
                f,
                "VVL: {} from {} RPM",
                config.vvl_profile, config.vvl_activation_rpm
            )?;
        }
        writeln!(
            f,
            "Displacement: {:.3} {}",
            units.displacement(b.displacement_l),
            units.displacement_unit()
        )?;
        writeln!(f, "NA base power: {:.1} HP", b.base_hp_na)?;
        writeln!(f, "Boost multiplier: {:.3}", b.boost_multiplier)?;
        writeln!(
            f,
            "Peak power: {:.1} HP ({:.1} kW) @ {:.0} RPM",
            s.peak_hp,
            hp_to_kw(s.peak_hp),
            s.peak_hp_rpm
        )?;
        writeln!(
            f,
            "Peak torque: {:.1} {} @ {:.0} RPM",
            units.torque(s.peak_torque),
            units.torque_unit(),
            s.peak_torque_rpm
        )
    }
}

/// JSON document for one simulation
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub config: &'a EngineConfiguration,
    pub breakdown: &'a ModelBreakdown,
    pub summary: &'a CurveSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<&'a PerformanceCurve>,
}

impl<'a> JsonReport<'a> {
    pub fn new(config: &'a EngineConfiguration, sim: &'a Simulation, with_curve: bool) -> Self {
        Self {
            config,
            breakdown: &sim.breakdown,
            summary: &sim.summary,
            curve: with_curve.then_some(&sim.curve),
        }
    }
}

/// One line per preset for `compare`
///
/// Errors print with their full cause chain.
pub fn comparison_line(name: &str, result: &anyhow::Result<Simulation>, best: bool) -> String {
    let marker = if best { '*' } else { ' ' };
    match result {
        Ok(sim) => format!("{marker} {name}: {}", sim.summary),
        Err(err) => format!("{marker} {name}: error: {err:#}"),
    }
}

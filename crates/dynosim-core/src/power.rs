//! Displacement and naturally aspirated base power
//!
//! Base power scales with swept volume and compression ratio, then with three
//! table-driven modifiers for cylinder layout, fuel and intake air. Every table
//! is an exhaustive match; unrecognized keywords resolve to [`NEUTRAL_MODIFIER`].

use crate::calibration::Calibration;
use crate::config::{AmbientCondition, EngineConfiguration, FuelType, Layout};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Multiplier applied for keywords outside a table
pub const NEUTRAL_MODIFIER: f64 = 1.0;

/// Swept volume in liters for bore and stroke in millimeters
pub fn displacement_liters(bore_mm: f64, stroke_mm: f64, cylinders: u32) -> f64 {
    let bore_m = bore_mm / 1000.0;
    let stroke_m = stroke_mm / 1000.0;
    (PI / 4.0) * bore_m.powi(2) * stroke_m * f64::from(cylinders) * 1000.0
}

/// Power modifier for a cylinder layout
pub fn layout_hp_modifier(layout: &Layout) -> f64 {
    match layout {
        Layout::Inline => 1.00,
        Layout::V => 1.05,
        Layout::Boxer => 0.97,
        Layout::Unrecognized(_) => NEUTRAL_MODIFIER,
    }
}

/// Shift of the torque peak for a cylinder layout
pub fn layout_torque_modifier(layout: &Layout) -> f64 {
    match layout {
        Layout::Inline => 1.00,
        Layout::V => 1.10,
        Layout::Boxer => 0.85,
        Layout::Unrecognized(_) => NEUTRAL_MODIFIER,
    }
}

/// Power modifier for a fuel
pub fn fuel_modifier(fuel: &FuelType) -> f64 {
    match fuel {
        FuelType::Gasoline => 1.00,
        FuelType::HighOctane => 1.05,
        FuelType::Diesel => 0.85,
        FuelType::E85 => 1.10,
        FuelType::Methanol => 1.12,
        FuelType::Lpg => 0.92,
        FuelType::Unrecognized(_) => NEUTRAL_MODIFIER,
    }
}

/// Power modifier for intake air condition
pub fn ambient_modifier(ambient: &AmbientCondition) -> f64 {
    match ambient {
        AmbientCondition::Normal => 1.00,
        AmbientCondition::Cold => 0.92,
        AmbientCondition::Hot => 0.95,
        AmbientCondition::Unrecognized(_) => NEUTRAL_MODIFIER,
    }
}

/// Naturally aspirated baseline and the modifiers that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePower {
    /// Swept volume in liters
    pub displacement_l: f64,
    /// Power multiplier of the cylinder layout
    pub layout_hp_modifier: f64,
    /// Not part of base power; carried forward to place the torque peak
    pub layout_torque_modifier: f64,
    /// Power multiplier of the fuel
    pub fuel_modifier: f64,
    /// Power multiplier of the intake air condition
    pub ambient_modifier: f64,
    /// Naturally aspirated horsepower
    pub base_hp_na: f64,
}

impl BasePower {
    /// Base power of a configuration
    pub fn compute(config: &EngineConfiguration, calibration: &Calibration) -> Self {
        let displacement_l = config.displacement_liters();
        let layout_hp_modifier = layout_hp_modifier(&config.layout);
        let fuel_modifier = fuel_modifier(&config.fuel_type);
        let ambient_modifier = ambient_modifier(&config.ambient_condition);

        let base_hp_na = displacement_l
            * config.compression_ratio
            * calibration.power_density
            * layout_hp_modifier
            * fuel_modifier
            * ambient_modifier;

        Self {
            displacement_l,
            layout_hp_modifier,
            layout_torque_modifier: layout_torque_modifier(&config.layout),
            fuel_modifier,
            ambient_modifier,
            base_hp_na,
        }
    }
}

//! Report units
//!
//! The model works in metric units throughout. These conversions only apply
//! when results are presented.

use serde::{Deserialize, Serialize};

/// Convert mechanical horsepower to kilowatts
pub fn hp_to_kw(hp: f64) -> f64 {
    hp * 0.745699872
}

/// Convert N·m to lb·ft
pub fn nm_to_lb_ft(nm: f64) -> f64 {
    nm * 0.7375621493
}

/// Convert bar to PSI
pub fn bar_to_psi(bar: f64) -> f64 {
    bar * 14.503773773020923
}

/// Convert millimeters to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Convert Liters to cubic inches
pub fn liters_to_cubic_inches(liters: f64) -> f64 {
    liters * 61.023744094732
}

/// Measurement system used for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// N·m, liters, millimeters and bar
    #[default]
    Metric,
    /// lb·ft, cubic inches, inches and psi
    Imperial,
}

impl UnitSystem {
    /// Torque in this system's unit, from N·m
    pub fn torque(&self, nm: f64) -> f64 {
        match self {
            UnitSystem::Metric => nm,
            UnitSystem::Imperial => nm_to_lb_ft(nm),
        }
    }

    /// Unit label for [`torque`](Self::torque)
    pub fn torque_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Nm",
            UnitSystem::Imperial => "lb-ft",
        }
    }

    /// Bore or stroke in this system's unit, from millimeters
    pub fn length(&self, mm: f64) -> f64 {
        match self {
            UnitSystem::Metric => mm,
            UnitSystem::Imperial => mm_to_inches(mm),
        }
    }

    /// Unit label for [`length`](Self::length)
    pub fn length_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "mm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Displacement in this system's unit, from liters
    pub fn displacement(&self, liters: f64) -> f64 {
        match self {
            UnitSystem::Metric => liters,
            UnitSystem::Imperial => liters_to_cubic_inches(liters),
        }
    }

    /// Unit label for [`displacement`](Self::displacement)
    pub fn displacement_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "L",
            UnitSystem::Imperial => "cu in",
        }
    }

    /// Boost in this system's unit, from bar
    pub fn boost(&self, bar: f64) -> f64 {
        match self {
            UnitSystem::Metric => bar,
            UnitSystem::Imperial => bar_to_psi(bar),
        }
    }

    /// Unit label for [`boost`](Self::boost)
    pub fn boost_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "bar",
            UnitSystem::Imperial => "psi",
        }
    }
}

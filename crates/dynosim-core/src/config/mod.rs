//! Engine configuration
//!
//! [`EngineConfiguration`] is the typed, validated input of the simulator.
//! It is normally produced by [`RawEngineConfig::normalize`] from loosely
//! typed key/value input such as a preset file or command line overrides.

mod keywords;
mod raw;

pub use keywords::{
    AmbientCondition, EngineType, ForcedInductionType, FuelType, Layout, VvlProfile,
};
pub use raw::{canonical_field, RawEngineConfig};

use crate::error::{SimResult, SimulationError};
use serde::{Deserialize, Serialize};

/// Lowest redline the model accepts; the RPM grid starts here
pub const MIN_REDLINE_RPM: u32 = 1000;

/// Canonical field names, in record order
#[allow(missing_docs)]
pub mod fields {
    pub const BORE_MM: &str = "bore_mm";
    pub const STROKE_MM: &str = "stroke_mm";
    pub const CYLINDERS: &str = "cylinders";
    pub const COMPRESSION_RATIO: &str = "compression_ratio";
    pub const REDLINE_RPM: &str = "redline_rpm";
    pub const ENGINE_TYPE: &str = "engine_type";
    pub const FORCED_INDUCTION_TYPE: &str = "forced_induction_type";
    pub const BOOST_BAR: &str = "boost_bar";
    pub const LAYOUT: &str = "layout";
    pub const FUEL_TYPE: &str = "fuel_type";
    pub const VVL_ENABLED: &str = "vvl_enabled";
    pub const VVL_ACTIVATION_RPM: &str = "vvl_activation_rpm";
    pub const VVL_PROFILE: &str = "vvl_profile";
    pub const AMBIENT_CONDITION: &str = "ambient_condition";

    /// Every canonical field
    pub const ALL: &[&str] = &[
        BORE_MM,
        STROKE_MM,
        CYLINDERS,
        COMPRESSION_RATIO,
        REDLINE_RPM,
        ENGINE_TYPE,
        FORCED_INDUCTION_TYPE,
        BOOST_BAR,
        LAYOUT,
        FUEL_TYPE,
        VVL_ENABLED,
        VVL_ACTIVATION_RPM,
        VVL_PROFILE,
        AMBIENT_CONDITION,
    ];
}

/// How the normalizer treats enum values outside the known keyword set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumPolicy {
    /// Keep the value, log a warning, and let lookups apply a neutral multiplier
    #[default]
    Lenient,
    /// Reject the value with a validation error
    Strict,
}

/// Options for [`RawEngineConfig::normalize_with`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// How unrecognized keywords are handled
    pub enum_policy: EnumPolicy,
}

impl NormalizeOptions {
    /// Options that reject unrecognized keywords
    pub fn strict() -> Self {
        Self {
            enum_policy: EnumPolicy::Strict,
        }
    }
}

/// A fully typed engine configuration
///
/// Serializes to the flat preset record: canonical field names, lower-case
/// enum keywords and plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfiguration {
    /// Cylinder bore in millimeters
    pub bore_mm: f64,
    /// Piston stroke in millimeters
    pub stroke_mm: f64,
    /// Number of cylinders
    pub cylinders: u32,
    /// Static compression ratio
    pub compression_ratio: f64,
    /// Highest RPM of the curve
    pub redline_rpm: u32,
    /// Aspiration
    pub engine_type: EngineType,
    /// Induction hardware; `None` for NA engines
    pub forced_induction_type: ForcedInductionType,
    /// Boost pressure in bar; 0 for NA engines
    pub boost_bar: f64,
    /// Cylinder arrangement
    pub layout: Layout,
    /// Fuel
    pub fuel_type: FuelType,
    /// Whether variable valve lift is fitted
    pub vvl_enabled: bool,
    /// RPM above which VVL engages; 0 when disabled
    pub vvl_activation_rpm: u32,
    /// VVL cam profile; `Mild` when disabled
    pub vvl_profile: VvlProfile,
    /// Intake air condition
    pub ambient_condition: AmbientCondition,
}

impl EngineConfiguration {
    /// Naturally aspirated engine with default layout, fuel and ambient
    pub fn naturally_aspirated(
        bore_mm: f64,
        stroke_mm: f64,
        cylinders: u32,
        compression_ratio: f64,
        redline_rpm: u32,
    ) -> Self {
        Self {
            bore_mm,
            stroke_mm,
            cylinders,
            compression_ratio,
            redline_rpm,
            engine_type: EngineType::Na,
            forced_induction_type: ForcedInductionType::None,
            boost_bar: 0.0,
            layout: Layout::Inline,
            fuel_type: FuelType::Gasoline,
            vvl_enabled: false,
            vvl_activation_rpm: 0,
            vvl_profile: VvlProfile::Mild,
            ambient_condition: AmbientCondition::Normal,
        }
    }

    /// Add forced induction to this configuration
    pub fn with_boost(
        mut self,
        engine_type: EngineType,
        forced_induction_type: ForcedInductionType,
        boost_bar: f64,
    ) -> Self {
        self.engine_type = engine_type;
        self.forced_induction_type = forced_induction_type;
        self.boost_bar = boost_bar;
        self
    }

    /// Enable variable valve lift above `activation_rpm`
    pub fn with_vvl(mut self, activation_rpm: u32, profile: VvlProfile) -> Self {
        self.vvl_enabled = true;
        self.vvl_activation_rpm = activation_rpm;
        self.vvl_profile = profile;
        self
    }

    /// Swept volume of all cylinders in liters
    pub fn displacement_liters(&self) -> f64 {
        crate::power::displacement_liters(self.bore_mm, self.stroke_mm, self.cylinders)
    }

    /// Check the numeric constraints of every field
    ///
    /// Enum fields are not checked here; unrecognized keywords are a
    /// normalization policy decision.
    pub fn validate(&self) -> SimResult<()> {
        require_positive(fields::BORE_MM, self.bore_mm)?;
        require_positive(fields::STROKE_MM, self.stroke_mm)?;
        require_positive(fields::COMPRESSION_RATIO, self.compression_ratio)?;

        if self.cylinders < 1 {
            return Err(SimulationError::validation(
                fields::CYLINDERS,
                "must be at least 1",
            ));
        }

        if self.redline_rpm <= MIN_REDLINE_RPM {
            return Err(SimulationError::validation(
                fields::REDLINE_RPM,
                format!(
                    "must be greater than {MIN_REDLINE_RPM}, got {}",
                    self.redline_rpm
                ),
            ));
        }

        if !self.boost_bar.is_finite() || self.boost_bar < 0.0 {
            return Err(SimulationError::validation(
                fields::BOOST_BAR,
                format!("must be a non-negative number, got {}", self.boost_bar),
            ));
        }

        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::validation(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}

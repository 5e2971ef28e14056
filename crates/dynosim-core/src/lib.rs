//! # DynoSim Core Library
//!
//! Empirical horsepower and torque curves for piston engines.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Engine configuration normalization and validation
//! - Displacement and naturally aspirated base power
//! - Forced induction and variable valve lift modifiers
//! - Sampled torque/horsepower curves and their peaks
//! - `.eng` preset files
//!
//! The model is closed-form and deterministic: the same configuration always
//! produces the same curve, and nothing is shared between runs.
//!
//! ## Example
//!
//! ```rust
//! use dynosim_core::prelude::*;
//!
//! let config = RawEngineConfig::new()
//!     .with("bore", "86")
//!     .with("stroke", "86")
//!     .with("cylinders", "4")
//!     .with("compression_ratio", "10.5")
//!     .with("redline", "7500")
//!     .with("engine_type", "na")
//!     .normalize()?;
//!
//! let (curve, summary) = simulate(&config)?.into_parts();
//! assert_eq!(curve.len(), 1000);
//! println!("{summary}");
//! # Ok::<(), dynosim_core::SimulationError>(())
//! ```

pub mod batch;
pub mod boost;
pub mod calibration;
pub mod config;
pub mod curve;
pub mod error;
pub mod peaks;
pub mod power;
pub mod preset;
pub mod simulator;
pub mod units;
pub mod vvl;

pub use error::{SimResult, SimulationError};
pub use simulator::{simulate, simulate_with, ModelBreakdown, Simulation};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::simulate_all;
    pub use crate::calibration::Calibration;
    pub use crate::config::{
        AmbientCondition, EngineConfiguration, EngineType, EnumPolicy, ForcedInductionType,
        FuelType, Layout, NormalizeOptions, RawEngineConfig, VvlProfile,
    };
    pub use crate::curve::{CurveSample, PerformanceCurve};
    pub use crate::error::{SimResult, SimulationError};
    pub use crate::peaks::CurveSummary;
    pub use crate::preset::{load_preset, save_preset};
    pub use crate::simulator::{simulate, simulate_with, ModelBreakdown, Simulation};
    pub use crate::units::UnitSystem;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

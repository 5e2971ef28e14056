//! Forced induction multiplier

use crate::config::{EngineType, ForcedInductionType};

/// Boost efficiency of a twin-scroll turbocharger
const TWIN_SCROLL_EFFICIENCY: f64 = 0.95;
/// Boost efficiency of any other single turbo arrangement
const TURBO_EFFICIENCY: f64 = 1.00;
/// Roots blowers lose more to parasitic drive than other superchargers
const ROOTS_EFFICIENCY: f64 = 0.85;
const SUPERCHARGER_EFFICIENCY: f64 = 0.90;
const TWIN_TURBO_EFFICIENCY: f64 = 0.97;
const TWINCHARGED_EFFICIENCY: f64 = 1.05;

/// Power gained per bar of boost for an induction setup
///
/// Zero for naturally aspirated and unrecognized engine types.
pub fn boost_efficiency(engine_type: &EngineType, forced: &ForcedInductionType) -> f64 {
    match engine_type {
        EngineType::Turbo => match forced {
            ForcedInductionType::TwinScroll => TWIN_SCROLL_EFFICIENCY,
            _ => TURBO_EFFICIENCY,
        },
        EngineType::Supercharger => match forced {
            ForcedInductionType::Roots => ROOTS_EFFICIENCY,
            _ => SUPERCHARGER_EFFICIENCY,
        },
        EngineType::TwinTurbo => TWIN_TURBO_EFFICIENCY,
        EngineType::Twincharged => TWINCHARGED_EFFICIENCY,
        EngineType::Na | EngineType::Unrecognized(_) => 0.0,
    }
}

/// Multiplier applied to naturally aspirated base power
///
/// Always at least 1.0 for non-negative boost.
pub fn boost_multiplier(
    engine_type: &EngineType,
    forced: &ForcedInductionType,
    boost_bar: f64,
) -> f64 {
    if !engine_type.is_forced() {
        return 1.0;
    }
    1.0 + boost_bar * boost_efficiency(engine_type, forced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_na_is_unity_regardless_of_boost() {
        assert_eq!(
            boost_multiplier(&EngineType::Na, &ForcedInductionType::Roots, 2.0),
            1.0
        );
        assert_eq!(
            boost_multiplier(
                &EngineType::Unrecognized("rotary".to_string()),
                &ForcedInductionType::None,
                1.0
            ),
            1.0
        );
    }

    #[test]
    fn test_twin_scroll_turbo() {
        let m = boost_multiplier(&EngineType::Turbo, &ForcedInductionType::TwinScroll, 1.0);
        assert!((m - 1.95).abs() < 1e-12);
        let m = boost_multiplier(&EngineType::Turbo, &ForcedInductionType::Single, 1.0);
        assert!((m - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_supercharger_variants() {
        let roots = boost_multiplier(&EngineType::Supercharger, &ForcedInductionType::Roots, 0.5);
        let centrifugal = boost_multiplier(
            &EngineType::Supercharger,
            &ForcedInductionType::Centrifugal,
            0.5,
        );
        assert!((roots - 1.425).abs() < 1e-12);
        assert!((centrifugal - 1.45).abs() < 1e-12);
    }

    #[test]
    fn test_twin_types_ignore_hardware() {
        let a = boost_multiplier(&EngineType::TwinTurbo, &ForcedInductionType::TwinTurbo, 1.0);
        let b = boost_multiplier(&EngineType::TwinTurbo, &ForcedInductionType::Single, 1.0);
        assert_eq!(a, b);
        assert!((a - 1.97).abs() < 1e-12);

        let c = boost_multiplier(
            &EngineType::Twincharged,
            &ForcedInductionType::Twincharged,
            1.0,
        );
        assert!((c - 2.05).abs() < 1e-12);
    }

    #[test]
    fn test_zero_boost_is_unity() {
        assert_eq!(
            boost_multiplier(&EngineType::Turbo, &ForcedInductionType::Single, 0.0),
            1.0
        );
    }
}

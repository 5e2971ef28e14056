//! Reference engines with known model outputs

use dynosim_core::prelude::*;
use pretty_assertions::assert_eq;

fn square_four() -> EngineConfiguration {
    EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 7500)
}

#[test]
fn test_naturally_aspirated_reference_engine() {
    let sim = simulate(&square_four()).unwrap();
    let b = sim.breakdown;

    assert!((b.displacement_l - 1.997).abs() < 0.005, "{}", b.displacement_l);
    assert!((b.base_hp_na - 209.7).abs() < 1.0, "{}", b.base_hp_na);
    assert_eq!(b.boost_multiplier, 1.0);
    assert_eq!(b.max_hp_base, b.base_hp_na);
    assert_eq!(b.peak_hp_rpm, 6375);
    assert_eq!(b.peak_torque_rpm, 4875);
    assert!((b.max_torque - 234.5).abs() < 2.0, "{}", b.max_torque);

    assert_eq!(sim.curve.len(), 1000);
    assert!(sim.curve.torque().all(|t| t >= 0.0));
    assert!(sim.curve.horsepower().all(|hp| hp >= 0.0));
}

#[test]
fn test_reference_engine_peaks() {
    let (curve, summary) = simulate(&square_four()).unwrap().into_parts();

    // The torque peak lands on the grid point closest to the bell center
    let step = 6500.0 / 999.0;
    assert!((summary.peak_torque_rpm - 4875.0).abs() <= step);
    assert!((summary.peak_torque - 234.5).abs() < 2.0);

    // Power peaks where d(rpm * torque)/d(rpm) = 0, above the torque peak
    assert!(summary.peak_hp_rpm > summary.peak_torque_rpm);
    assert!((summary.peak_hp_rpm - 5502.0).abs() < 2.0 * step);

    let max_hp = curve.horsepower().fold(f64::MIN, f64::max);
    assert_eq!(summary.peak_hp, max_hp);
}

#[test]
fn test_twin_scroll_turbo_reference_engine() {
    let config = square_four().with_boost(EngineType::Turbo, ForcedInductionType::TwinScroll, 1.0);
    let b = simulate(&config).unwrap().breakdown;

    assert!((b.boost_multiplier - 1.95).abs() < 1e-12);
    assert!((b.max_hp_base - 409.0).abs() < 2.0, "{}", b.max_hp_base);
}

#[test]
fn test_aggressive_vvl_reference_engine() {
    let config = EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 8200)
        .with_vvl(5500, VvlProfile::Aggressive);
    let sim = simulate(&config).unwrap();
    let plain = simulate(&EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 8200))
        .unwrap();

    for (with, without) in sim.curve.iter().zip(plain.curve.iter()) {
        if with.rpm <= 5500.0 {
            assert_eq!(with, without);
        } else if with.rpm >= 5800.0 {
            assert!((with.torque_nm / without.torque_nm - 1.08).abs() < 1e-12);
            // hp carries both the torque and the power gain
            assert!((with.horsepower / without.horsepower - 1.08 * 1.10).abs() < 1e-12);
        }
    }
}

#[test]
fn test_layouts_move_torque_peak() {
    let mut v = square_four();
    v.layout = Layout::V;
    let mut boxer = square_four();
    boxer.layout = Layout::Boxer;

    let inline_peak = simulate(&square_four()).unwrap().summary.peak_torque_rpm;
    let v_peak = simulate(&v).unwrap().summary.peak_torque_rpm;
    let boxer_peak = simulate(&boxer).unwrap().summary.peak_torque_rpm;

    assert!(boxer_peak < inline_peak);
    assert!(inline_peak < v_peak);
}

#[test]
fn test_fuel_and_ambient_scale_power() {
    let base = simulate(&square_four()).unwrap().summary;

    let mut methanol_cold = square_four();
    methanol_cold.fuel_type = FuelType::Methanol;
    methanol_cold.ambient_condition = AmbientCondition::Cold;
    let scaled = simulate(&methanol_cold).unwrap().summary;

    let factor = 1.12 * 0.92;
    assert!((scaled.peak_hp / base.peak_hp - factor).abs() < 1e-9);
    assert!((scaled.peak_torque / base.peak_torque - factor).abs() < 1e-9);
    assert_eq!(scaled.peak_hp_rpm, base.peak_hp_rpm);
}

#[test]
fn test_vvl_above_redline_never_engages() {
    let plain = EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 7500);
    let late = plain.clone().with_vvl(7500, VvlProfile::Aggressive);
    assert_eq!(simulate(&plain).unwrap(), simulate(&late).unwrap());
}

#[test]
fn test_summary_display() {
    let summary = simulate(&square_four()).unwrap().summary;
    let text = summary.to_string();
    assert!(text.contains(" HP @ "));
    assert!(text.contains(" Nm @ "));
}

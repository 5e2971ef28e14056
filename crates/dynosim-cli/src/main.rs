//! `dynosim` command line tool

mod report;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dynosim_core::batch::strongest;
use dynosim_core::preset::render_preset;
use dynosim_core::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dynosim")]
#[command(version)]
#[command(about = "Empirical horsepower and torque curves for piston engines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a preset and print its breakdown and peaks
    Run {
        /// Path to the `.eng` preset
        preset: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
        /// Include every curve sample in the JSON report
        #[arg(long, requires = "json")]
        full_curve: bool,
        /// Write the sampled curve as CSV
        #[arg(long, value_name = "OUT")]
        csv: Option<PathBuf>,
        /// Report torque, displacement and boost in imperial units
        #[arg(long)]
        imperial: bool,
    },
    /// Normalize a preset and print the resulting configuration
    Check {
        /// Path to the `.eng` preset
        preset: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Write an example naturally aspirated preset
    Template {
        /// Destination file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Simulate several presets and rank their peak power
    Compare {
        /// Paths to `.eng` presets
        #[arg(required = true)]
        presets: Vec<PathBuf>,
        /// Reject unrecognized keywords
        #[arg(long)]
        strict: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct Overrides {
    /// Override a preset field, e.g. `--set boost_bar=1.2`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Reject unrecognized keywords
    #[arg(long)]
    strict: bool,
}

impl Overrides {
    fn options(&self) -> NormalizeOptions {
        if self.strict {
            NormalizeOptions::strict()
        } else {
            NormalizeOptions::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load a preset, apply `--set` overrides and normalize
fn load_config(path: &Path, overrides: &Overrides) -> Result<EngineConfiguration> {
    let mut raw = load_preset(path)
        .with_context(|| format!("Failed to load preset {}", path.display()))?;
    for assignment in &overrides.set {
        raw.apply_assignment(assignment)
            .with_context(|| format!("Bad override '{assignment}'"))?;
    }
    debug!(fields = raw.len(), preset = %path.display(), "Preset loaded");

    raw.normalize_with(&overrides.options())
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

fn template_config() -> EngineConfiguration {
    EngineConfiguration::naturally_aspirated(86.0, 86.0, 4, 10.5, 7500)
}

fn run(
    preset: &Path,
    overrides: &Overrides,
    json: bool,
    full_curve: bool,
    csv: Option<&Path>,
    imperial: bool,
) -> Result<()> {
    let config = load_config(preset, overrides)?;
    let sim = simulate(&config).context("Simulation failed")?;

    if let Some(out) = csv {
        let file =
            File::create(out).with_context(|| format!("Failed to create {}", out.display()))?;
        sim.curve
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", out.display()))?;
        info!(path = %out.display(), samples = sim.curve.len(), "Curve written");
    }

    if json {
        let doc = report::JsonReport::new(&config, &sim, full_curve);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let units = if imperial {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        };
        print!("{}", report::TextReport::new(&config, &sim, units));
    }
    Ok(())
}

fn check(preset: &Path, overrides: &Overrides) -> Result<()> {
    let config = load_config(preset, overrides)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn template(out: Option<&Path>) -> Result<()> {
    let config = template_config();
    match out {
        Some(path) => {
            save_preset(path, &config)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Template written");
        }
        None => println!("{}", render_preset(&config)?),
    }
    Ok(())
}

/// Load, normalize and simulate every preset, keeping input order
///
/// A preset that fails to load keeps its own error; the others still run.
fn compare_presets(presets: &[PathBuf], strict: bool) -> Result<Vec<Result<Simulation>>> {
    let overrides = Overrides {
        set: Vec::new(),
        strict,
    };

    let loaded: Vec<Result<EngineConfiguration>> = presets
        .iter()
        .map(|path| load_config(path, &overrides))
        .collect();
    let configs: Vec<EngineConfiguration> = loaded
        .iter()
        .filter_map(|r| r.as_ref().ok().cloned())
        .collect();
    let mut simulated = simulate_all(&configs).into_iter();

    let mut results = Vec::with_capacity(presets.len());
    for entry in loaded {
        match entry {
            Ok(_) => match simulated.next() {
                Some(result) => results.push(result.context("Simulation failed")),
                None => bail!("Batch returned fewer results than configurations"),
            },
            Err(err) => results.push(Err(err)),
        }
    }
    Ok(results)
}

fn compare(presets: &[PathBuf], strict: bool) -> Result<()> {
    let results = compare_presets(presets, strict)?;
    let best = strongest(&results);

    for (i, (path, result)) in presets.iter().zip(&results).enumerate() {
        println!(
            "{}",
            report::comparison_line(&path.display().to_string(), result, best == Some(i))
        );
    }

    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 0 {
        bail!("{failures} of {} presets failed", presets.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            preset,
            overrides,
            json,
            full_curve,
            csv,
            imperial,
        } => run(&preset, &overrides, json, full_curve, csv.as_deref(), imperial),
        Commands::Check { preset, overrides } => check(&preset, &overrides),
        Commands::Template { out } => template(out.as_deref()),
        Commands::Compare { presets, strict } => compare(&presets, strict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "dynosim", "-v", "run", "a.eng", "--set", "boost_bar=1.2", "--set", "layout=v",
            "--strict", "--csv", "out.csv", "--imperial",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Run {
                preset,
                overrides,
                json,
                csv,
                imperial,
                ..
            } => {
                assert_eq!(preset, PathBuf::from("a.eng"));
                assert_eq!(overrides.set, vec!["boost_bar=1.2", "layout=v"]);
                assert!(overrides.strict);
                assert!(!json);
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(imperial);
            }
            other => panic!("Expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_full_curve_requires_json() {
        assert!(Cli::try_parse_from(["dynosim", "run", "a.eng", "--full-curve"]).is_err());
        assert!(Cli::try_parse_from(["dynosim", "run", "a.eng", "--json", "--full-curve"]).is_ok());
    }

    #[test]
    fn test_compare_requires_presets() {
        assert!(Cli::try_parse_from(["dynosim", "compare"]).is_err());
        let cli = Cli::try_parse_from(["dynosim", "compare", "a.eng", "b.eng"]).unwrap();
        assert!(matches!(cli.command, Commands::Compare { ref presets, .. } if presets.len() == 2));
    }

    #[test]
    fn test_template_round_trips_through_loader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.eng");
        template(Some(&path)).unwrap();

        let config = load_config(&path, &Overrides::default()).unwrap();
        assert_eq!(config, template_config());
    }

    #[test]
    fn test_overrides_applied_before_normalizing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("turbo.eng");
        save_preset(&path, &template_config()).unwrap();

        let overrides = Overrides {
            set: vec![
                "engine_type=turbo".to_string(),
                "forced_induction_type=single".to_string(),
                "boost=0.9".to_string(),
            ],
            strict: true,
        };
        let config = load_config(&path, &overrides).unwrap();
        assert_eq!(config.engine_type, EngineType::Turbo);
        assert_eq!(config.forced_induction_type, ForcedInductionType::Single);
        assert_eq!(config.boost_bar, 0.9);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("na.eng");
        save_preset(&path, &template_config()).unwrap();

        let overrides = Overrides {
            set: vec!["cylinders".to_string()],
            strict: false,
        };
        let err = load_config(&path, &overrides).unwrap_err();
        assert!(err.to_string().contains("Bad override 'cylinders'"));
    }

    #[test]
    fn test_compare_fails_when_any_preset_fails() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.eng");
        save_preset(&good, &template_config()).unwrap();
        let missing = dir.path().join("missing.eng");

        assert!(compare(&[good.clone()], false).is_ok());
        assert!(compare(&[good, missing], false).is_err());
    }

    #[test]
    fn test_compare_keeps_each_error_as_reported() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.eng");
        save_preset(&good, &template_config()).unwrap();
        let bad = dir.path().join("bad.eng");
        std::fs::write(&bad, r#"{"bore": "wide", "stroke": 86, "cylinders": 4,
            "compression_ratio": 10.5, "redline": 7500, "engine_type": "na"}"#)
        .unwrap();
        let missing = dir.path().join("missing.eng");

        let results = compare_presets(&[good, bad, missing], false).unwrap();
        assert!(results[0].is_ok());

        let bad_line = report::comparison_line("bad.eng", &results[1], false);
        assert!(bad_line.contains("Invalid value for 'bore_mm': 'wide' is not a number"));
        assert!(!bad_line.contains("Configuration error"));
        let validation = results[1]
            .as_ref()
            .unwrap_err()
            .downcast_ref::<SimulationError>()
            .and_then(|e| e.field());
        assert_eq!(validation, Some("bore_mm"));

        let missing_line = report::comparison_line("missing.eng", &results[2], false);
        assert!(missing_line.contains("I/O error: "));
        assert_eq!(missing_line.matches("os error").count(), 1);
        assert!(!missing_line.contains("Configuration error"));
    }
}

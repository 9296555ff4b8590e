//! chartline-bench: CLI tool for line-chart reduction experiments and diagnostics.
//!
//! Renders a series through the chart viewport and reducer with
//! configurable canvas size and render flags, printing reduction
//! diagnostics. Useful for:
//!
//! - Comparing straight and stepped output sizes
//! - Checking filled outlines for the baseline consistency warning
//! - Measuring reduction time on large series
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin chartline-bench -- [OPTIONS] [SERIES_PATH]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chartline_export::{StyledPath, SvgMetadata, to_svg};
use chartline_reduce::{
    ChartViewport, DataReducer, Dimensions, LineChartReducer, LinePath, Point,
    ReductionDiagnostics, RenderConfig,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Line-chart reduction experiments for chartline.
///
/// Renders a series at the given canvas size and prints how many
/// vertices the pixel-column reducer keeps.
#[derive(Parser)]
#[command(name = "chartline-bench", version)]
struct Cli {
    /// Path to a JSON array of `{"x": .., "y": ..}` samples.
    #[arg(required_unless_present = "synthetic")]
    series_path: Option<PathBuf>,

    /// Use a generated waveform with this many samples instead of a file.
    #[arg(long, conflicts_with = "series_path", value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    synthetic: Option<u32>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    height: u32,

    /// Draw horizontal-then-vertical steps between samples.
    #[arg(long)]
    stepped: bool,

    /// Close the line along the baseline and fill it.
    #[arg(long)]
    filled: bool,

    /// Full render config as a JSON string.
    ///
    /// When provided, `--stepped` and `--filled` are ignored.
    /// The JSON must be a valid `RenderConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Write raw and reduced paths to an SVG file.
    #[arg(long)]
    svg: Option<PathBuf>,
}

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 200;

/// Build a [`RenderConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<RenderConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(RenderConfig {
        stepped: cli.stepped,
        filled: cli.filled,
    })
}

/// Read a JSON series file.
fn load_series(path: &Path) -> Result<Vec<Point>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

/// Deterministic test waveform: a slow sine with a fast sawtooth and
/// hashed jitter on top, dense enough to stack many samples per pixel.
fn synthetic_series(samples: u32) -> Vec<Point> {
    (0..samples)
        .map(|i| {
            let t = f64::from(i);
            let sawtooth = f64::from(i % 37) / 37.0;
            let jitter = f64::from(i.wrapping_mul(2_654_435_761) >> 28) / 16.0;
            Point::new(t, (t * 0.002).sin().mul_add(20.0, sawtooth * 4.0 + jitter))
        })
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let (label, samples) = match (&cli.series_path, cli.synthetic) {
        (Some(path), _) => match load_series(path) {
            Ok(samples) => {
                let label = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("series")
                    .to_owned();
                (label, samples)
            }
            Err(msg) => {
                eprintln!("{msg}");
                return ExitCode::FAILURE;
            }
        },
        (None, Some(n)) => (format!("synthetic-{n}"), synthetic_series(n)),
        (None, None) => {
            eprintln!("Either SERIES_PATH or --synthetic is required");
            return ExitCode::FAILURE;
        }
    };

    let dimensions = Dimensions {
        width: cli.width,
        height: cli.height,
    };

    eprintln!("Series: {label} ({} samples)", samples.len());
    eprintln!("Canvas: {}x{}", dimensions.width, dimensions.height);
    eprintln!("Config: {config:?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let viewport = match ChartViewport::fit(&samples, dimensions) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid series: {e}");
            return ExitCode::FAILURE;
        }
    };
    let raw = match viewport.build_path(&samples, &config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Invalid series: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?viewport, vertices = raw.len(), "built raw path");

    let mut durations = Vec::with_capacity(cli.runs);
    let mut last = None;

    for run in 0..cli.runs {
        let start = Instant::now();
        let (reduced, diagnostics) = LineChartReducer.reduce_with_diagnostics(&raw, &config);
        let elapsed = start.elapsed();
        info!(run, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "reduction finished");
        durations.push(elapsed);

        if run == 0 {
            if cli.json {
                match serde_json::to_string_pretty(&diagnostics) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error serializing diagnostics: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", diagnostics.report());
                println!("{:<20} {:>10.3}ms", "Duration", elapsed.as_secs_f64() * 1000.0);
            }
        }
        last = Some((reduced, diagnostics));
    }

    if cli.runs > 1 {
        print_multi_run_summary(&durations);
    }

    // Write SVG from the last run only.
    if let Some(ref svg_path) = cli.svg
        && let Some((ref reduced, ref diagnostics)) = last
        && let Err(msg) = write_svg(
            svg_path,
            &label,
            config,
            dimensions,
            &raw,
            reduced,
            diagnostics,
        )
    {
        eprintln!("{msg}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Write the raw path in grey under the reduced path in black.
fn write_svg(
    svg_path: &Path,
    label: &str,
    config: RenderConfig,
    dimensions: Dimensions,
    raw: &LinePath,
    reduced: &LinePath,
    diagnostics: &ReductionDiagnostics,
) -> Result<(), String> {
    let config_json = serde_json::to_string(&config)
        .map_err(|e| format!("Error serializing config: {e}"))?;
    let desc = format!(
        "{} of {} vertices kept across {} pixel columns",
        diagnostics.output_points, diagnostics.input_points, diagnostics.columns,
    );
    let metadata = SvgMetadata {
        title: Some(label),
        description: Some(&desc),
        config_json: Some(&config_json),
    };
    let svg = to_svg(
        &[
            StyledPath::line(raw, "#c8c8c8"),
            StyledPath {
                path: reduced,
                stroke: "black",
                filled: config.filled,
            },
        ],
        dimensions,
        &metadata,
    );
    std::fs::write(svg_path, &svg)
        .map_err(|e| format!("Error writing SVG to {}: {e}", svg_path.display()))?;
    eprintln!("SVG written to {} ({} bytes)", svg_path.display(), svg.len());
    Ok(())
}

/// Print min/mean/max reduction time across runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(durations: &[Duration]) {
    debug_assert!(!durations.is_empty(), "no durations to summarize");

    println!();
    println!("Summary ({} runs)\n{}", durations.len(), "=".repeat(40));

    if durations.is_empty() {
        println!("Warning: no durations to summarize");
        return;
    }

    let millis: Vec<f64> = durations
        .iter()
        .map(|d| d.as_secs_f64() * 1000.0)
        .collect();

    let min = millis.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = millis.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = millis.iter().sum::<f64>() / millis.len() as f64;

    println!("Reduction: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = Cli::parse_from([
            "chartline-bench",
            "--synthetic",
            "10",
            "--stepped",
            "--config-json",
            r#"{"filled":true}"#,
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert!(!config.stepped);
        assert!(config.filled);
    }

    #[test]
    fn flags_build_config() {
        let cli = Cli::parse_from(["chartline-bench", "--synthetic", "10", "--stepped"]);
        let config = config_from_cli(&cli).unwrap();
        assert!(config.stepped);
        assert!(!config.filled);
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli = Cli::parse_from(["chartline-bench", "--synthetic", "10", "--config-json", "{"]);
        assert!(config_from_cli(&cli).unwrap_err().contains("--config-json"));
    }

    #[test]
    fn series_or_synthetic_required() {
        assert!(Cli::try_parse_from(["chartline-bench"]).is_err());
        assert!(Cli::try_parse_from(["chartline-bench", "a.json", "--synthetic", "5"]).is_err());
    }

    #[test]
    fn synthetic_series_is_deterministic_and_ascending() {
        let a = synthetic_series(1_000);
        let b = synthetic_series(1_000);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn write_svg_embeds_config_and_both_paths() {
        let samples = synthetic_series(500);
        let dims = Dimensions {
            width: 50,
            height: 20,
        };
        let config = RenderConfig {
            stepped: true,
            filled: true,
        };
        let viewport = ChartViewport::fit(&samples, dims).unwrap();
        let raw = viewport.build_path(&samples, &config).unwrap();
        let (reduced, diagnostics) = LineChartReducer.reduce_with_diagnostics(&raw, &config);

        let svg_path = std::env::temp_dir().join(format!(
            "chartline-bench-{}-write-svg.svg",
            std::process::id()
        ));
        write_svg(&svg_path, "synthetic", config, dims, &raw, &reduced, &diagnostics).unwrap();
        let svg = std::fs::read_to_string(&svg_path).unwrap();
        std::fs::remove_file(&svg_path).unwrap();

        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("<title>synthetic</title>"));
        assert!(svg.contains(r#""stepped":true"#));
        assert!(svg.contains(r#"fill="black""#));
    }

    #[test]
    fn synthetic_series_reduces() {
        let samples = synthetic_series(20_000);
        let dims = Dimensions {
            width: 100,
            height: 50,
        };
        let viewport = ChartViewport::fit(&samples, dims).unwrap();
        let raw = viewport.build_path(&samples, &RenderConfig::default()).unwrap();
        let reduced = LineChartReducer.reduce(&raw, &RenderConfig::default());
        assert!(reduced.len() <= 4 * 101);
    }
}

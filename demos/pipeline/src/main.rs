//! pipeline — command-line runner for the realty sales pipeline simulator.
//!
//! ```text
//! pipeline [--config run.json] [--overrides params.csv] [--listings listings.csv]
//!          [--seed N] [--days N] [--agents N] [--out DIR] [--verbose]
//! ```
//!
//! Without `--config` the built-in defaults are used (one year, 80 agents).
//! Writes `activity_log.csv`, `agent_utilization.csv`, `summary.csv` and
//! `report.json` to the output directory (default `output/pipeline`).
//! Set `RUST_LOG=info` for progress.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use re_core::{count_listings_csv, load_overrides_csv, PipelineConfig, MINUTES_PER_DAY};
use re_output::{CsvWriter, OutputWriter, SimOutputObserver};
use re_sim::{ActivityRecord, MetricsReport, SimBuilder, SimObserver};

const DEFAULT_OUT_DIR: &str = "output/pipeline";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    activity_rows: usize,
    critical_rows: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, activity_rows: 0, critical_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_activity(&mut self, record: &ActivityRecord) {
        self.activity_rows += 1;
        if record.severity == re_sim::Severity::Critical {
            self.critical_rows += 1;
        }
        self.inner.on_activity(record);
    }

    fn on_sim_end(&mut self, report: &MetricsReport) {
        self.inner.on_sim_end(report);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(&args)?;
    config.validate().context("invalid configuration")?;

    let out_dir = PathBuf::from(flag_value(&args, "--out").unwrap_or(DEFAULT_OUT_DIR));

    println!("=== pipeline — realty sales simulator ===");
    println!(
        "Agents: {}  |  Properties: {}  |  Horizon: {:.0} days  |  Seed: {}",
        config.agent_count,
        config.initial_properties,
        config.horizon_minutes / MINUTES_PER_DAY,
        config.seed
    );
    println!();

    let mut sim = SimBuilder::new(config).build()?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("{report}");
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  activity_log.csv : {} rows ({} critical)",
        obs.activity_rows, obs.critical_rows
    );
    println!("  agent_utilization.csv : {} rows", report.agents.len());

    let json_path = out_dir.join("report.json");
    write_report_json(&json_path, &report)?;
    println!("  report.json written to {}", json_path.display());

    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Defaults or `--config`, then the override CSV, the listings count, and
/// finally individual flags.
fn load_config(args: &[String]) -> Result<PipelineConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path}"))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {path}"))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(path) = flag_value(args, "--overrides") {
        let overrides = load_overrides_csv(Path::new(path))?;
        for o in &overrides {
            o.apply(&mut config)?;
        }
        info!("applied {} parameter overrides from {path}", overrides.len());
    }

    if let Some(path) = flag_value(args, "--listings") {
        config.initial_properties = count_listings_csv(Path::new(path))?;
        info!("{} listings in {path}", config.initial_properties);
    }

    config.seed = parse_arg(args, "--seed", config.seed);
    config.agent_count = parse_arg(args, "--agents", config.agent_count);
    if let Some(days) = flag_value(args, "--days").and_then(|v| v.parse::<f64>().ok()) {
        config.horizon_minutes = days * MINUTES_PER_DAY;
    }
    if args.iter().any(|a| a == "--verbose") {
        config.verbose_log = true;
    }

    Ok(config)
}

fn write_report_json(path: &Path, report: &MetricsReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

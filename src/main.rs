//! Headless snap gauge simulator.
//!
//! Fills a sphere tray, gauges every sphere in order, prints the P-chart
//! summary and exports the result table.
//!
//! ```text
//! snap-gauge --batches 3 --samples 5 --seed 42
//! snap-gauge --config sim.json --output out/results.csv --summary-json out/summary.json
//! snap-gauge --decimals 3 --xlsx-output out/results.xlsx
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use snap_gauge::export::{self, DEFAULT_CSV_PATH, DEFAULT_XLSX_PATH};
use snap_gauge::{logging, RunSummary, Simulation, SimulationConfig};

/// Virtual snap gauge: Go/No-Go inspection with a batch P chart
#[derive(Parser, Debug)]
#[command(name = "snap-gauge")]
#[command(version)]
#[command(about = "Go/No-Go snap gauge inspection with a batch P chart")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of batches
    #[arg(long)]
    batches: Option<usize>,

    /// Spheres per batch
    #[arg(long)]
    samples: Option<usize>,

    /// Nominal diameter (mm)
    #[arg(long)]
    nominal: Option<f64>,

    /// Gauge tolerance (mm)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Center of generated diameters (mm), defaults to the nominal
    #[arg(long)]
    target: Option<f64>,

    /// Half-width of generated diameters (mm)
    #[arg(long)]
    spread: Option<f64>,

    /// Random seed for a reproducible tray
    #[arg(long)]
    seed: Option<u64>,

    /// Decimal places generated diameters are rounded to
    #[arg(long, conflicts_with = "no_rounding")]
    decimals: Option<u32>,

    /// Keep generated diameters at full precision
    #[arg(long)]
    no_rounding: bool,

    /// Result table destination
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    output: PathBuf,

    /// Excel workbook destination
    #[arg(long, default_value = DEFAULT_XLSX_PATH)]
    xlsx_output: PathBuf,

    /// Skip the Excel workbook
    #[arg(long)]
    no_xlsx: bool,

    /// Also write the summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(v) = self.batches {
            config.batch_count = v;
        }
        if let Some(v) = self.samples {
            config.samples_per_batch = v;
        }
        if let Some(v) = self.nominal {
            config.nominal = v;
        }
        if let Some(v) = self.tolerance {
            config.tolerance = v;
        }
        if self.target.is_some() {
            config.target = self.target;
        }
        if let Some(v) = self.spread {
            config.spread = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.decimals.is_some() {
            config.decimals = self.decimals;
        }
        if self.no_rounding {
            config.decimals = None;
        }
        Ok(config)
    }
}

fn print_summary(sim: &Simulation, summary: &RunSummary) {
    let gauge = sim.run().gauge();
    println!(
        "Snap gauge: {} mm ± {} mm → [{}, {}] mm",
        gauge.nominal(),
        gauge.tolerance(),
        gauge.lcl(),
        gauge.ucl()
    );
    if let Some(seed) = sim.seed() {
        println!("Seed: {seed}");
    }
    println!();
    println!("{:>6} {:>10} {:>10} {:>11}", "Batch", "Inspected", "Defective", "Proportion");
    for b in &summary.batches {
        let mark = if b.out_of_control { " *" } else { "" };
        println!(
            "{:>6} {:>10} {:>10} {:>11.4}{mark}",
            b.index, b.inspected, b.defective, b.proportion
        );
    }
    println!();
    println!("CL  (avg p): {:.4}", summary.avg_p);
    println!("UCL:         {:.4}", summary.ucl());
    println!("LCL:         {:.4}", summary.lcl());
    println!(
        "Most defectives: {} in batch {:?}",
        summary.max_defective, summary.most_defective
    );
    println!("Process: {}", summary.verdict);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.resolve_config()?;
    let mut sim = Simulation::new(config).context("starting simulation")?;
    info!(seed = ?sim.seed(), "simulation started");

    let summary = sim
        .run_to_completion()
        .context("running inspection")?
        .clone();
    print_summary(&sim, &summary);

    export::export_csv(sim.run(), &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("\nResults saved to {}", cli.output.display());

    if !cli.no_xlsx {
        export::export_xlsx(sim.run(), &cli.xlsx_output)
            .with_context(|| format!("writing {}", cli.xlsx_output.display()))?;
        println!("Workbook saved to {}", cli.xlsx_output.display());
    }

    if let Some(path) = &cli.summary_json {
        export::export_summary_json(&summary, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Summary saved to {}", path.display());
    }

    Ok(())
}

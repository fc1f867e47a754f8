use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use earthca_core::stats::{self, DayAggregate, RunStatistics};
use earthca_core::{SimConfig, Simulation};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

const DEFAULT_DAYS: usize = 365;

#[derive(Parser)]
#[command(name = "earthca")]
#[command(about = "Toroidal climate cellular automaton CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and report per-day aggregates and run statistics
    Run {
        /// Path to config file (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for a JSON report (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of days to simulate
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: usize,

        /// Print one aggregate line every N days
        #[arg(long, default_value_t = 50)]
        sample_every: usize,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

#[derive(Serialize)]
struct RunReport {
    config: SimConfig,
    days: usize,
    aggregates: Vec<DayAggregate>,
    statistics: RunStatistics,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).context("failed to open config file")?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).context("failed to parse config")
}

fn run(config: SimConfig, days: usize, sample_every: usize, out: Option<PathBuf>) -> Result<()> {
    config.validate().context("config validation error")?;
    let sample_every = sample_every.max(1);

    let mut sim = Simulation::new(config.clone()).context("failed to initialize simulation")?;
    println!(
        "Simulating a {}x{} grid for {} days (seed {})...",
        config.grid_height, config.grid_width, days, config.seed
    );
    let history = sim.run(days).context("simulation run failed")?;

    let mut aggregates = Vec::with_capacity(history.len());
    for day in 0..history.len() {
        let aggregate = stats::aggregate_for_day(&history, day)
            .context("recorded day missing from history")?;
        if day % sample_every == 0 || day + 1 == history.len() {
            println!(
                "Day {day}: average temperature {:.2}, average pollution {:.4}",
                aggregate.mean_temperature, aggregate.mean_pollution
            );
        }
        aggregates.push(aggregate);
    }

    let statistics = stats::run_statistics(&history).context("run statistics unavailable")?;
    println!(
        "Run mean: temperature {:.2} (stddev {:.2}), pollution {:.4} (stddev {:.4})",
        statistics.mean_temperature,
        statistics.stddev_temperature,
        statistics.mean_pollution,
        statistics.stddev_pollution,
    );

    if let Some(out_dir) = out {
        std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
        let report = RunReport {
            config,
            days,
            aggregates,
            statistics,
        };
        let report_path = out_dir.join("report.json");
        let file = File::create(&report_path).context("failed to create report file")?;
        serde_json::to_writer_pretty(file, &report).context("failed to write report")?;
        println!("Report saved to {:?}", report_path);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            out,
            days,
            sample_every,
        } => {
            let config = load_config(config.as_ref())?;
            run(config, days, sample_every, out)?;
        }
    }
    Ok(())
}

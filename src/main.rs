use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};

use cachemeter::experiment::{delta, ExperimentRunner};
use cachemeter::policies::{tdc, PolicyType};
use cachemeter::trace::{logfile, non_stationary_phases, zipf_stationary};
use cachemeter::Item;

/// Compare cache replacement policies over synthetic and real access traces.
#[derive(Parser)]
#[command(name = "cachemeter", version, about)]
struct Cli {
    /// Decay rate for the time-decayed policy, in (0, 1)
    #[arg(long, default_value_t = tdc::DEFAULT_DECAY_RATE)]
    decay_rate: f64,

    /// Cache sizes to sweep, as percentages of the item universe
    #[arg(long, value_delimiter = ',', default_values_t = 1..=16)]
    cache_percents: Vec<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the synthetic suite: stationary and phase-shifting Zipf traces
    Synthetic {
        /// Number of distinct items in the universe
        #[arg(long, default_value_t = 1000)]
        items: usize,
        /// Requests per generated trace
        #[arg(long, default_value_t = 50_000)]
        requests: usize,
        /// Base seed; each trace perturbs it so runs are reproducible
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Trailing window for the adaptability report
        #[arg(long, default_value_t = 500)]
        window: usize,
    },
    /// Sweep cache sizes over a Common-Log-Format access log
    Logfile {
        /// Path to the access log
        path: PathBuf,
        /// Keep at most this many parsed requests
        #[arg(long)]
        max_requests: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        !cli.cache_percents.is_empty(),
        "at least one cache size percentage is required"
    );
    ensure!(
        cli.decay_rate > 0.0 && cli.decay_rate < 1.0,
        "decay rate must lie strictly between 0 and 1"
    );
    let runner = ExperimentRunner::new(cli.decay_rate);

    match cli.command {
        Command::Synthetic {
            items,
            requests,
            seed,
            window,
        } => run_synthetic(&runner, &cli.cache_percents, items, requests, seed, window),
        Command::Logfile { path, max_requests } => {
            let (trace, unique) = logfile::read_trace(&path, max_requests)
                .with_context(|| format!("reading access log {}", path.display()))?;
            ensure!(unique > 0, "no well-formed requests found in the log");
            println!("parsed {} requests, {} distinct items", trace.len(), unique);
            delta_report(&runner, "access log", &trace, unique, &cli.cache_percents);
            Ok(())
        }
    }
}

fn run_synthetic(
    runner: &ExperimentRunner,
    percents: &[usize],
    items: usize,
    requests: usize,
    seed: u64,
    window: usize,
) -> Result<()> {
    let phases = 10;
    let traces: Vec<(String, Vec<Item>, bool)> = vec![
        (
            "stationary zipf a=0.8".into(),
            zipf_stationary(items, requests, 0.8, Some(seed)),
            false,
        ),
        (
            "stationary zipf a=1.2".into(),
            zipf_stationary(items, requests, 1.2, Some(seed + 1)),
            false,
        ),
        (
            "non-stationary p_hot=0.7".into(),
            non_stationary_phases(items, phases, requests / phases, 1.0, 0.7, Some(seed + 2)),
            true,
        ),
        (
            "non-stationary p_hot=0.9".into(),
            non_stationary_phases(items, phases, requests / phases, 1.0, 0.9, Some(seed + 3)),
            true,
        ),
    ];

    for (name, trace, phased) in &traces {
        delta_report(runner, name, trace, items, percents);
        if *phased {
            window_report(runner, trace, items, window);
        }
        println!();
    }
    Ok(())
}

/// Sweep cache sizes and print the average Δ of TDC against each baseline.
fn delta_report(
    runner: &ExperimentRunner,
    name: &str,
    trace: &[Item],
    universe: usize,
    percents: &[usize],
) {
    println!(
        "== {name}: {} requests over {} items ==",
        trace.len(),
        universe
    );
    let baselines = [PolicyType::Lru, PolicyType::Lfu, PolicyType::Arc];
    let mut delta_sums = [0.0f64; 3];
    let mut tdc_sum = 0.0f64;

    for &pct in percents {
        let capacity = (universe * pct / 100).max(1);
        let results = runner.compare(trace, capacity);
        let tdc_hr = results
            .iter()
            .find(|(ty, _)| *ty == PolicyType::Tdc)
            .map(|(_, stats)| stats.hit_ratio())
            .unwrap_or(0.0);
        tdc_sum += tdc_hr;
        for (slot, baseline) in baselines.iter().enumerate() {
            if let Some((_, stats)) = results.iter().find(|(ty, _)| ty == baseline) {
                delta_sums[slot] += delta(tdc_hr, stats.hit_ratio());
            }
        }
    }

    let runs = percents.len() as f64;
    println!("  TDC mean hit ratio {:.4}", tdc_sum / runs);
    for (slot, baseline) in baselines.iter().enumerate() {
        println!(
            "  mean delta vs {:<3} {:+.2}%",
            baseline.name(),
            delta_sums[slot] / runs
        );
    }
}

/// Adaptability under phase changes: trailing-window hit ratios at a 5% cache.
fn window_report(runner: &ExperimentRunner, trace: &[Item], universe: usize, window: usize) {
    let capacity = (universe * 5 / 100).max(1);
    println!("  adaptability (window {window}, cache size {capacity}):");
    for (ty, curve) in runner.sliding_window(trace, capacity, window) {
        if curve.is_empty() {
            continue;
        }
        let mean = curve.iter().sum::<f64>() / curve.len() as f64;
        let worst = curve.iter().copied().fold(f64::INFINITY, f64::min);
        println!("    {:<3} mean {mean:.4}  worst {worst:.4}", ty.name());
    }
}

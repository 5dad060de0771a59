mod aggregate;
mod chart;
mod loader;

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::chart::ChartSpec;

/// Fixed column layout of the results CSV written by the benchmark harness.
const COL_LOSS: usize = 5;
const COL_MEAN_MS: usize = 7;
const COL_MEDIAN_MS: usize = 8;
const COL_MAX_MS: usize = 11;

/// Results file produced by the benchmark run one directory up.
const RESULTS_PATH: &str = "../results.csv";

const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        file: "loss.png",
        title: "Loss Rate (%)",
        x_label: "RPS",
        y_label: "Loss (%)",
        column: COL_LOSS,
    },
    ChartSpec {
        file: "mean.png",
        title: "Mean Latency (ms)",
        x_label: "RPS",
        y_label: "Time (ms)",
        column: COL_MEAN_MS,
    },
    ChartSpec {
        file: "max.png",
        title: "Max Latency (ms)",
        x_label: "RPS",
        y_label: "Time (ms)",
        column: COL_MAX_MS,
    },
    ChartSpec {
        file: "median.png",
        title: "Median Latency (ms)",
        x_label: "RPS",
        y_label: "Time (ms)",
        column: COL_MEDIAN_MS,
    },
];

#[derive(Debug, Parser)]
#[command(
    name = "loadtest-charts",
    version,
    about = "Render line charts from load-test result CSVs"
)]
struct Cli {
    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let records = loader::load_records(RESULTS_PATH)?;
    info!("Loaded {} rows from {}", records.len(), RESULTS_PATH);

    for spec in &CHARTS {
        let series = aggregate::aggregate_column(&records, spec.column);
        chart::render_chart(spec, &series)?;
        info!("Wrote chart: {} ({} modes)", spec.file, series.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // End-to-end: load a small results file and render every chart.
    #[test]
    fn full_pipeline_renders_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("results.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "mode,rps,c2,c3,c4,loss,c6,mean,median,c9,c10,max").unwrap();
        writeln!(file, "webhook,100,0,0,0,0.5,0,12.0,10.0,0,0,40.0").unwrap();
        writeln!(file, "webhook,100,0,0,0,1.5,0,14.0,11.0,0,0,60.0").unwrap();
        writeln!(file, "longpull-direct,200,0,0,0,2.0,0,20.0,18.0,0,0,90.0").unwrap();

        let records = loader::load_records(&csv_path).unwrap();
        assert_eq!(records.len(), 4);

        for spec in &CHARTS {
            let series = aggregate::aggregate_column(&records, spec.column);
            assert_eq!(series.len(), 2);
            let out = dir.path().join(spec.file);
            chart::render_to(&out, spec, &series).unwrap();
            assert!(out.exists());
        }

        // Duplicate webhook rows at rps 100 collapse into one averaged point.
        let loss = aggregate::aggregate_column(&records, COL_LOSS);
        let webhook = loss.iter().find(|s| s.mode == "webhook").unwrap();
        assert_eq!(webhook.points.len(), 1);
        assert!((webhook.points[0].value - 1.0).abs() < f64::EPSILON);
    }
}

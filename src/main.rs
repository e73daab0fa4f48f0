//! calc-graph - reference host
//!
//! Assembles the four reference calculations over an `f64` context, runs
//! them once and prints the results.

use anyhow::Context;
use calc_graph::{
    calcs::{self, Calc1, Calc2, Calc3, Calc4},
    HostConfig,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "calc-graph", version, about = "Run the reference calculation pipeline")]
struct Cli {
    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "CALC_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Initial context value, overrides the config file
    #[arg(short = 'x', long)]
    context: Option<f64>,

    /// Print snapshot, report and results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HostConfig::default(),
    };
    if let Some(context) = cli.context {
        config = config.with_context(context);
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Assembling reference pipeline with context {}", config.context);
    let mut pipeline =
        calcs::reference_pipeline(config.context).context("assembling pipeline")?;

    if config.print_snapshot && !cli.json {
        print!("{}", pipeline.snapshot());
    }

    let report = pipeline.run_all().context("running pipeline")?;

    let c1 = pipeline.get::<Calc1>()?.v;
    let c2 = pipeline.get::<Calc2>()?.another_v;
    let c3 = pipeline.get::<Calc3>()?.v;
    let c4 = pipeline.get::<Calc4>()?.v;

    if cli.json {
        let output = serde_json::json!({
            "context": pipeline.context(),
            "snapshot": pipeline.snapshot(),
            "report": report,
            "results": {
                "calc1.v": c1,
                "calc2.another_v": c2,
                "calc3.v": c3,
                "calc4.v": c4,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("calc1.v = {}", c1);
    println!("calc2.another_v = {}", c2);
    println!("calc3.v = {}", c3);
    println!("calc4.v = {}", c4);

    if config.print_report {
        for node in &report.nodes {
            println!("{:>3}. {:<8} {} us", node.position, node.name, node.elapsed_us);
        }
        println!("total: {} us", report.total_time_us);
    }

    Ok(())
}

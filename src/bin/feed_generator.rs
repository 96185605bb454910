/// Synthetic market data feed generator
///
/// Writes `./build/market_feed.bin` by default. The output directory must
/// already exist. `DEBUG=true` prints every record to stdout; `RUST_LOG`
/// controls the log level of everything else.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use feed_synth::{GeneratorConfig, Result};
use log::error;

#[derive(Debug, Parser)]
#[command(version, about = "Generate a synthetic binary market data feed")]
struct Args {
    /// Output file path (its directory must exist)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Number of records to generate
    #[arg(long, short)]
    count: Option<u64>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a record is a quote rather than a trade
    #[arg(long)]
    quote_probability: Option<f64>,

    /// Re-read the file afterwards and check its invariants
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match generate(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn generate(args: Args) -> Result<()> {
    let mut config = GeneratorConfig::from_env()?;
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(count) = args.count {
        config.message_count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(p) = args.quote_probability {
        config.quote_probability = p;
    }

    feed_synth::run(&config, args.verify)?;

    let name = config
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.output.display().to_string());
    println!("Generated {}", name);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

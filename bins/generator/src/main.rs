mod answers;
mod corpus;
mod json_writer;

use std::path::PathBuf;

use clap::Parser;
use have_config::HaveConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generates a Haversine coordinate-pair corpus (JSON) plus its companion
/// binary answer file.
#[derive(Parser, Debug)]
#[command(name = "generator")]
struct GeneratorArgs {
    /// Number of coordinate pairs to generate.
    #[arg(long, default_value_t = 10_000)]
    count: u64,

    /// PRNG seed; the same seed and count always produce the same corpus.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Where to write the JSON corpus.
    #[arg(long, default_value = "haversine.json")]
    json_out: PathBuf,

    /// Where to write the binary answer file.
    #[arg(long, default_value = "haversine.answers")]
    answers_out: PathBuf,

    /// Optional TOML config file (log level, Earth radius).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = GeneratorArgs::parse();
    let config = HaveConfig::load_or_default(args.config.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(count = args.count, seed = args.seed, "generating Haversine corpus");

    let pairs = corpus::generate(args.count, args.seed, config.earth_radius_km);
    let avg = if pairs.is_empty() {
        0.0
    } else {
        pairs.iter().map(|p| p.distance).sum::<f64>() / pairs.len() as f64
    };

    json_writer::write_document(&args.json_out, &pairs, avg)?;
    answers::write_answers(&args.answers_out, &pairs, avg)?;

    info!(
        json = %args.json_out.display(),
        answers = %args.answers_out.display(),
        avg,
        "wrote corpus"
    );

    Ok(())
}

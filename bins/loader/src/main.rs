mod document;
mod haversine;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use have_config::HaveConfig;
use have_json::{parse, ByteView};
use have_profiler::{global, print_list, print_tree, reconstruct};
use memmap2::Mmap;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses a Haversine JSON corpus, recomputes each pair's distance, and
/// prints a profile report of where the run's cycles went.
#[derive(Parser, Debug)]
#[command(name = "loader")]
struct LoaderArgs {
    /// Path to the JSON corpus written by `generator`.
    json_path: PathBuf,

    /// Optional binary answer file to cross-check recomputed distances
    /// against.
    #[arg(long)]
    answers_path: Option<PathBuf>,

    /// Optional TOML config file (log level, ring capacity, Earth radius).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = LoaderArgs::parse();
    let config = HaveConfig::load_or_default(args.config.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let profiler = global();
    profiler.start();

    let file = File::open(&args.json_path)?;
    // SAFETY: the file is not expected to be concurrently truncated while
    // mapped; same contract as the workspace's own `MmapFile::open_ro`.
    let mmap = unsafe { Mmap::map(&file)? };

    let root = {
        let _section = profiler.section(have_profiler::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            Some("parse_json"),
        ));
        let view = ByteView::new(&mmap);
        parse(&view)?
    };

    let decoded = {
        let _section = profiler.section(have_profiler::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            Some("decode_pairs"),
        ));
        let decoded = document::pairs(&root)?;
        let declared_count = document::count(&root)?;
        document::check_count(declared_count, decoded.len())?;
        decoded
    };

    let distances = {
        let _section = profiler.section(have_profiler::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            Some("haversine_sum"),
        ));
        decoded
            .iter()
            .map(|pair| haversine::reference_haversine(pair.x0, pair.y0, pair.x1, pair.y1, config.earth_radius_km))
            .collect::<Vec<_>>()
    };

    let declared_avg = document::avg(&root)?;
    let computed_avg = if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    info!(
        count = decoded.len(),
        declared_avg,
        computed_avg,
        "Haversine loader finished"
    );

    if let Some(answers_path) = &args.answers_path {
        let mismatches = check_answers(answers_path, &distances, computed_avg)?;
        if mismatches > 0 {
            tracing::warn!(mismatches, "answer file distances diverged from recomputed values");
        }
    }

    let records = profiler.stop_and_collect().unwrap_or_default();
    let cpu_freq = have_clock::estimate_frequency_default();
    let report = reconstruct(&records, profiler.registry(), cpu_freq, Some(config.path_trim.as_str()));

    println!("\nProfile (tree):\n");
    print_tree(&report);
    println!("\nProfile (flat list):\n");
    print_list(&report);

    Ok(())
}

/// Cross-checks the companion binary answer file against freshly recomputed
/// distances. Returns the number of entries whose distance differs from the
/// stored value by more than a small tolerance.
fn check_answers(
    path: &std::path::Path,
    distances: &[f64],
    computed_avg: f64,
) -> Result<usize, Box<dyn std::error::Error>> {
    use std::io::Read;

    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;

    let count = u64::from_le_bytes(bytes[0..8].try_into()?) as usize;
    let mut offset = 8;
    let mut mismatches = 0;

    for distance in distances.iter().take(count) {
        offset += 4 * 8; // skip x0, y0, x1, y1
        let stored = f64::from_le_bytes(bytes[offset..offset + 8].try_into()?);
        offset += 8;
        if (stored - distance).abs() > 1e-6 {
            mismatches += 1;
        }
    }

    let stored_avg = f64::from_le_bytes(bytes[bytes.len() - 8..].try_into()?);
    if (stored_avg - computed_avg).abs() > 1e-6 {
        mismatches += 1;
    }

    Ok(mismatches)
}

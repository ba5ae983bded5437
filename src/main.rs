use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use depthmap::{compute_disp, io, render_disparity, MatchConfig};

/// Estimate a disparity map from a rectified stereo pair and save it as a
/// grayscale image (brighter is closer).
#[derive(Parser, Debug)]
#[command(name = "depthmap", version, about)]
struct Args {
    /// Left image of the pair
    #[arg(value_name = "LEFT_IMAGE")]
    left: PathBuf,

    /// Right image of the pair
    #[arg(value_name = "RIGHT_IMAGE")]
    right: PathBuf,

    /// Where to write the disparity image
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Radius of the square matching window
    #[arg(short = 'r', long, default_value_t = depthmap::DEFAULT_WINDOW_RADIUS)]
    window_radius: u32,

    /// Largest disparity searched, as a fraction of the image width
    #[arg(short = 'p', long, default_value_t = depthmap::DEFAULT_SEARCH_PROPORTION)]
    search_proportion: f64,

    /// Worker threads (defaults to one per core)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("rayon init failed: {}", e))?;
    }

    let left = io::load_rgba(&args.left)
        .with_context(|| format!("failed to read {}", args.left.display()))?;
    let right = io::load_rgba(&args.right)
        .with_context(|| format!("failed to read {}", args.right.display()))?;

    let config = MatchConfig::new()
        .with_window_radius(args.window_radius)
        .with_search_proportion(args.search_proportion);
    let (disparities, search_distance) = compute_disp(&left, &right, &config)?;
    let depth = render_disparity(&disparities, search_distance)?;

    io::save(&args.output, &depth)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "done");

    Ok(())
}

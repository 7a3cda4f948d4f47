// img2shards - Shatter an image offline and dump the pieces
//
// Pipeline:
//   1. Load config (optional RON file) and apply CLI overrides
//   2. Decode the image; its size becomes the shatter area
//   3. Sample rings around the focal point, triangulate, schedule
//   4. Export one PNG per fragment plus a RON manifest
//
// Usage: cargo run --bin img2shards -- <image> [--x X] [--y Y] [--seed N] [--out DIR]

mod export;

use clap::Parser;
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use shatter_engine::config::DemoConfig;
use shatter_engine::shatter::{Delaunay, ShatterSession};

#[derive(Parser, Debug)]
#[command(name = "img2shards", about = "Shatter an image into triangle fragments")]
struct Args {
    /// Image to shatter.
    image: PathBuf,

    /// Focal point x in image pixels (default: image center).
    #[arg(long)]
    x: Option<f32>,

    /// Focal point y in image pixels (default: image center).
    #[arg(long)]
    y: Option<f32>,

    /// RNG seed (default: current time).
    #[arg(long)]
    seed: Option<u64>,

    /// RON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "shards")]
    out: PathBuf,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?.shatter,
        None => DemoConfig::default().shatter,
    };

    let image = image::open(&args.image)?.to_rgba8();
    (config.image_width, config.image_height) = image.dimensions();
    log::info!("Processing {} ({}x{})", args.image.display(), config.image_width, config.image_height);

    let center = Vec2::new(config.image_width as f32, config.image_height as f32) * 0.5;
    let focus = Vec2::new(args.x.unwrap_or(center.x), args.y.unwrap_or(center.y));

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos() as u64)
    });
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    log::debug!("seed {seed}");

    let session = ShatterSession::shatter(&image, focus, &config, &Delaunay, &mut rng)?;

    export::write_fragments(&args.out, &session)?;
    export::write_manifest(&args.out.join("shards.ron"), &session, seed)?;

    log::info!(
        "Wrote {} fragments to {} (animation {:.2}s)",
        session.fragments.len(),
        args.out.display(),
        session.duration()
    );
    Ok(())
}

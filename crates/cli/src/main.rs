use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use detcam_core::capture::infrastructure::image_dir::{ImageDirProvider, ImageDirSink};
use detcam_core::context::CameraContext;
use detcam_core::control;
use detcam_core::detection::domain::model::ModelKind;
use detcam_core::detection::infrastructure::gpu_probe::WgpuProbe;
use detcam_core::detection::infrastructure::model_resolver;
use detcam_core::notify::ScoreCallback;
use detcam_core::shared::feature_flags::FeatureFlags;

mod fixed_detector;

use fixed_detector::FixedBoxDetectorFactory;

/// Object detection overlay over a directory of captured frames.
#[derive(Parser)]
#[command(name = "detcam")]
struct Cli {
    /// Directory of input frames (acts as the back camera).
    input: PathBuf,

    /// Directory for annotated output frames.
    output: PathBuf,

    /// Second frame directory, used as the front camera.
    #[arg(long)]
    front: Option<PathBuf>,

    /// Model selector (0-6: tiny, nano, s, m, l, x, darknet).
    #[arg(long, default_value = "0")]
    model: i32,

    /// Compute backend: 0 = cpu, 1 = gpu.
    #[arg(long, default_value = "0")]
    backend: i32,

    /// Detection cadence selector: run inference every N+1 frames (0-9).
    #[arg(long, default_value = "0")]
    sampling: i32,

    /// Camera selector: 0 = back, 1 = front.
    #[arg(long, default_value = "0")]
    camera: i32,

    /// Disable the detection overlay (FPS readout stays on).
    #[arg(long)]
    no_overlay: bool,

    /// Box-only output without text labels.
    #[arg(long)]
    dataset: bool,

    /// Print detection scores as they are delivered.
    #[arg(long)]
    delegate: bool,

    /// Download and cache the model weights before starting.
    #[arg(long)]
    resolve_assets: bool,

    /// Bundled asset directory searched before the download cache.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.resolve_assets {
        resolve_assets(cli.model, &cli.assets)?;
    }

    let callback: Option<ScoreCallback> = if cli.delegate {
        Some(Box::new(|score| println!("score {score}")))
    } else {
        None
    };

    let mut ctx = CameraContext::new(
        Box::new(FixedBoxDetectorFactory),
        Box::new(WgpuProbe),
        Box::new(ImageDirProvider::new(cli.input, cli.front)),
        cli.assets,
        callback,
    );

    let flags = FeatureFlags::new(!cli.no_overlay, cli.delegate, cli.dataset);
    if !control::load_model(&ctx, cli.model, cli.backend, cli.sampling, flags) {
        return Err("model configuration rejected".into());
    }

    let sink = ImageDirSink::new(cli.output)?;
    control::set_output_window(&mut ctx, Some(Box::new(sink)));

    if !control::open_camera(&mut ctx, cli.camera) {
        return Err("failed to open camera".into());
    }

    ctx.wait();
    ctx.shutdown();
    Ok(())
}

fn resolve_assets(model: i32, bundled: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let kind = ModelKind::from_index(model).ok_or("model selector outside 0..=6")?;
    let progress: model_resolver::ProgressFn = Box::new(|done, total| {
        if total > 0 {
            log::info!("downloading weights: {done}/{total} bytes");
        }
    });
    let assets = model_resolver::resolve_model(kind, Some(bundled), Some(progress))?;
    log::info!(
        "weights for {} at {} and {}",
        kind.name(),
        assets.param.display(),
        assets.bin.display()
    );
    Ok(())
}

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use ptz_overlap_core::catalog::infrastructure::directory_scanner::scan_directory;
use ptz_overlap_core::catalog::infrastructure::file_model_source::FileModelSource;
use ptz_overlap_core::catalog::infrastructure::threaded_model_loader::ThreadedModelLoader;
use ptz_overlap_core::pipeline::overlay_session::OverlaySession;
use ptz_overlap_core::selection::domain::selection_controller::SelectionEvent;
use ptz_overlap_core::shared::config::OverlayConfig;
use ptz_overlap_core::shared::frame::Dimensions;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Cross-frame face overlay for PTZ camera snapshots.
///
/// Prints the overlay (native boxes, overlap regions, clusters) of one
/// image as JSON. Detection models are read from `<stem>.json` files
/// next to the images.
#[derive(Parser)]
#[command(name = "ptz-overlap")]
struct Cli {
    /// Directory holding the snapshots and their detection models.
    dir: PathBuf,

    /// File name of the image to display.
    image: String,

    /// Config file (defaults to the per-user config).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Displayed width in pixels (defaults to natural size).
    #[arg(long, requires = "display_height")]
    display_width: Option<u32>,

    /// Displayed height in pixels (defaults to natural size).
    #[arg(long, requires = "display_width")]
    display_height: Option<u32>,

    /// Max capture-time difference, in seconds, for neighbor frames.
    #[arg(long)]
    window_secs: Option<i64>,

    /// Drop same-frame detections overlapping above this IoU.
    #[arg(long)]
    dedupe_iou: Option<f64>,

    /// Select the cluster at this position and report the selection.
    #[arg(long)]
    select: Option<usize>,

    /// Seconds to wait for detection models before printing.
    #[arg(long, default_value = "10")]
    timeout_secs: u64,
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
    validate(&cli)?;
    let config = build_config(&cli)?;

    let display = match (cli.display_width, cli.display_height) {
        (Some(width), Some(height)) => Some(Dimensions::new(width, height)),
        _ => None,
    };
    let frames = scan_directory(&cli.dir, display)?;
    log::info!("Found {} images in {}", frames.len(), cli.dir.display());
    if !frames.iter().any(|f| f.identifier() == cli.image) {
        return Err(format!("Image not found in {}: {}", cli.dir.display(), cli.image).into());
    }

    let loader = ThreadedModelLoader::new(Arc::new(FileModelSource::new(&cli.dir)));
    let mut session = OverlaySession::new(&config, Box::new(loader));
    session.set_frames(frames);
    session.show_image(&cli.image);

    let deadline = Instant::now() + Duration::from_secs(cli.timeout_secs);
    while session.models_in_flight() > 0 {
        if Instant::now() >= deadline {
            log::warn!(
                "Gave up waiting for {} detection models",
                session.models_in_flight()
            );
            break;
        }
        thread::sleep(POLL_INTERVAL);
        session.poll_models();
    }

    for (id, key) in session.snapshot().clusters.key_boxes() {
        log::info!(
            "{id}: key {} #{} ({:.2})",
            key.source_frame,
            key.detection_index,
            key.confidence
        );
    }

    if let Some(position) = cli.select {
        let id = session
            .snapshot()
            .clusters
            .key_boxes()
            .nth(position)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| format!("No cluster at position {position}"))?;
        match session.click(&id, Instant::now()) {
            Some(SelectionEvent::Selected(face)) => eprintln!(
                "Selected {} ({} #{}, label key {})",
                face.cluster_id, face.source_frame, face.detection_index, face.label_key
            ),
            Some(SelectionEvent::Deselected(id)) => eprintln!("Deselected {id}"),
            None => {}
        }
    }

    println!("{}", serde_json::to_string_pretty(session.snapshot())?);
    Ok(())
}

fn build_config(cli: &Cli) -> Result<OverlayConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => OverlayConfig::from_path(path)?,
        None => OverlayConfig::load(),
    };
    if let Some(window) = cli.window_secs {
        config.neighbor_window_secs = window;
    }
    if let Some(iou) = cli.dedupe_iou {
        config.same_frame_iou_threshold = Some(iou);
    }
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.dir.is_dir() {
        return Err(format!("Directory not found: {}", cli.dir.display()).into());
    }
    if let Some(window) = cli.window_secs {
        if window < 0 {
            return Err(format!("Window must be non-negative, got {window}").into());
        }
    }
    if let Some(iou) = cli.dedupe_iou {
        if !(0.0..=1.0).contains(&iou) {
            return Err(format!("IoU threshold must be between 0.0 and 1.0, got {iou}").into());
        }
    }
    if cli.display_width == Some(0) || cli.display_height == Some(0) {
        return Err("Display dimensions must be positive".into());
    }
    Ok(())
}

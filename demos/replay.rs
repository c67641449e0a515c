use anyhow::Context;
use ccount::overlay::OverlayText;
use ccount::{CentroidCounter, CounterConfig, Frame, MatchPolicy};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Replays a detections dump (`<millis>:<json>` per line) through a counter.
#[derive(Parser, Debug)]
struct Args {
    /// Detections dump file
    input: PathBuf,

    /// JSON counter config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    match_radius: Option<f32>,

    #[arg(long)]
    snapshot: bool,

    #[arg(long)]
    max_idle_frames: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CounterConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CounterConfig::default(),
    };

    if let Some(radius) = args.match_radius {
        config.match_radius = radius;
    }

    if args.snapshot {
        config.policy = MatchPolicy::Snapshot;
    }

    if args.max_idle_frames.is_some() {
        config.max_idle_frames = args.max_idle_frames;
    }

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut counter = CentroidCounter::new(config);

    for (index, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame = match Frame::parse_dump_line(index as u64, &line) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(line = index + 1, %err, "skipping dump line");
                continue;
            }
        };

        let count = counter.update(&frame);
        let text = OverlayText::from(&count);

        println!("{:.3} {} {}", frame.timestamp, text.current, text.total);
    }

    for track in counter.registry().iter() {
        println!(
            "{} {} {} {} {}",
            track.track_id, track.centroid.x, track.centroid.y, track.hits, track.last_seen
        );
    }

    Ok(())
}

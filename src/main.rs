//! Frame Distillation CLI
//!
//! Command-line interface for testing and demonstrating the frame
//! distillation pipeline against the synthetic mock differ.

use clap::Parser;
use frame_distill::{
    analysis::{Analyzer, FileConfig},
    frames::{sequence, MockDiffer},
    prune::{select, SelectionPolicy},
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "frame-distill", version, about = "Keyframe selection demo")]
struct Args {
    /// Number of synthetic frames to analyze.
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Working width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Working height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Keep exactly this many frames (count policy).
    #[arg(long, conflicts_with = "threshold")]
    target_count: Option<usize>,

    /// Keep frames passing this normalized score threshold.
    #[arg(long)]
    threshold: Option<f64>,

    /// Cap threshold survivors at this count.
    #[arg(long, requires = "threshold")]
    max_count: Option<usize>,
}

impl Args {
    fn policy(&self, fallback: SelectionPolicy) -> SelectionPolicy {
        match (self.target_count, self.threshold, self.max_count) {
            (Some(target), _, _) => SelectionPolicy::Count { target },
            (None, Some(threshold), Some(max_count)) => SelectionPolicy::ThresholdWithCap {
                threshold,
                max_count,
            },
            (None, Some(threshold), None) => SelectionPolicy::Threshold { threshold },
            _ => fallback,
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Frame Distill v{}", frame_distill::VERSION);
    info!("This is a demonstration using the synthetic mock differ");

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    if args.frames < 2 {
        warn!("Fewer than 2 frames: nothing to analyze");
    }

    let frames = sequence(args.frames, 40);
    let mut differ = MockDiffer::new(args.width, args.height);

    info!("Analyzing {} frames...", frames.len());
    let analyzer = Analyzer::new(config.analysis);
    let graph = analyzer.analyze(&mut differ, &frames, args.width, args.height, |p| {
        info!("Analysis progress: {:.0}%", p * 100.0)
    });

    let policy = args.policy(config.selection.policy());
    let survivors = select(&graph, &frames, policy);

    info!(
        "Selected {} of {} frames with {:?}",
        survivors.len(),
        frames.len(),
        policy
    );

    println!(
        "Surviving frames: {}",
        survivors
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

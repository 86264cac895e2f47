//! SIR Replay
//!
//! Turns a finished run into a replay bundle and epidemic curve.
//!
//! Examples:
//!   sir_replay --input output/
//!   sir_replay --input output/ --output site/ --paused

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sir_replay::playback::{MAX_SPEED, MIN_SPEED};
use sir_replay::{
    load_run, summary_panel, write_replay, EpidemicCurve, Playback, ReplayResult, ReplayScene,
};

/// SIR Replay
#[derive(Parser, Debug)]
#[command(name = "sir_replay")]
#[command(about = "Build replay data from a simulation run")]
struct Args {
    /// Directory holding timeline.json and network.json
    #[arg(long, default_value = "output")]
    input: PathBuf,

    /// Directory for replay.json and epidemic_curve.csv (defaults to --input)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Start the viewer paused
    #[arg(long)]
    paused: bool,

    /// Log the frames a viewer would show at this many frames per second,
    /// sampled once per simulated second (no real-time pacing)
    #[arg(long)]
    preview: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ReplayResult<()> {
    let loaded = load_run(&args.input)?;
    let scene = ReplayScene::build(&loaded.network, &loaded.timeline).paused(args.paused);
    let curve = EpidemicCurve::from_stats(&loaded.timeline.stats);

    let output = args.output.as_ref().unwrap_or(&args.input);
    let files = write_replay(output, &scene, &curve)?;
    tracing::info!(
        "Scene {}: {} nodes, {} edges, {} frames -> {:?}",
        scene.scene_id,
        scene.node_count(),
        scene.edges.len(),
        scene.frame_count(),
        files.scene
    );

    for line in summary_panel(Some(&loaded.timeline)).lines() {
        tracing::info!("{}", line);
    }

    if let Some(speed) = args.preview {
        preview(&scene, speed);
    }
    Ok(())
}

/// Logs the frames shown while playing the scene.
fn preview(scene: &ReplayScene, speed: f64) {
    for frame in preview_frames(scene.frame_count(), speed) {
        match scene.stats_for_frame(frame) {
            Some(s) => tracing::info!(
                "Day {:>3}  S={:<6} I={:<6} R={:<6}",
                s.day,
                s.susceptible,
                s.infected,
                s.recovered
            ),
            None => tracing::info!("Frame {} (no stats)", frame),
        }
    }
}

/// Distinct frames visible at each simulated second of playback.
///
/// The clock is simulated, so the result does not depend on wall time.
fn preview_frames(frame_count: usize, speed: f64) -> Vec<usize> {
    let mut playback = Playback::new(frame_count, false);
    playback.set_speed(speed);
    if playback.speed() != speed {
        tracing::warn!(
            "Preview speed {} clamped to {} (range {}..={})",
            speed,
            playback.speed(),
            MIN_SPEED,
            MAX_SPEED
        );
    }

    let mut shown = vec![playback.current_frame()];
    while playback.is_playing() {
        let frame = playback.advance(1.0);
        if shown.last() != Some(&frame) {
            shown.push(frame);
        }
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["sir_replay"]);
        assert_eq!(args.input, PathBuf::from("output"));
        assert!(args.output.is_none());
        assert!(!args.paused);
        assert!(args.preview.is_none());
    }

    #[test]
    fn test_paused_and_output() {
        let args = Args::parse_from([
            "sir_replay", "--input", "runs/a", "--output", "site", "--paused",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("site")));
        assert!(args.paused);
    }

    #[test]
    fn test_preview_steps_one_simulated_second() {
        // Two frames per second skips every other frame but always ends on the last.
        assert_eq!(preview_frames(6, 2.0), vec![0, 2, 4, 5]);
        // Slow speeds still show each frame exactly once.
        assert_eq!(preview_frames(4, 0.5), vec![0, 1, 2, 3]);
        // Out-of-range speeds are clamped.
        assert_eq!(preview_frames(12, 50.0), vec![0, 5, 10, 11]);
        assert_eq!(preview_frames(1, 1.0), vec![0]);
    }
}

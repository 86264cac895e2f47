//! Integration tests for the replay layer.

use sir_events::{HealthState, NetworkDocument, Timeline};
use sir_replay::{summary_panel, EpidemicCurve, Playback, ReplayScene};

/// Test parsing the run files a simulation writes.
#[test]
fn test_parse_sample_run() {
    let network: NetworkDocument =
        serde_json::from_str(include_str!("../../sir-events/tests/fixtures/sample_network.json"))
            .unwrap();
    let timeline: Timeline =
        serde_json::from_str(include_str!("../../sir-events/tests/fixtures/sample_timeline.json"))
            .unwrap();

    assert_eq!(network.node_count(), 4);
    assert_eq!(timeline.len(), 4);
    assert_eq!(timeline.snapshots[2].codes(), "RIIS");
}

/// Scene frames and curve agree with the recorded stats.
#[test]
fn test_scene_and_curve_agree() {
    let network = sir_events::fixtures::sample_network();
    let timeline = sir_events::fixtures::sample_timeline();
    let scene = ReplayScene::build(&network, &timeline);
    let curve = EpidemicCurve::from_stats(&timeline.stats);

    let infected_per_frame: Vec<(u32, usize)> = scene
        .history
        .iter()
        .enumerate()
        .map(|(day, frame)| (day as u32, frame.chars().filter(|&c| c == 'I').count()))
        .collect();
    assert_eq!(infected_per_frame, curve.series(HealthState::Infected));
}

/// Playing the whole scene visits every frame once and stops on the last.
#[test]
fn test_playback_over_scene() {
    let scene = ReplayScene::build(
        &sir_events::fixtures::sample_network(),
        &sir_events::fixtures::sample_timeline(),
    );
    let mut playback = Playback::new(scene.frame_count(), false);

    let mut visited = vec![playback.current_frame()];
    while playback.is_playing() {
        let frame = playback.advance(1.0);
        if visited.last() != Some(&frame) {
            visited.push(frame);
        }
    }
    assert_eq!(visited, vec![0, 1, 2, 3]);
    assert_eq!(scene.frame(playback.current_frame()), Some("RRII"));
}

/// Nothing run yet: prompt text and a single blank frame.
#[test]
fn test_no_run_presentation() {
    let network = sir_events::fixtures::sample_network();
    assert_eq!(summary_panel(None), "Click START to run the simulation.");

    let scene = ReplayScene::build(&network, &Timeline::new());
    assert_eq!(scene.frame_count(), 1);
    assert_eq!(scene.frame(0), Some("SSSS"));
    assert_eq!(EpidemicCurve::from_stats(&[]).title, "No data to display.");
}

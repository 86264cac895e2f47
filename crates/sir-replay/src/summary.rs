use sir_events::Timeline;

pub const NO_RUN_MESSAGE: &str = "Click START to run the simulation.";

/// Final-day panel text, or a prompt when nothing has run yet.
pub fn summary_panel(timeline: Option<&Timeline>) -> String {
    let Some(timeline) = timeline else {
        return NO_RUN_MESSAGE.to_string();
    };
    let (day, s, i, r) = timeline
        .final_stats()
        .map(|f| (f.day, f.susceptible, f.infected, f.recovered))
        .unwrap_or_default();
    format!("Final Day: {day}\nSusceptible: {s}\nInfected: {i}\nRecovered: {r}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sir_events::fixtures::sample_timeline;

    #[test]
    fn test_panel_for_run() {
        let panel = summary_panel(Some(&sample_timeline()));
        assert_eq!(panel, "Final Day: 3\nSusceptible: 0\nInfected: 2\nRecovered: 2");
    }

    #[test]
    fn test_panel_without_run() {
        assert_eq!(summary_panel(None), NO_RUN_MESSAGE);
    }

    #[test]
    fn test_panel_empty_timeline() {
        let panel = summary_panel(Some(&Timeline::new()));
        assert!(panel.starts_with("Final Day: 0"));
    }
}

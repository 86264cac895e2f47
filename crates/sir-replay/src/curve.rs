//! Epidemic Curve
//!
//! S, I and R population over time in long format (one row per day and
//! state), ready for a line chart or CSV export.

use serde::{Deserialize, Serialize};

use sir_events::{HealthState, StatsRecord};

use crate::palette;

pub const CURVE_TITLE: &str = "Epidemic Curve (S-I-R Model)";
pub const EMPTY_TITLE: &str = "No data to display.";
pub const X_AXIS_TITLE: &str = "Time Step (Days)";
pub const Y_AXIS_TITLE: &str = "Number of People";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub day: u32,
    pub state: HealthState,
    pub population: usize,
}

/// Chart-ready curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpidemicCurve {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    /// Grouped by state (all S rows, then I, then R), days ascending within each
    pub points: Vec<CurvePoint>,
}

impl EpidemicCurve {
    pub fn from_stats(stats: &[StatsRecord]) -> Self {
        let title = if stats.is_empty() { EMPTY_TITLE } else { CURVE_TITLE };
        let points = HealthState::ALL
            .iter()
            .flat_map(|&state| {
                stats.iter().map(move |record| CurvePoint {
                    day: record.day,
                    state,
                    population: record.count(state),
                })
            })
            .collect();

        Self {
            title: title.to_string(),
            x_axis: X_AXIS_TITLE.to_string(),
            y_axis: Y_AXIS_TITLE.to_string(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(day, population)` pairs for one state.
    pub fn series(&self, state: HealthState) -> Vec<(u32, usize)> {
        self.points
            .iter()
            .filter(|p| p.state == state)
            .map(|p| (p.day, p.population))
            .collect()
    }

    /// Line colour for each state, keyed by state code.
    pub fn colors(&self) -> Vec<(char, &'static str)> {
        HealthState::ALL
            .iter()
            .map(|&s| (s.code(), palette::state_color(s)))
            .collect()
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("day,state,population\n");
        for p in &self.points {
            csv.push_str(&format!("{},{},{}\n", p.day, p.state.code(), p.population));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sir_events::fixtures::sample_timeline;

    #[test]
    fn test_long_format() {
        let timeline = sample_timeline();
        let curve = EpidemicCurve::from_stats(&timeline.stats);

        assert_eq!(curve.title, CURVE_TITLE);
        assert_eq!(curve.points.len(), 12);
        assert_eq!(curve.points[0].state, HealthState::Susceptible);
        assert_eq!(curve.points[4].state, HealthState::Infected);
        assert_eq!(curve.series(HealthState::Infected), vec![(0, 1), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_empty_stats() {
        let curve = EpidemicCurve::from_stats(&[]);
        assert_eq!(curve.title, "No data to display.");
        assert!(curve.is_empty());
        assert_eq!(curve.to_csv(), "day,state,population\n");
    }

    #[test]
    fn test_csv_rows() {
        let stats = [StatsRecord::new(0, 9, 1, 0), StatsRecord::new(1, 7, 2, 1)];
        let csv = EpidemicCurve::from_stats(&stats).to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "0,S,9");
        assert_eq!(lines[4], "1,I,2");
        assert_eq!(lines[6], "1,R,1");
    }

    #[test]
    fn test_csv_every_row_terminated() {
        let stats = [StatsRecord::new(0, 3, 0, 0)];
        let csv = EpidemicCurve::from_stats(&stats).to_csv();
        assert_eq!(csv, "day,state,population\n0,S,3\n0,I,0\n0,R,0\n");

        let empty = EpidemicCurve::from_stats(&[]).to_csv();
        assert_eq!(empty, "day,state,population\n");
    }
}

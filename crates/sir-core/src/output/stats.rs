//! Run Statistics
//!
//! Condenses a finished run into the headline numbers shown next to the
//! epidemic curve.

use serde::{Deserialize, Serialize};

use sir_events::Timeline;

use crate::runner::SimulationRun;

/// Headline numbers for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub fingerprint: String,
    pub population: usize,
    pub seeded_cases: usize,
    pub final_day: u32,
    pub final_susceptible: usize,
    pub final_infected: usize,
    pub final_recovered: usize,
    pub peak_infected: usize,
    pub peak_day: u32,
    /// Share of the population ever infected by the final day
    pub attack_rate: f64,
    pub stopped_early: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_reproduction_number: Option<f64>,
}

impl RunSummary {
    /// Builds the summary; `mean_degree` feeds the R0 estimate.
    pub fn from_run(run: &SimulationRun, mean_degree: f64) -> Self {
        let population = run.config.population;
        let (final_day, final_s, final_i, final_r) = final_counts(&run.timeline, population);
        let (peak_infected, peak_day) = run
            .timeline
            .peak_infected()
            .map(|p| (p.infected, p.day))
            .unwrap_or((0, 0));

        Self {
            fingerprint: run.fingerprint.to_hex(),
            population,
            seeded_cases: run.seeded.len(),
            final_day,
            final_susceptible: final_s,
            final_infected: final_i,
            final_recovered: final_r,
            peak_infected,
            peak_day,
            attack_rate: attack_rate(final_i + final_r, population),
            stopped_early: run.outcome.stopped_early(),
            basic_reproduction_number: run.config.disease.basic_reproduction_number(mean_degree),
        }
    }
}

fn final_counts(timeline: &Timeline, population: usize) -> (u32, usize, usize, usize) {
    timeline
        .final_stats()
        .map(|s| (s.day, s.susceptible, s.infected, s.recovered))
        .unwrap_or((0, population, 0, 0))
}

fn attack_rate(ever_infected: usize, population: usize) -> f64 {
    if population == 0 {
        0.0
    } else {
        ever_infected as f64 / population as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runner::{execute, prepare};

    #[test]
    fn test_summary_from_run() {
        let mut config = Config::default();
        config.population.size = 100;
        config.population.initial_cases = 1;
        config.disease.infection_probability = 1.0;
        config.disease.recovery_probability = 1.0;
        let (validated, network) = prepare(config).unwrap();
        let run = execute(&validated, &network).unwrap();

        let summary = RunSummary::from_run(&run, network.graph().mean_degree());
        // Day 1: everyone else infected, seed recovered. Day 2: all recovered.
        assert_eq!(summary.peak_infected, 99);
        assert_eq!(summary.peak_day, 1);
        assert_eq!(summary.final_day, 2);
        assert_eq!(summary.final_recovered, 100);
        assert!((summary.attack_rate - 1.0).abs() < 1e-9);
        assert!(summary.stopped_early);
        assert_eq!(summary.seeded_cases, 1);
        assert!(summary.basic_reproduction_number.is_some());
    }

    #[test]
    fn test_attack_rate_empty_population() {
        assert_eq!(attack_rate(0, 0), 0.0);
        assert!((attack_rate(25, 100) - 0.25).abs() < 1e-9);
    }
}

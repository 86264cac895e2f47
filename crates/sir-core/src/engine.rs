//! Simulation Engine
//!
//! Discrete-day SIR process over a fixed contact graph.
//!
//! Each day is decided entirely from the state at the start of that day:
//! infections and recoveries are collected first and applied together, so
//! nothing that happens on day `d` can influence another decision on day
//! `d`. After every day one [`StatsRecord`] and one [`StateSnapshot`] are
//! appended to the run's [`Timeline`].
//!
//! [`StatsRecord`]: sir_events::StatsRecord
//! [`StateSnapshot`]: sir_events::StateSnapshot

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use sir_events::{HealthState, NodeId, StateSnapshot, StatsRecord, Timeline};

use crate::compartments::Compartments;
use crate::disease::DiseaseModel;
use crate::error::{SimError, SimResult};
use crate::network::ContactGraph;

/// Transitions applied by one call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayChanges {
    pub day: u32,
    pub newly_infected: usize,
    pub newly_recovered: usize,
}

/// Why [`Simulation::run`] stopped.
///
/// A quiescent stop leaves the timeline shorter than the requested budget;
/// consumers indexing history by day must allow for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RunOutcome {
    /// No infected nodes remained, so later days could not change anything.
    Quiescent { day: u32 },
    /// The day budget was reached.
    BudgetExhausted { day: u32 },
}

impl RunOutcome {
    /// Last simulated day.
    pub fn day(&self) -> u32 {
        match *self {
            RunOutcome::Quiescent { day } | RunOutcome::BudgetExhausted { day } => day,
        }
    }

    pub fn stopped_early(&self) -> bool {
        matches!(self, RunOutcome::Quiescent { .. })
    }
}

/// SIR simulation over a shared contact graph.
pub struct Simulation {
    graph: Arc<ContactGraph>,
    disease: DiseaseModel,
    rng: SmallRng,
    day: u32,
    compartments: Compartments,
    timeline: Timeline,
}

impl Simulation {
    /// Creates a simulation with every node Susceptible and day 0 recorded.
    pub fn new(graph: Arc<ContactGraph>, disease: DiseaseModel, seed: u64) -> SimResult<Self> {
        if graph.is_empty() {
            return Err(SimError::invalid("population", "contact graph has no nodes"));
        }

        let compartments = Compartments::all_susceptible(graph.node_count());
        let mut timeline = Timeline::new();
        timeline.push(compartments.stats(0), compartments.snapshot(0));

        Ok(Self {
            graph,
            disease,
            rng: SmallRng::seed_from_u64(seed),
            day: 0,
            compartments,
            timeline,
        })
    }

    /// Infects up to `count` distinct Susceptible nodes chosen uniformly.
    ///
    /// Asking for more cases than there are Susceptible nodes infects all
    /// of them. Only live state changes: recorded history, including the
    /// all-Susceptible day-0 record, is never rewritten.
    pub fn seed_initial_cases(&mut self, count: usize) -> Vec<NodeId> {
        let available = self.compartments.count(HealthState::Susceptible);
        let amount = count.min(available);
        if amount < count {
            tracing::debug!(
                "Clamped initial cases from {} to {} susceptible nodes",
                count,
                available
            );
        }

        let mut pool: Vec<NodeId> = self.compartments.susceptible().iter().copied().collect();
        let (chosen, _) = pool.partial_shuffle(&mut self.rng, amount);
        let mut chosen = chosen.to_vec();
        chosen.sort_unstable();

        for &node in &chosen {
            self.compartments.transition(node, HealthState::Infected);
        }
        tracing::debug!("Seeded {} cases on day {}", chosen.len(), self.day);

        chosen
    }

    /// Advances the simulation by exactly one day.
    pub fn step(&mut self) -> DayChanges {
        let mut pending_infection: BTreeSet<NodeId> = BTreeSet::new();
        let mut pending_recovery: Vec<NodeId> = Vec::new();

        // Decide every transition from start-of-day state; nothing is applied yet.
        for &node in self.compartments.infected() {
            for &neighbor in self.graph.neighbors(node) {
                if self.compartments.state_of(neighbor) == Some(HealthState::Susceptible)
                    && self.disease.should_infect(&mut self.rng)
                {
                    pending_infection.insert(neighbor);
                }
            }
            if self.disease.should_recover(&mut self.rng) {
                pending_recovery.push(node);
            }
        }

        for &node in &pending_infection {
            self.compartments.transition(node, HealthState::Infected);
        }
        for &node in &pending_recovery {
            self.compartments.transition(node, HealthState::Recovered);
        }
        debug_assert!(self.compartments.is_consistent());

        self.day += 1;
        self.timeline.push(
            self.compartments.stats(self.day),
            self.compartments.snapshot(self.day),
        );

        let changes = DayChanges {
            day: self.day,
            newly_infected: pending_infection.len(),
            newly_recovered: pending_recovery.len(),
        };
        tracing::trace!(
            day = changes.day,
            newly_infected = changes.newly_infected,
            newly_recovered = changes.newly_recovered,
            "Simulated day"
        );
        changes
    }

    /// Steps until day `max_days` is reached or no infected nodes remain.
    ///
    /// With nobody infected no later day can differ from the current one,
    /// so the timeline may end before `max_days`.
    pub fn run(&mut self, max_days: u32) -> RunOutcome {
        while self.day < max_days {
            if self.is_quiescent() {
                tracing::debug!("No infected nodes left on day {}; stopping", self.day);
                return RunOutcome::Quiescent { day: self.day };
            }
            self.step();
        }
        RunOutcome::BudgetExhausted { day: self.day }
    }

    /// Current day counter.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// True once no infected nodes remain.
    pub fn is_quiescent(&self) -> bool {
        self.compartments.infected().is_empty()
    }

    pub fn state_of(&self, node: NodeId) -> Option<HealthState> {
        self.compartments.state_of(node)
    }

    /// Live compartment counts for the current day.
    pub fn counts(&self) -> StatsRecord {
        self.compartments.stats(self.day)
    }

    pub fn compartments(&self) -> &Compartments {
        &self.compartments
    }

    pub fn graph(&self) -> &Arc<ContactGraph> {
        &self.graph
    }

    pub fn disease(&self) -> &DiseaseModel {
        &self.disease
    }

    /// Recorded history, one entry per day including day 0.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn stats(&self) -> &[StatsRecord] {
        &self.timeline.stats
    }

    pub fn snapshots(&self) -> &[StateSnapshot] {
        &self.timeline.snapshots
    }

    /// Consumes the simulation, keeping only its history.
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}

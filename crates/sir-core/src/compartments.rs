//! Health State Partition
//!
//! Tracks which compartment every node is in. The dense `states` array is
//! indexed by node id; the three ordered sets mirror it so the engine can
//! walk the infected population without scanning every node.

use std::collections::BTreeSet;

use sir_events::{HealthState, NodeId, StateSnapshot, StatsRecord};

/// Disjoint, exhaustive S/I/R partition of the node set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compartments {
    states: Vec<HealthState>,
    susceptible: BTreeSet<NodeId>,
    infected: BTreeSet<NodeId>,
    recovered: BTreeSet<NodeId>,
}

impl Compartments {
    /// Every node starts Susceptible.
    pub fn all_susceptible(node_count: usize) -> Self {
        Self {
            states: vec![HealthState::Susceptible; node_count],
            susceptible: (0..node_count).map(NodeId).collect(),
            infected: BTreeSet::new(),
            recovered: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state_of(&self, node: NodeId) -> Option<HealthState> {
        self.states.get(node.index()).copied()
    }

    /// Dense per-node states in id order.
    pub fn states(&self) -> &[HealthState] {
        &self.states
    }

    pub fn members(&self, state: HealthState) -> &BTreeSet<NodeId> {
        match state {
            HealthState::Susceptible => &self.susceptible,
            HealthState::Infected => &self.infected,
            HealthState::Recovered => &self.recovered,
        }
    }

    pub fn susceptible(&self) -> &BTreeSet<NodeId> {
        &self.susceptible
    }

    pub fn infected(&self) -> &BTreeSet<NodeId> {
        &self.infected
    }

    pub fn recovered(&self) -> &BTreeSet<NodeId> {
        &self.recovered
    }

    pub fn count(&self, state: HealthState) -> usize {
        self.members(state).len()
    }

    /// Moves a node along the S -> I -> R chain.
    ///
    /// # Panics
    ///
    /// Panics on any other transition or an unknown node. Both mean the
    /// caller broke the engine's contract.
    pub fn transition(&mut self, node: NodeId, next: HealthState) {
        let current = match self.states.get(node.index()) {
            Some(state) => *state,
            None => panic!("{} is not part of a {}-node partition", node, self.states.len()),
        };
        assert!(
            current.can_transition_to(next),
            "illegal transition {:?} -> {:?} for {}",
            current,
            next,
            node
        );
        self.set_mut(current).remove(&node);
        self.set_mut(next).insert(node);
        self.states[node.index()] = next;
    }

    fn set_mut(&mut self, state: HealthState) -> &mut BTreeSet<NodeId> {
        match state {
            HealthState::Susceptible => &mut self.susceptible,
            HealthState::Infected => &mut self.infected,
            HealthState::Recovered => &mut self.recovered,
        }
    }

    /// Aggregate counts for the given day.
    pub fn stats(&self, day: u32) -> StatsRecord {
        StatsRecord::new(
            day,
            self.susceptible.len(),
            self.infected.len(),
            self.recovered.len(),
        )
    }

    /// Owned copy of every node's state for the given day.
    pub fn snapshot(&self, day: u32) -> StateSnapshot {
        StateSnapshot::new(day, self.states.clone())
    }

    /// Checks that the sets and the dense array describe the same partition.
    pub fn is_consistent(&self) -> bool {
        let sizes_match = self.susceptible.len() + self.infected.len() + self.recovered.len()
            == self.states.len();
        sizes_match
            && self
                .states
                .iter()
                .enumerate()
                .all(|(i, &state)| self.members(state).contains(&NodeId(i)))
    }
}

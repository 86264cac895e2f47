//! Node Health States
//!
//! The fixed three-compartment schema every node is assigned to, plus the
//! dense node index used to address per-node data.
//!
//! # Example
//!
//! ```
//! use sir_events::HealthState;
//!
//! assert_eq!(HealthState::Infected.code(), 'I');
//! assert_eq!("R".parse::<HealthState>().unwrap(), HealthState::Recovered);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable dense index of a node in the contact network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the position of this node in dense per-node arrays.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

/// Compartment a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HealthState {
    #[default]
    #[serde(rename = "S")]
    Susceptible,
    #[serde(rename = "I")]
    Infected,
    #[serde(rename = "R")]
    Recovered,
}

impl HealthState {
    /// All states in compartment order.
    pub const ALL: [HealthState; 3] = [
        HealthState::Susceptible,
        HealthState::Infected,
        HealthState::Recovered,
    ];

    /// Single-character state code used in snapshots and replay frames.
    pub fn code(self) -> char {
        match self {
            HealthState::Susceptible => 'S',
            HealthState::Infected => 'I',
            HealthState::Recovered => 'R',
        }
    }

    /// Parses a single-character state code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'S' => Some(HealthState::Susceptible),
            'I' => Some(HealthState::Infected),
            'R' => Some(HealthState::Recovered),
            _ => None,
        }
    }

    /// Human-readable compartment name.
    pub fn label(self) -> &'static str {
        match self {
            HealthState::Susceptible => "Susceptible",
            HealthState::Infected => "Infected",
            HealthState::Recovered => "Recovered",
        }
    }

    /// Returns true if `self -> next` is a legal SIR transition.
    pub fn can_transition_to(self, next: HealthState) -> bool {
        matches!(
            (self, next),
            (HealthState::Susceptible, HealthState::Infected)
                | (HealthState::Infected, HealthState::Recovered)
        )
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for HealthState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                HealthState::from_code(c).ok_or_else(|| ParseStateError(s.to_string()))
            }
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

/// Error returned when a state code is not one of `S`, `I`, `R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError(pub String);

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid health state code: {:?}", self.0)
    }
}

impl std::error::Error for ParseStateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for state in HealthState::ALL {
            assert_eq!(HealthState::from_code(state.code()), Some(state));
        }
        assert_eq!(HealthState::from_code('X'), None);
    }

    #[test]
    fn test_parse_rejects_multi_char() {
        assert!("SI".parse::<HealthState>().is_err());
        assert!("".parse::<HealthState>().is_err());
        assert_eq!("I".parse::<HealthState>(), Ok(HealthState::Infected));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&HealthState::Recovered).unwrap();
        assert_eq!(json, "\"R\"");
        let parsed: HealthState = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(parsed, HealthState::Susceptible);
    }

    #[test]
    fn test_legal_transitions() {
        use HealthState::*;
        assert!(Susceptible.can_transition_to(Infected));
        assert!(Infected.can_transition_to(Recovered));
        assert!(!Recovered.can_transition_to(Infected));
        assert!(!Recovered.can_transition_to(Susceptible));
        assert!(!Susceptible.can_transition_to(Recovered));
        assert!(!Infected.can_transition_to(Infected));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "node_7");
        assert_eq!(NodeId::from(3).index(), 3);
    }
}

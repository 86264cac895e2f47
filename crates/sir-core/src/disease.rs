//! Disease Model
//!
//! Per-step transmission and recovery probabilities, exposed as two
//! independent Bernoulli trials.

use rand::Rng;
use serde::Serialize;

use crate::error::{SimError, SimResult};

/// Infection and recovery probabilities, constant for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiseaseModel {
    infection_probability: f64,
    recovery_probability: f64,
}

impl DiseaseModel {
    /// Creates a model, rejecting probabilities outside `[0, 1]`.
    pub fn new(infection_probability: f64, recovery_probability: f64) -> SimResult<Self> {
        Ok(Self {
            infection_probability: check_probability(
                "infection_probability",
                infection_probability,
            )?,
            recovery_probability: check_probability("recovery_probability", recovery_probability)?,
        })
    }

    /// Probability that an infected-susceptible contact transmits in one day.
    pub fn infection_probability(&self) -> f64 {
        self.infection_probability
    }

    /// Probability that an infected node recovers in one day.
    pub fn recovery_probability(&self) -> f64 {
        self.recovery_probability
    }

    /// One transmission trial.
    pub fn should_infect<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.infection_probability)
    }

    /// One recovery trial.
    pub fn should_recover<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.recovery_probability)
    }

    /// Expected secondary cases per index case in a fully susceptible
    /// network with the given mean degree.
    ///
    /// `None` when recovery never happens.
    pub fn basic_reproduction_number(&self, mean_degree: f64) -> Option<f64> {
        if self.recovery_probability > 0.0 {
            Some(self.infection_probability * mean_degree / self.recovery_probability)
        } else {
            None
        }
    }
}

/// Validates that `value` is a finite probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::invalid(
            name,
            format!("{} is outside [0, 1]", value),
        ))
    }
}

//! Run Cache
//!
//! Memoizes completed runs by configuration fingerprint. Any change to a
//! validated parameter or to the contact graph produces a new fingerprint,
//! so a stale run is never returned for a new configuration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{Fingerprint, ValidatedConfig};
use crate::error::SimResult;
use crate::network::ContactNetwork;
use crate::runner::{self, SimulationRun};

/// Completed runs keyed by [`Fingerprint`].
#[derive(Debug, Default)]
pub struct RunCache {
    runs: HashMap<Fingerprint, Arc<SimulationRun>>,
    hits: u64,
    misses: u64,
}

impl RunCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached run for this configuration, running it on a miss.
    pub fn get_or_run(
        &mut self,
        config: &ValidatedConfig,
        network: &ContactNetwork,
    ) -> SimResult<Arc<SimulationRun>> {
        let key = config.fingerprint(network.graph());
        if let Some(run) = self.runs.get(&key) {
            self.hits += 1;
            tracing::debug!("Run cache hit for {}", key);
            return Ok(Arc::clone(run));
        }

        self.misses += 1;
        tracing::debug!("Run cache miss for {}", key);
        let run = Arc::new(runner::execute(config, network)?);
        self.runs.insert(key, Arc::clone(&run));
        Ok(run)
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<SimulationRun>> {
        self.runs.get(fingerprint).cloned()
    }

    /// Drops one cached run. Returns true if it was present.
    pub fn invalidate(&mut self, fingerprint: &Fingerprint) -> bool {
        self.runs.remove(fingerprint).is_some()
    }

    /// Drops every cached run.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runner::prepare;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.population.size = 40;
        config.simulation.days = 30;
        config.disease.infection_probability = 0.1;
        config.disease.recovery_probability = 0.3;
        config
    }

    #[test]
    fn test_hit_returns_same_run() {
        let (validated, network) = prepare(small_config()).unwrap();
        let mut cache = RunCache::new();

        let first = cache.get_or_run(&validated, &network).unwrap();
        let second = cache.get_or_run(&validated, &network).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_changed_config_misses() {
        let (validated, network) = prepare(small_config()).unwrap();
        let mut changed = small_config();
        changed.simulation.seed = 7;
        let (changed, _) = prepare(changed).unwrap();

        let mut cache = RunCache::new();
        let a = cache.get_or_run(&validated, &network).unwrap();
        let b = cache.get_or_run(&changed, &network).unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let (validated, network) = prepare(small_config()).unwrap();
        let mut cache = RunCache::new();
        let run = cache.get_or_run(&validated, &network).unwrap();

        assert!(cache.get(&run.fingerprint).is_some());
        assert!(cache.invalidate(&run.fingerprint));
        assert!(!cache.invalidate(&run.fingerprint));
        assert!(cache.is_empty());

        cache.get_or_run(&validated, &network).unwrap();
        cache.clear();
        assert!(cache.get(&run.fingerprint).is_none());
    }
}

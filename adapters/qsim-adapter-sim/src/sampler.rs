//! Shot sampling from a statevector.

use std::collections::BTreeMap;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Shot histogram keyed by bitstring (most-significant qubit first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MeasurementOutcome(BTreeMap<String, u64>);

impl MeasurementOutcome {
    /// Count for a bitstring (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no shot was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, u64> {
        self.0
    }
}

/// Draws independent shots from the Born distribution of a statevector.
pub struct MeasurementSampler {
    rng: StdRng,
}

impl MeasurementSampler {
    /// Sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed; identical seeds give identical histograms.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    /// Sample `shots` measurements of every qubit.
    ///
    /// Weights are taken relative to their sum, so a distribution that
    /// drifted slightly from 1 is renormalised implicitly.
    pub fn sample(&mut self, sv: &Statevector, shots: u64) -> SimResult<MeasurementOutcome> {
        let probabilities = sv.probabilities();
        let dist = WeightedIndex::new(&probabilities)
            .map_err(|e| SimError::Distribution(e.to_string()))?;

        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *tally.entry(dist.sample(&mut self.rng)).or_insert(0) += 1;
        }
        debug!(shots, outcomes = tally.len(), "sampling finished");

        Ok(MeasurementOutcome(
            tally
                .into_iter()
                .map(|(index, count)| (sv.bitstring(index), count))
                .collect(),
        ))
    }
}

impl Default for MeasurementSampler {
    fn default() -> Self {
        Self::new()
    }
}

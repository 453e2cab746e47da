//! Destination choice for re-replication.
//!
//! Recovery picks a new home for each under-replicated file uniformly at
//! random among the healthy hosts. The choice sits behind [`HostSelector`] so
//! tests can swap in a seeded generator, or a fully scripted one, and get the
//! same records on every run.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("no candidate hosts to choose from")]
    EmptyCandidateSet,
}

/// Picks one host out of a non-empty candidate list.
pub trait HostSelector {
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Result<&'a str, SelectorError>;
}

/// Uniform random choice backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeds from OS entropy. Use this outside of tests.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same candidates, same answers.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl HostSelector for RandomSelector {
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Result<&'a str, SelectorError> {
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(SelectorError::EmptyCandidateSet)
    }
}

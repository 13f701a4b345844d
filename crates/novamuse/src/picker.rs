//! Injectable source of randomness for the random-quote handler.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform picker shared across requests.
///
/// Seed it for deterministic tests; the default draws its seed from the OS.
#[derive(Debug, Clone)]
pub struct QuotePicker {
    rng: Arc<Mutex<StdRng>>,
}

impl Default for QuotePicker {
    fn default() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }
}

impl QuotePicker {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Picks one element uniformly, or `None` from an empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.get(rng.random_range(0..items.len()))
    }
}

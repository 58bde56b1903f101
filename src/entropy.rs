//! Randomness source for request fingerprint variation
//!
//! Header order, the device id, the impersonated user agent and the QoS spoof header
//! all come from an [`Entropy`] implementation so tests can swap in a seeded source
//! and still observe varying header order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Source of the random choices made while building requests
pub trait Entropy: Send + Sync {
    /// Shuffle headers in place before they are attached to a request
    fn shuffle_headers(&self, headers: &mut [(String, String)]);

    /// Pick an index in `0..len`
    ///
    /// `len` is always non-zero.
    fn choose_index(&self, len: usize) -> usize;

    /// Generate a device identifier (UUID v4 text form)
    fn device_id(&self) -> String;

    /// Value for the `x-reddit-qos` header, in `0.0..100.0`
    fn qos(&self) -> f64;
}

/// Entropy backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngEntropy;

impl Entropy for ThreadRngEntropy {
    fn shuffle_headers(&self, headers: &mut [(String, String)]) {
        headers.shuffle(&mut rand::thread_rng());
    }

    fn choose_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn device_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn qos(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}

/// Deterministic entropy seeded from a `u64`
///
/// Two instances with the same seed produce the same sequence of choices, while
/// successive calls on one instance still differ from each other.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    /// Create a seeded entropy source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Entropy for SeededEntropy {
    fn shuffle_headers(&self, headers: &mut [(String, String)]) {
        self.with_rng(|rng| headers.shuffle(rng));
    }

    fn choose_index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..len))
    }

    fn device_id(&self) -> String {
        let mut bytes = [0u8; 16];
        self.with_rng(|rng| rng.fill(&mut bytes));
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    fn qos(&self) -> f64 {
        self.with_rng(|rng| rng.gen_range(0.0..100.0))
    }
}

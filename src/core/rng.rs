//! Deterministic random number generation for board dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same board
//! - **Context streams**: Independent sequences for word sampling and colour dealing
//! - **Replayable**: The seed of every stream is recorded, including entropy-seeded ones
//!
//! ## Usage
//!
//! ```
//! use codenames_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Word sampling never perturbs the colour shuffle
//! let mut words = rng.for_context("words");
//!
//! let mut a = vec![1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! rng.shuffle(&mut a);
//! GameRng::new(42).shuffle(&mut b);
//! assert_eq!(a, b);
//! # words.shuffle(&mut a);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// FNV-1a offset basis and prime (64-bit).
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Deterministic, injectable RNG.
///
/// Uses ChaCha8 so a seed reproduces the same deal on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    ///
    /// The chosen seed is available via [`GameRng::seed`] so a game can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// regardless of how far `self` has advanced. The stream seed is a fixed
    /// FNV-1a hash of the seed's little-endian bytes and the context, so it
    /// does not depend on the platform or the toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let hash = self
            .seed
            .to_le_bytes()
            .iter()
            .chain(context.as_bytes())
            .fold(FNV_OFFSET, |hash, &byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            });
        Self::new(hash)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

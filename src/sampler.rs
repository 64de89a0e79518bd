//! Markov chain sampling.
//!
//! Draws state sequences from a transition matrix using an explicit,
//! seedable random source. ChaCha20 streams give every simulation run an
//! independent, reproducible random sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::transition::TransitionMatrix;

/// Seedable random source for chain sampling.
///
/// Wraps `ChaCha20Rng`; the `(seed, stream)` pair fully determines the
/// output, and distinct streams of the same seed are statistically
/// independent, which is what keeps parallel simulation runs uncorrelated.
#[derive(Debug, Clone)]
pub struct ChainRng {
    rng: ChaCha20Rng,
    seed: u64,
    stream: u64,
}

impl ChainRng {
    /// Create a generator on stream 0.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Create a generator on an explicit stream.
    #[must_use]
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng, seed, stream }
    }

    /// Uniform sample in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream this generator was created with.
    #[must_use]
    pub fn stream(&self) -> u64 {
        self.stream
    }
}

/// Sample a state path of length `n_steps + 1` starting at `start_state`.
///
/// Each subsequent state is drawn by treating the current state's matrix row
/// as a categorical distribution (inverse-CDF draw). The process is
/// first-order Markov: a draw reads only the current state's row.
///
/// # Example
/// ```
/// use cadena::sampler::{sample_path, ChainRng};
/// use cadena::transition::TransitionMatrix;
///
/// let matrix = TransitionMatrix::from_rows(&[vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
/// let mut rng = ChainRng::new(42);
/// let path = sample_path(&matrix, 0, 10, &mut rng);
/// assert_eq!(path.len(), 11);
/// assert_eq!(path[0], 0);
/// ```
#[must_use]
pub fn sample_path(
    matrix: &TransitionMatrix,
    start_state: usize,
    n_steps: usize,
    rng: &mut ChainRng,
) -> Vec<usize> {
    debug_assert!(start_state < matrix.n_states());

    let mut path = Vec::with_capacity(n_steps + 1);
    let mut current = start_state;
    path.push(current);

    for _ in 0..n_steps {
        current = draw_next(matrix.row(current), rng);
        path.push(current);
    }

    path
}

/// Inverse-CDF draw from a probability row.
///
/// Rounding can leave the row sum a hair under 1.0; the final state absorbs
/// any leftover mass.
#[inline]
fn draw_next(row: &[f64], rng: &mut ChainRng) -> usize {
    let u = rng.uniform();
    let mut cumulative = 0.0;
    for (state, &p) in row.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            return state;
        }
    }
    row.len() - 1
}

//! Parallelism configuration shared by the codec.

use rayon::prelude::*;

use crate::error::CodecError;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// When `Parallel`, components may use `rayon` parallel iterators.
/// When `Sequential`, components must use sequential iteration.
///
/// The actual thread pool is set up by [`run_with_threads`]; components only
/// respect this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map preserving input order.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use the global rayon pool)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, CodecError> {
    match (Parallelism::from_threads(n_threads), n_threads) {
        (Parallelism::Sequential, _) => Ok(f(Parallelism::Sequential)),
        (Parallelism::Parallel, 0) => Ok(f(Parallelism::Parallel)),
        (Parallelism::Parallel, n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| CodecError::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

//! Sequential/parallel dispatch policy
//!
//! The policy is a pure function of operand shape and the parallelism budget.
//! Below [`PARALLEL_ORDER_THRESHOLD`] task overhead outweighs the savings, so
//! small products always run on the calling thread.

use crate::parallel::logical_cores;
use std::ops::Range;

/// Smallest `max(rows, cols)` for which an operand is worth splitting.
pub const PARALLEL_ORDER_THRESHOLD: usize = 32;

/// Lower bound of the parallelism budget
pub const MIN_PARALLELISM: usize = 1;

/// Upper bound of the parallelism budget
pub const MAX_PARALLELISM: usize = 1024;

/// Decides whether a kernel runs sequentially or split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchPolicy {
    max_parallelism: usize,
}

impl DispatchPolicy {
    /// Create a policy with the given budget, clamped to
    /// [`MIN_PARALLELISM`]..=[`MAX_PARALLELISM`].
    pub fn new(max_parallelism: usize) -> Self {
        Self {
            max_parallelism: max_parallelism.clamp(MIN_PARALLELISM, MAX_PARALLELISM),
        }
    }

    /// A policy that never parallelizes
    pub fn sequential() -> Self {
        Self::new(MIN_PARALLELISM)
    }

    /// The clamped parallelism budget
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Whether a single `rows × cols` operand is large enough to split
    #[inline]
    pub fn is_eligible(&self, rows: usize, cols: usize) -> bool {
        self.max_parallelism >= 2 && rows.max(cols) >= PARALLEL_ORDER_THRESHOLD
    }

    /// Whether the product `X(rows_x × cols_x) · Y(rows_y × cols_y)` should run
    /// in parallel. Both operands must be eligible.
    pub fn should_parallelize_product(
        &self,
        rows_x: usize,
        cols_x: usize,
        rows_y: usize,
        cols_y: usize,
    ) -> bool {
        self.is_eligible(rows_x, cols_x) && self.is_eligible(rows_y, cols_y)
    }

    /// Split `0..rows` into at most `max_parallelism` contiguous, non-empty,
    /// non-overlapping chunks covering every row exactly once.
    pub fn partition_rows(&self, rows: usize) -> Vec<Range<usize>> {
        if rows == 0 {
            return Vec::new();
        }
        let chunks = self.max_parallelism.min(rows);
        let chunk_size = rows.div_ceil(chunks);
        (0..rows)
            .step_by(chunk_size)
            .map(|start| start..(start + chunk_size).min(rows))
            .collect()
    }
}

impl Default for DispatchPolicy {
    /// Budget equal to the number of logical cores
    fn default() -> Self {
        Self::new(logical_cores())
    }
}

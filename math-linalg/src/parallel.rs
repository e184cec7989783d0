//! Parallel utilities with feature-gated implementations
//!
//! Uses rayon when the `rayon` feature is enabled, with sequential fallbacks
//! otherwise. Only the matrix-multiply kernels go through here.

/// Check if parallel processing is available
#[inline]
pub fn is_parallel_available() -> bool {
    cfg!(feature = "rayon")
}

/// Number of logical workers available to the process
#[cfg(feature = "rayon")]
pub fn logical_cores() -> usize {
    rayon::current_num_threads()
}

/// Number of logical workers available to the process
#[cfg(not(feature = "rayon"))]
pub fn logical_cores() -> usize {
    1
}

/// Parallel map with index
#[cfg(feature = "rayon")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Sequential map with index (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_indexed() {
        let result = parallel_map_indexed(5, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_logical_cores_positive() {
        assert!(logical_cores() >= 1);
        if !is_parallel_available() {
            assert_eq!(logical_cores(), 1);
        }
    }
}

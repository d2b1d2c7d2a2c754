//! Closure-backed partitioner.

use crate::partitioner::traits::Partitioner;
use std::fmt;

/// Adapts any `Fn(&[u8]) -> u64` into a [`Partitioner`].
///
/// ```rust
/// use corelib::partitioner::{FnPartitioner, Partitioner};
///
/// let p = FnPartitioner::new(|data: &[u8]| data.len() as u64);
/// assert_eq!(p.partition(b"abc"), 3);
/// ```
#[derive(Clone)]
pub struct FnPartitioner<F> {
    func: F,
}

impl<F> FnPartitioner<F>
where
    F: Fn(&[u8]) -> u64 + Send + Sync + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Partitioner for FnPartitioner<F>
where
    F: Fn(&[u8]) -> u64 + Send + Sync + 'static,
{
    #[inline]
    fn partition(&self, key: &[u8]) -> u64 {
        (self.func)(key)
    }

    fn name(&self) -> &'static str {
        "FnPartitioner"
    }
}

impl<F> fmt::Debug for FnPartitioner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPartitioner").finish_non_exhaustive()
    }
}

//! SipHash-1-3 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 partitioner with fixed zero keys.
///
/// The keys are constant so that positions survive process restarts,
/// unlike `std`'s randomly keyed `DefaultHasher`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner;

impl Partitioner for SipPartitioner {
    fn partition(&self, key: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}

use super::*;

use proptest::prelude::*;

pub(super) fn reference_hash(data: &[u8]) -> u32 {
    let mut hash: u64 = 0;
    for &byte in data {
        hash = (hash * u64::from(HASH_BASE) + u64::from(byte)) % u64::from(HASH_MODULUS);
    }
    hash as u32
}

pub(super) fn random_data_and_window() -> impl Strategy<Value = (Vec<u8>, usize)> {
    prop::collection::vec(any::<u8>(), 1..=256).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 1..=len)
    })
}

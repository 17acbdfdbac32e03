use alloc::format;

use crate::Pos3;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a. Non-cryptographic, but stable across platforms, which is
/// all the procedural placement needs.
fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic bomb placement: the same seed and position always agree,
/// so cells can be materialized lazily in any order without storing the
/// outcome up front.
///
/// Safe-zone policies (forcing the probability to zero near a spawn point)
/// belong to the caller, not here.
pub fn cell_has_bomb(seed: u64, (x, y, z): Pos3, probability: f64) -> bool {
    let probability = if (0.0..=1.0).contains(&probability) {
        probability
    } else {
        log::warn!("bomb probability {probability} outside [0, 1], clamping");
        probability.clamp(0.0, 1.0)
    };

    let key = format!("{seed}:{x}:{y}:{z}");
    let bucket = fnv1a(key.as_bytes()) % 10_000;
    f64::from(bucket) / 10_000.0 < probability
}

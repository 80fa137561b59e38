//! Seed sources for games and random policies.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fresh seed for callers that did not pin one. Mixes wall-clock time, the process id
/// and a process-wide counter, so two calls never collide within a process.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Independent seed for sub-stream `stream` of `seed` (per-episode boards, policy RNGs).
pub fn derive_stream_seed(seed: u64, stream: u64) -> u64 {
    mix_seed(seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

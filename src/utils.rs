/// Derives the RNG seed for one construction from the run seed, iteration
/// and ant index, so sequential and parallel construct phases draw identical
/// streams.
///
/// SplitMix64-style finalizer; nearby (iteration, ant) pairs must not yield
/// correlated ChaCha streams.
pub fn ant_seed(base: u64, iteration: usize, ant: usize) -> u64 {
    let mut x = base
        ^ (iteration as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (ant as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

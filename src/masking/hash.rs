const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    input.bytes().fold(FNV32_OFFSET, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV32_PRIME)
    })
}

/// Selection cost in `[0, 1)` for one mask candidate.
pub fn candidate_cost(
    seed: &str,
    line_index: usize,
    token_index: usize,
    core: &str,
    candidate_index: usize,
) -> f64 {
    let key = format!(
        "{}|{}|{}|{}|{}",
        seed, line_index, token_index, core, candidate_index
    );
    f64::from(fnv1a32(&key)) / 4_294_967_296.0
}

use std::collections::HashMap;

/// Required length of management and client keys, in bytes.
pub const ROOM_KEY_LEN: usize = 64;

/// Keys with a character distribution at or below this many bits are refused.
const MIN_ENTROPY_BITS: f64 = 2.0;

/// True for a 64-byte key whose character entropy exceeds 2 bits.
pub fn is_valid_room_key(key: &str) -> bool {
    key.len() == ROOM_KEY_LEN && shannon_entropy(key) > MIN_ENTROPY_BITS
}

fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

use npc_decipher::Dictionary;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generates `count` random 32-character lowercase hex hashes.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_hashes(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..32).map(|_| HEX_CHARS[rng.gen_range(0..16)] as char).collect())
        .collect()
}

/// Builds a fixture dictionary mapping every hash to a random password.
pub fn fixture_dictionary(hashes: &[String]) -> Dictionary {
    let mut rng = StdRng::seed_from_u64(7);
    hashes
        .iter()
        .map(|hash| {
            let length = rng.gen_range(6..=16);
            let password: String = (0..length)
                .map(|_| PASSWORD_CHARS[rng.gen_range(0..PASSWORD_CHARS.len())] as char)
                .collect();
            (hash.clone(), password)
        })
        .collect()
}

/// Builds a request of `lines` records cycling through `hashes`.
pub fn request(hashes: &[String], lines: usize) -> String {
    hashes
        .iter()
        .cycle()
        .take(lines)
        .enumerate()
        .map(|(i, hash)| format!("npc{i}@example.com:{hash}"))
        .collect::<Vec<_>>()
        .join("\n")
}

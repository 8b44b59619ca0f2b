//! Cryptographically secure passcode generation.

use rand::rngs::OsRng;
use rand::Rng;

use super::config::CodeCharset;

/// Generate a random code of `length` characters drawn from `charset`
///
/// Uses the OS-provided CSPRNG. Each character is sampled uniformly from
/// the alphabet, so codes carry full entropy for their length.
pub fn generate_code(length: usize, charset: CodeCharset) -> String {
    let alphabet = charset.alphabet();
    let mut rng = OsRng;
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

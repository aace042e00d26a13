//! Record identifier generation.

use rand::Rng;

/// URL-safe alphabet, 64 symbols.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Identifier length; 21 symbols of 6 bits each.
pub const RECORD_ID_LEN: usize = 21;

/// Generates a new random record identifier.
pub fn generate_record_id() -> String {
    let mut rng = rand::rng();
    (0..RECORD_ID_LEN)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn has_expected_length_and_alphabet() {
        let id = generate_record_id();
        assert_eq!(id.len(), RECORD_ID_LEN);
        assert!(
            id.bytes().all(|b| ALPHABET.contains(&b)),
            "unexpected character in {id}"
        );
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_record_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}

//! Short paste identifier generation and format validation.

use crate::constants::{ID_ALPHABET, ID_LENGTH};
use rand::Rng;

/// Generate a random paste identifier.
///
/// Five characters drawn uniformly from the restricted alphabet. The
/// result carries no uniqueness guarantee; callers must check for
/// collisions against the store.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Check whether `id` has the exact length and alphabet of a paste id.
///
/// Used to reject malformed identifiers before any store lookup.
pub fn is_valid(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::{generate, is_valid};
    use crate::constants::{ID_ALPHABET, ID_LENGTH};

    #[test]
    fn generated_ids_use_fixed_length_and_alphabet() {
        for _ in 0..1000 {
            let id = generate();
            assert_eq!(id.len(), ID_LENGTH, "id: {}", id);
            assert!(
                id.bytes().all(|b| ID_ALPHABET.contains(&b)),
                "id outside alphabet: {}",
                id
            );
        }
    }

    #[test]
    fn generated_ids_pass_format_check() {
        for _ in 0..100 {
            assert!(is_valid(&generate()));
        }
    }

    #[test]
    fn format_check_rejects_ambiguous_glyphs() {
        for id in ["abc0d", "abc1d", "abcod", "abcld"] {
            assert!(!is_valid(id), "id should be rejected: {}", id);
        }
    }

    #[test]
    fn format_check_rejects_wrong_length_and_case() {
        assert!(!is_valid(""));
        assert!(!is_valid("abcd"));
        assert!(!is_valid("abcdef"));
        assert!(!is_valid("ABCDE"));
        assert!(!is_valid("ab cd"));
        assert!(!is_valid("abc-d"));
    }

    #[test]
    fn alphabet_has_32_distinct_symbols() {
        let mut symbols: Vec<u8> = ID_ALPHABET.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 32);
        for glyph in [b'0', b'1', b'o', b'l'] {
            assert!(!symbols.contains(&glyph));
        }
    }
}

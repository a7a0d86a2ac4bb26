//! Pad identifier generation.

use nanoid::nanoid;

/// Length of a generated pad identifier.
///
/// 21 characters over the 64-symbol URL-safe alphabet gives 126 bits of
/// entropy, so collisions are negligible without a registry lookup.
pub const PAD_ID_LEN: usize = 21;

/// Generate a fresh URL-safe pad identifier.
pub fn generate() -> String {
    nanoid!(PAD_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_generated_id_shape() {
        for _ in 0..100 {
            let id = generate();
            assert_eq!(id.len(), PAD_ID_LEN);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
                "unexpected character in id: {}",
                id
            );
        }
    }
}

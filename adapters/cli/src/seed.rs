//! Turns user supplied seed text into a generator seed.

use sha2::{Digest, Sha256};

/// Numeric text is used verbatim; anything else is hashed.
pub(crate) fn seed_from_text(text: &str) -> u64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }

    let mut hasher = Sha256::new();
    hasher.update(trimmed.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_seeds_pass_through() {
        assert_eq!(seed_from_text("42"), 42);
        assert_eq!(seed_from_text(" 7 "), 7);
    }

    #[test]
    fn text_seeds_hash_stably() {
        let first = seed_from_text("goblin warrens");
        assert_eq!(first, seed_from_text("goblin warrens"));
        assert_eq!(first, seed_from_text("  goblin warrens\n"));
        assert_ne!(first, seed_from_text("dwarf roads"));
    }
}

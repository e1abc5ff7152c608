//! Reply post-processing.
//!
//! Local models repeat themselves; the historical mitigation is a
//! sentence-level exact-match de-duplication on a literal `". "` split.
//! This is a heuristic cleanup step, not a data-model invariant -- the
//! service calls it between completion and append, and it can be swapped
//! out without touching persistence.

use std::collections::HashSet;

/// Split on `". "`, drop units that exactly duplicate an earlier one
/// (first occurrence wins, order preserved), and re-join.
pub fn dedupe_sentences(reply: &str) -> String {
    let mut seen = HashSet::new();
    reply
        .split(". ")
        .filter(|unit| seen.insert(*unit))
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_removed_first_wins() {
        let reply = "I wander. The stars call. I wander. We go";
        assert_eq!(dedupe_sentences(reply), "I wander. The stars call. We go");
    }

    #[test]
    fn test_no_duplicates_unchanged() {
        let reply = "One. Two. Three";
        assert_eq!(dedupe_sentences(reply), reply);
    }

    #[test]
    fn test_exact_match_only() {
        // Case and punctuation differences are distinct units.
        let reply = "hello. Hello. hello";
        assert_eq!(dedupe_sentences(reply), "hello. Hello");
    }

    #[test]
    fn test_empty_reply_stays_empty() {
        assert_eq!(dedupe_sentences(""), "");
    }

    #[test]
    fn test_single_sentence_passthrough() {
        assert_eq!(dedupe_sentences("Just one thought"), "Just one thought");
    }
}

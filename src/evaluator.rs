//! Answer grading policy
//!
//! The evaluator is a pluggable seam: the session delegates every verdict
//! to it and never inspects answer text itself, so fuzzy or phonetic
//! matchers (for voice input) can be swapped in without touching the state
//! machine. Any implementation must be deterministic, total, and tolerant
//! of case and surrounding whitespace.

/// Produces a correctness verdict from submitted text and the canonical
/// answer
pub trait AnswerEvaluator {
    /// Whether the submitted text counts as the canonical answer
    fn is_correct(&self, submitted: &str, canonical: &str) -> bool;
}

/// Normalizes answer text for comparison: trimmed and lowercased
fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// The default evaluator: normalized exact match
///
/// Matches the reference grading rule, comparing the trimmed, lowercased
/// submission against the trimmed, lowercased canonical answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedMatch;

impl AnswerEvaluator for NormalizedMatch {
    fn is_correct(&self, submitted: &str, canonical: &str) -> bool {
        normalize(submitted) == normalize(canonical)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(NormalizedMatch.is_correct("Paris", "Paris"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(NormalizedMatch.is_correct("PARIS", "paris"));
        assert!(NormalizedMatch.is_correct("pArIs", "Paris"));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert!(NormalizedMatch.is_correct("  Paris  ", "Paris"));
        assert!(NormalizedMatch.is_correct("\tParis\n", " Paris "));
    }

    #[test]
    fn test_wrong_answer() {
        assert!(!NormalizedMatch.is_correct("London", "Paris"));
        assert!(!NormalizedMatch.is_correct("", "Paris"));
    }

    #[test]
    fn test_interior_whitespace_significant() {
        assert!(!NormalizedMatch.is_correct("Pa ris", "Paris"));
        assert!(NormalizedMatch.is_correct("George Washington", "george washington"));
    }
}

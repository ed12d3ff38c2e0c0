//! Answer normalization

/// Normalize an answer string for comparison.
///
/// Lowercases, drops everything that is neither alphanumeric nor whitespace,
/// and collapses whitespace runs into single spaces.
pub fn normalize_answer(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized answer split into tokens
pub fn normalized_tokens(s: &str) -> Vec<String> {
    normalize_answer(s)
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_answer("  The Capital is   Paris, France! "), "the capital is paris france");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_answer(""), "");
        assert!(normalized_tokens("").is_empty());
        assert!(normalized_tokens("?!.,").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_answer("Hello,\tWORLD -- it's 2024.");
        assert_eq!(normalize_answer(&once), once);
        assert_eq!(once, "hello world its 2024");
    }

    #[test]
    fn test_tokens_keep_order() {
        assert_eq!(normalized_tokens("b a\nb"), vec!["b", "a", "b"]);
    }
}

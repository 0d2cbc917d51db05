/// Splits text into lower-cased word tokens.
///
/// Any character that is not alphanumeric or `_` is a delimiter, so
/// punctuation and whitespace behave the same. Lower-casing uses Unicode
/// case mapping, which does not depend on the process locale.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokenizes and re-joins with single spaces.
pub fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Caching, at   scale: it's hard!"),
            vec!["caching", "at", "scale", "it", "s", "hard"]
        );
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(tokenize("HTTP/2 and snake_case"), vec!["http", "2", "and", "snake_case"]);
    }

    #[test]
    fn test_empty_and_blank_inputs() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ...").is_empty());
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_collapses_spacing() {
        assert_eq!(normalize("  Explain\n caching. "), "explain caching");
    }
}

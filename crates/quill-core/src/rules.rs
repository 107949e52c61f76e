//! Derivation rules applied at the write boundary.
//!
//! These are plain functions of their inputs. Services call them explicitly whenever
//! the source field (title, name, content) is written.

/// Number of content characters kept in a derived excerpt.
pub const EXCERPT_CHARS: usize = 150;

/// Suffix appended to every derived excerpt.
pub const EXCERPT_SUFFIX: &str = "...";

/// Reading speed used for read-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Derive a URL-safe slug from a title or name.
///
/// Lowercases the input, drops everything outside `[a-z0-9 ]`, and joins the remaining
/// words with single hyphens.
///
/// ```
/// assert_eq!(quill_core::rules::slugify("Hello, World!!"), "hello-world");
/// assert_eq!(quill_core::rules::slugify("Tech News"), "tech-news");
/// ```
pub fn slugify(source: &str) -> String {
    let kept: String = source
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    kept.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive an excerpt: the first 150 characters of `content` followed by `...`.
pub fn excerpt(content: &str) -> String {
    let mut excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str(EXCERPT_SUFFIX);
    excerpt
}

/// Whitespace-separated word count.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Estimated minutes to read `content`, rounded up.
pub fn read_time(content: &str) -> i32 {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Canonical form of a tag name: trimmed and lowercased.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Rust  -  the   Good Parts"), "rust-the-good-parts");
        assert_eq!(slugify("  padded title  "), "padded-title");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Crates of 2024"), "top-10-crates-of-2024");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Études"), "caf-tudes");
    }

    #[test]
    fn test_excerpt_truncates_to_150_chars() {
        let content = "a".repeat(400);
        let result = excerpt(&content);

        assert_eq!(result, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn test_excerpt_of_short_content_still_has_suffix() {
        assert_eq!(excerpt("Short post"), "Short post...");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let content = "é".repeat(200);
        assert_eq!(excerpt(&content).chars().count(), 153);
    }

    #[test]
    fn test_read_time_boundaries() {
        assert_eq!(read_time(&words(1)), 1);
        assert_eq!(read_time(&words(200)), 1);
        assert_eq!(read_time(&words(201)), 2);
        assert_eq!(read_time(&words(400)), 2);
    }

    #[test]
    fn test_word_count_ignores_whitespace_runs() {
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    }

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name("  Rust "), "rust");
    }
}

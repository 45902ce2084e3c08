//! Shared utility functions

use lapview::compare::MISSING;

/// Truncate a string to max_len characters (not bytes), adding "..." if truncated.
/// Safe for non-ASCII content (emoji, CJK, etc).
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

/// Left-align to exactly `width` characters, truncating if needed
pub fn pad(s: &str, width: usize) -> String {
    let cut = truncate_str(s, width);
    let len = cut.chars().count();
    format!("{}{}", cut, " ".repeat(width.saturating_sub(len)))
}

/// Field value or "N/A" when missing or blank
pub fn or_missing(value: Option<&str>) -> &str {
    value.filter(|s| !s.trim().is_empty()).unwrap_or(MISSING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("ThinkPad", 20), "ThinkPad");
        assert_eq!(truncate_str("ThinkPad X1 Carbon Gen 11", 12), "ThinkPad ...");
        assert_eq!(truncate_str("14\" 2.8K OLED 120Hz", 3), "14\"");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("HP", 5), "HP   ");
        assert_eq!(pad("Lenovo Legion", 8), "Lenov...");
    }

    #[test]
    fn test_or_missing() {
        assert_eq!(or_missing(Some("16GB")), "16GB");
        assert_eq!(or_missing(Some("  ")), "N/A");
        assert_eq!(or_missing(None), "N/A");
    }
}

//! Text helpers shared across the TUI.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates from the front so the tail of the text stays visible,
/// prefixing an ellipsis when anything was cut.
///
/// Single-line inputs scroll this way: the cursor sits at the end, so
/// the most recently typed characters are the ones worth keeping.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut kept = Vec::new();
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }

    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    out
}

/// Strips control characters from pasted text.
///
/// Bracketed paste can carry newlines and escape sequences; the form
/// only has single-line fields, so control characters are dropped.
pub fn sanitize_paste(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_start_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_start_with_ellipsis("hello", 5), "hello");
    }

    /// The tail survives; the head is replaced by the ellipsis.
    #[test]
    fn test_truncate_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("abcdefgh", 5), "…efgh");
    }

    #[test]
    fn test_truncate_tiny_budget() {
        assert_eq!(truncate_start_with_ellipsis("abcdef", 1), "…");
        assert_eq!(truncate_start_with_ellipsis("abcdef", 0), "…");
    }

    /// Wide characters count at display width, not char count.
    #[test]
    fn test_truncate_respects_wide_chars() {
        // Each CJK char is two columns; "…日本" would be 5 columns
        assert_eq!(truncate_start_with_ellipsis("日本語", 5), "…本語");
        assert_eq!(truncate_start_with_ellipsis("日本語", 4), "…語");
    }

    #[test]
    fn test_sanitize_paste_strips_controls() {
        assert_eq!(sanitize_paste("user\n@example.com"), "user@example.com");
        assert_eq!(sanitize_paste("a\x1b[31mb\tc"), "a[31mbc");
        assert_eq!(sanitize_paste("héllo"), "héllo");
    }
}

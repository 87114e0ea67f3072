use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cuts `s` to at most `max_width` terminal columns, ending in "..." when
/// anything was dropped. Wide (CJK) characters count as two columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Right-pads `s` with spaces so table columns line up with wide text.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

/// A highlighted key followed by its description, as used in help bars.
pub fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}  ", label)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_string("apple", 10), "apple");
        assert_eq!(truncate_string("", 3), "");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each kana is two columns wide.
        let out = truncate_string("これはりんごです", 9);
        assert_eq!(out, "これは...");
        assert!(display_width(&out) <= 9);
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_string("abcdef", 2), "..");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("犬", 4), "犬  ");
        assert_eq!(pad_to_width("apple", 3), "apple");
    }

    #[test]
    fn test_key_hint_spans() {
        let spans = key_hint("Esc", "Quit");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "Esc");
        assert_eq!(spans[1].content, " Quit  ");
    }
}

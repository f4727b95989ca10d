//! SSML helpers shared by the markup-based adapters.

/// Escapes the five XML-reserved characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps a canonical multiplier to a relative percentage offset, `(value - 1) × 50`.
///
/// 0.5 → -25, 1.0 → 0, 2.0 → +50.
pub fn relative_offset(value: f64) -> f64 {
    (value - 1.0) * 50.0
}

/// Formats a signed percentage for a `<prosody>` attribute, e.g. `+25%`.
pub fn signed_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid rendering "-0%".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:+}%", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes the entities produced by [`escape`], the way an XML parser would.
    fn unescape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find('&') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            let end = tail.find(';').expect("unterminated entity");
            out.push(match &tail[..=end] {
                "&amp;" => '&',
                "&lt;" => '<',
                "&gt;" => '>',
                "&quot;" => '"',
                "&apos;" => '\'',
                other => panic!("unknown entity {other}"),
            });
            rest = &tail[end + 1..];
        }
        out.push_str(rest);
        out
    }

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escaped_text_has_no_raw_markup() {
        let escaped = escape("if a < b && c > d then \"q\" 'r'");
        for c in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(c), "raw {c:?} in {escaped}");
        }
        assert!(escaped.split('&').skip(1).all(|s| {
            ["amp;", "lt;", "gt;", "quot;", "apos;"]
                .iter()
                .any(|e| s.starts_with(e))
        }));
    }

    #[test]
    fn test_escape_round_trips() {
        for text in [
            "plain text",
            "<>&\"'",
            "&amp; already escaped",
            "¿Dónde está <la> biblioteca?",
            "",
        ] {
            assert_eq!(unescape(&escape(text)), text);
        }
    }

    #[test]
    fn test_relative_offset() {
        assert_eq!(relative_offset(0.5), -25.0);
        assert_eq!(relative_offset(1.0), 0.0);
        assert_eq!(relative_offset(1.5), 25.0);
        assert_eq!(relative_offset(2.0), 50.0);
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(25.0), "+25%");
        assert_eq!(signed_percent(-25.0), "-25%");
        assert_eq!(signed_percent(0.0), "+0%");
        assert_eq!(signed_percent(-0.0), "+0%");
        assert_eq!(signed_percent(relative_offset(1.1)), "+5%");
        assert_eq!(signed_percent(100.0 / 3.0), "+33.33%");
    }
}

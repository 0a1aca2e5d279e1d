/// Lowercases `input` and keeps only ASCII letters, ASCII digits and
/// whitespace. Everything else is dropped, not replaced.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// First `max_chars` characters of `input`, with `...` appended when cut.
pub fn preview(input: &str, max_chars: usize) -> String {
    let mut chars = input.char_indices();
    match chars.nth(max_chars) {
        Some((idx, _)) => format!("{}...", &input[..idx]),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("WIN A FREE IPHONE NOW!!!"), "win a free iphone now");
    }

    #[test]
    fn normalize_keeps_digits_and_whitespace() {
        assert_eq!(normalize("Call 0800-123\tnow\n"), "call 0800123\tnow\n");
    }

    #[test]
    fn normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("Café naïve €5"), "caf nave 5");
    }

    #[test]
    fn normalize_output_alphabet() {
        let samples = [
            "Hello, World!",
            "ÀÉÎÕÜ ß 日本語 text",
            "emoji 🎉 party\u{00a0}time",
            "MiXeD_CaSe-123",
            "",
        ];
        for sample in samples {
            let out = normalize(sample);
            assert!(
                out.chars().all(|c| c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c.is_whitespace()),
                "unexpected char in {:?}",
                out
            );
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for sample in ["FREE!!! Money $$$", "İstanbul 34", "tabs\tand  spaces", "ÅNGSTRÖM"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("short", 50), "short");
    }
}

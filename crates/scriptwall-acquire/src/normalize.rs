use unicode_normalization::UnicodeNormalization;

/// Normalize Unicode text to NFC form and clean up the whitespace that
/// screenplay HTML tends to carry.
///
/// Non-breaking space variants become plain spaces, tabs become four-space
/// indentation (some archives indent dialogue with tabs), BOM and
/// zero-width characters are stripped from line starts, and trailing
/// whitespace is dropped. Leading indentation is preserved; it carries the
/// screenplay's dialogue/action structure.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();

    let spaced = nfc
        .replace('\u{00a0}', " ") // NBSP
        .replace('\u{2007}', " ") // figure space
        .replace('\u{202f}', " ") // narrow NBSP
        .replace('\t', "    ");

    spaced
        .lines()
        .map(|line| {
            line.trim_start_matches(['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}'])
                .trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse multiple consecutive blank lines into a single blank line.
///
/// Single blank lines survive; they separate scenes and speeches.
pub fn collapse_blank_lines(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_blank = false;

    for line in input.lines() {
        let is_blank = line.trim().is_empty();
        if is_blank && prev_blank {
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(line);
        prev_blank = is_blank;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        // e + combining acute accent -> é (precomposed)
        let decomposed = "e\u{0301}";
        let result = normalize_text(decomposed);
        assert_eq!(result, "é");
    }

    #[test]
    fn test_nbsp_variants_become_spaces() {
        let input = "INT.\u{00a0}HOUSE\u{2007}-\u{202f}DAY";
        assert_eq!(normalize_text(input), "INT. HOUSE - DAY");
    }

    #[test]
    fn test_tabs_become_indentation() {
        let input = "\tJOHN\n\t\tHello.";
        assert_eq!(normalize_text(input), "    JOHN\n        Hello.");
    }

    #[test]
    fn test_zero_width_stripped_from_line_start() {
        let input = "\u{feff}FADE IN:\n\u{200b}EXT. STREET";
        assert_eq!(normalize_text(input), "FADE IN:\nEXT. STREET");
    }

    #[test]
    fn test_trailing_whitespace() {
        let input = "hello   \nworld  ";
        let result = normalize_text(input);
        assert_eq!(result, "hello\nworld");
    }

    #[test]
    fn test_leading_indentation_preserved() {
        let input = "          JOHN\n     (beat)";
        assert_eq!(normalize_text(input), input);
    }

    #[test]
    fn test_collapse_blank_lines() {
        let input = "line 1\n\n\n\nline 2\n\nline 3";
        let result = collapse_blank_lines(input);
        assert_eq!(result, "line 1\n\nline 2\n\nline 3");
    }
}

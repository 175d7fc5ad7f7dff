// Pagination of cleaned screenplay text into wallpaper-sized chunks.
//
// Two break styles: `Tokens` flattens the text into a word stream and cuts
// every `words_per_page` tokens; `Lines` cuts only on line boundaries so
// screenplay indentation and blank lines survive intact.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// How page boundaries are chosen when splitting screenplay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStyle {
    /// Split the whitespace-delimited token stream into consecutive groups of
    /// `words_per_page` tokens (final group may be shorter), joining each
    /// group with single spaces. Original line breaks are not preserved.
    Tokens,
    /// Walk line by line counting words and cut only on line boundaries,
    /// keeping the original formatting. A page may run slightly over the
    /// word budget to avoid splitting a line.
    Lines,
}

/// Split cleaned text into page texts.
///
/// Whitespace-only input yields zero pages; callers must treat a zero-page
/// screenplay as empty content before selecting an index.
pub fn paginate(text: &str, words_per_page: NonZeroUsize, style: BreakStyle) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match style {
        BreakStyle::Tokens => paginate_tokens(text, words_per_page.get()),
        BreakStyle::Lines => paginate_lines(text, words_per_page.get()),
    }
}

fn paginate_tokens(text: &str, per_page: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.chunks(per_page).map(|chunk| chunk.join(" ")).collect()
}

fn paginate_lines(text: &str, per_page: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut word_count = 0usize;

    for line in text.lines() {
        let words_in_line = line.split_whitespace().count();

        if word_count + words_in_line > per_page && !current.is_empty() {
            pages.push(current.join("\n"));
            current.clear();
            word_count = 0;
        }

        current.push(line);
        word_count += words_in_line;
    }

    if !current.is_empty() {
        pages.push(current.join("\n"));
    }

    pages
}

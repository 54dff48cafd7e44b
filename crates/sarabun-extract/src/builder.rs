//! Prompt-text assembly over the selected pages.
//!
//! Concatenates the selected pages' raw text, each behind a delimiter line
//! carrying the 1-based page number. No reordering, no truncation, no
//! content deduplication: the selection sequence is already sorted and
//! duplicate-free.

use std::fmt::Write;

/// Build the bounded text sent to the oracle.
///
/// Selected indices with no corresponding page (the selector's fallback
/// window may run past the last page) contribute nothing.
pub fn build_optimized_text(pages: &[String], selected: &[usize]) -> String {
    let mut out = String::new();
    for &idx in selected {
        let Some(text) = pages.get(idx) else {
            continue;
        };
        let _ = writeln!(out, "--- Page {} ---", idx + 1);
        out.push_str(text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn emits_selected_pages_in_order_with_delimiters() {
        let pages = pages(&["alpha", "beta", "gamma"]);
        let text = build_optimized_text(&pages, &[0, 2]);
        assert_eq!(text, "--- Page 1 ---\nalpha\n--- Page 3 ---\ngamma\n");
    }

    #[test]
    fn skips_out_of_range_indices() {
        let pages = pages(&["only"]);
        let text = build_optimized_text(&pages, &[0, 1, 2]);
        assert_eq!(text, "--- Page 1 ---\nonly\n");
    }

    #[test]
    fn empty_selection_yields_empty_text() {
        let pages = pages(&["alpha"]);
        assert_eq!(build_optimized_text(&pages, &[]), "");
    }

    #[test]
    fn each_selected_page_appears_exactly_once() {
        let pages = pages(&["a", "b", "c", "d"]);
        let text = build_optimized_text(&pages, &[1, 2, 3]);
        for (n, body) in [(2, "b"), (3, "c"), (4, "d")] {
            let delimiter = format!("--- Page {n} ---");
            assert_eq!(text.matches(&delimiter).count(), 1);
            assert_eq!(text.matches(body).count(), 1);
        }
    }
}

//! Relevant-page selection for Thai project-proposal PDFs.
//!
//! The budget prompt must stay within a bounded text length, so instead of
//! forwarding a whole document to the oracle we forward only the pages that
//! carry the numbered sections the extraction needs: the project name
//! (section 1), the responsible person (section 2), and the budget detail
//! block (section 14 up to the section 15 header).
//!
//! Matching is literal substring containment on raw page text, with a
//! with-space and a without-space variant per header. This is a heuristic,
//! not a section parser: it never errors, and an unmatched marker simply
//! shrinks the result.

use std::collections::BTreeSet;
use tracing::debug;

/// Accepted spellings of the section 1 header (`ชื่อโครงการ`, project name).
const PROJECT_NAME_HEADER: [&str; 2] = ["1. ชื่อโครงการ", "1.ชื่อโครงการ"];

/// Accepted spellings of the section 2 header (`ผู้รับผิดชอบ`, responsible person).
const RESPONSIBLE_HEADER: [&str; 2] = ["2. ผู้รับผิดชอบ", "2.ผู้รับผิดชอบ"];

/// Accepted spellings of the section 14 header (`รายละเอียดงบประมาณ`, budget detail).
const BUDGET_DETAIL_HEADER: [&str; 2] = ["14. รายละเอียดงบประมาณ", "14.รายละเอียดงบประมาณ"];

/// Accepted spellings of the section 15 header (`ตัวชี้วัด`, indicators).
const INDICATOR_HEADER: [&str; 2] = ["15. ตัวชี้วัด", "15.ตัวชี้วัด"];

/// Loose section 15 markers. These hit unrelated occurrences of the digits
/// "15" too, so a match must also pass [`indicator_guard`].
const INDICATOR_LOOSE: [&str; 2] = ["15.", "15 ."];

/// Early-window needle for the guard: a numbered header normally sits near
/// the top of its page.
const INDICATOR_EARLY: &str = "15. ";

/// How many characters of a page count as "near the top".
const EARLY_WINDOW_CHARS: usize = 200;

/// Pages taken after section 14 when no section 15 header is ever found.
const FALLBACK_WINDOW_PAGES: usize = 3;

/// Select the pages worth forwarding to the oracle.
///
/// Input is the full, contiguous, 0-indexed page-text sequence of one
/// document. Output is ascending and duplicate-free. Indices from the
/// no-section-15 fallback window may point past the last real page; the
/// prompt builder skips those.
pub fn select_relevant_pages(pages: &[String]) -> Vec<usize> {
    let mut relevant = BTreeSet::new();
    let mut section_start: Option<usize> = None;
    let mut section_end: Option<usize> = None;

    for (idx, text) in pages.iter().enumerate() {
        if contains_any(text, &PROJECT_NAME_HEADER) {
            relevant.insert(idx);
        }
        if contains_any(text, &RESPONSIBLE_HEADER) {
            relevant.insert(idx);
        }
        // First section 14 match wins; later matches never move the start.
        if section_start.is_none() && contains_any(text, &BUDGET_DETAIL_HEADER) {
            section_start = Some(idx);
        }
        if section_start.is_some()
            && section_end.is_none()
            && contains_any(text, &INDICATOR_LOOSE)
            && indicator_guard(text)
        {
            section_end = Some(idx);
        }
    }

    match (section_start, section_end) {
        (Some(start), Some(end)) => {
            debug!("budget section spans pages {}..={}", start, end);
            relevant.extend(start..=end);
        }
        (Some(start), None) => {
            // Section 15 never found: take a fixed window after the budget
            // header, even if it runs past the last page.
            debug!("no section 15 header, using {}-page window", FALLBACK_WINDOW_PAGES);
            relevant.extend(start..start + FALLBACK_WINDOW_PAGES);
        }
        (None, _) => {}
    }

    relevant.into_iter().collect()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Disambiguate a loose "15." hit from amounts, dates, and item numbers:
/// accept the page when the indicator header itself appears, or when
/// "15. " occurs within the first [`EARLY_WINDOW_CHARS`] characters.
fn indicator_guard(text: &str) -> bool {
    if contains_any(text, &INDICATOR_HEADER) {
        return true;
    }
    // Character-based window: the text is Thai, a byte slice could split a
    // code point.
    let end = text
        .char_indices()
        .nth(EARLY_WINDOW_CHARS)
        .map_or(text.len(), |(byte_idx, _)| byte_idx);
    text[..end].contains(INDICATOR_EARLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(entries: &[(usize, &str)]) -> Vec<String> {
        let len = entries.iter().map(|(idx, _)| idx + 1).max().unwrap_or(0);
        let mut pages = vec![String::new(); len];
        for (idx, text) in entries {
            pages[*idx] = (*text).to_string();
        }
        pages
    }

    #[test]
    fn no_markers_yields_empty() {
        let pages = pages(&[(0, "no headers here"), (1, "still nothing")]);
        assert!(select_relevant_pages(&pages).is_empty());
    }

    #[test]
    fn section_one_alone() {
        let pages = pages(&[(2, "1. ชื่อโครงการ อบรมเชิงปฏิบัติการ")]);
        assert_eq!(select_relevant_pages(&pages), vec![2]);
    }

    #[test]
    fn section_two_without_space_variant() {
        let pages = pages(&[(1, "2.ผู้รับผิดชอบ นางสาวสมหญิง ใจดี")]);
        assert_eq!(select_relevant_pages(&pages), vec![1]);
    }

    #[test]
    fn budget_range_is_inclusive_and_contiguous() {
        let pages = pages(&[
            (0, "intro"),
            (13, "14. รายละเอียดงบประมาณ budget stuff"),
            (14, "more budget"),
            (15, "15. ตัวชี้วัด kpis"),
        ]);
        assert_eq!(select_relevant_pages(&pages), vec![13, 14, 15]);
    }

    #[test]
    fn fallback_window_runs_past_last_page() {
        let pages = pages(&[
            (0, "1. ชื่อโครงการ Foo"),
            (5, "14.รายละเอียดงบประมาณ"),
        ]);
        // Document has 6 pages; 6 and 7 do not exist but are still emitted.
        assert_eq!(select_relevant_pages(&pages), vec![0, 5, 6, 7]);
    }

    #[test]
    fn section_start_is_latched() {
        let pages = pages(&[
            (3, "14. รายละเอียดงบประมาณ"),
            (4, "14. รายละเอียดงบประมาณ (ต่อ)"),
            (6, "15. ตัวชี้วัด"),
        ]);
        assert_eq!(select_relevant_pages(&pages), vec![3, 4, 5, 6]);
    }

    #[test]
    fn loose_fifteen_without_guard_is_ignored() {
        // "15." appears only inside an amount, far from the page top.
        let filler = "รายการ ".repeat(40);
        let mut pages = pages(&[(2, "14. รายละเอียดงบประมาณ")]);
        pages.push(format!("{filler}ค่าอาหารว่าง 315.00 บาท"));
        assert_eq!(select_relevant_pages(&pages), vec![2, 3, 4]);
    }

    #[test]
    fn early_window_match_passes_guard_without_header() {
        let pages = pages(&[
            (1, "14. รายละเอียดงบประมาณ"),
            (4, "15. สรุปผลที่คาดว่าจะได้รับ"),
        ]);
        // No indicator header, but "15. " sits at the top of page 4.
        assert_eq!(select_relevant_pages(&pages), vec![1, 2, 3, 4]);
    }

    #[test]
    fn early_window_is_measured_in_characters() {
        // ~190 Thai characters (many bytes) before "15. ": still inside the
        // 200-character window.
        let prefix = "ก".repeat(190);
        let mut pages = pages(&[(0, "14. รายละเอียดงบประมาณ")]);
        pages.push(format!("{prefix}15. ตอนท้าย"));
        assert_eq!(select_relevant_pages(&pages), vec![0, 1]);
    }

    #[test]
    fn fifteen_before_fourteen_does_not_close_range() {
        let pages = pages(&[
            (0, "15. ตัวชี้วัด (สารบัญ)"),
            (3, "14. รายละเอียดงบประมาณ"),
        ]);
        // The end cursor only arms after the start is set.
        assert_eq!(select_relevant_pages(&pages), vec![3, 4, 5]);
    }

    #[test]
    fn header_pages_and_range_deduplicate() {
        let pages = pages(&[
            (0, "1. ชื่อโครงการ Foo\n2. ผู้รับผิดชอบ Bar"),
            (1, "14. รายละเอียดงบประมาณ\n1. ชื่อโครงการ ซ้ำ"),
            (2, "15. ตัวชี้วัด"),
        ]);
        assert_eq!(select_relevant_pages(&pages), vec![0, 1, 2]);
    }

    #[test]
    fn selection_is_pure() {
        let pages = pages(&[
            (0, "1. ชื่อโครงการ Foo"),
            (2, "14. รายละเอียดงบประมาณ"),
            (4, "15. ตัวชี้วัด"),
        ]);
        let first = select_relevant_pages(&pages);
        let second = select_relevant_pages(&pages);
        assert_eq!(first, second);
    }
}

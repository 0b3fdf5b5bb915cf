#![forbid(unsafe_code)]

//! Text layout of the showcase for a terminal viewport.
//!
//! Produces styled lines plus the hit regions for the arrows and labels, so
//! mouse clicks can be routed back to navigation commands. Drawing to the
//! terminal happens elsewhere.

use showcase_core::ShowcaseSnapshot;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::page::PageStatus;

const PREV_ARROW: &str = "\u{2190} prev";
const NEXT_ARROW: &str = "next \u{2192}";
const SELECTED_MARK: &str = "\u{25cf}";
const UNSELECTED_MARK: &str = "\u{25cb}";

/// How a line should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Title,
    Selected,
    Dim,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Line {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    fn blank() -> Self {
        Self::new(String::new(), Emphasis::Normal)
    }
}

/// Clickable region of a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Previous,
    Next,
    Label(usize),
}

/// A laid-out frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub lines: Vec<Line>,
    /// `(row, column range, target)` triples.
    hits: Vec<(u16, std::ops::Range<u16>, Hit)>,
}

impl View {
    /// Target under the given cell, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        self.hits
            .iter()
            .find(|(r, cols, _)| *r == row && cols.contains(&column))
            .map(|(_, _, hit)| *hit)
    }

    fn push(&mut self, line: Line) -> u16 {
        let row = self.lines.len() as u16;
        self.lines.push(line);
        row
    }
}

/// Lay out `snapshot` into at most `height` rows of `width` columns.
///
/// The last row is the status line. Rows that do not fit are dropped from
/// the body first, then from the label list.
pub fn layout(snapshot: &ShowcaseSnapshot, status: &PageStatus, width: u16, height: u16) -> View {
    let mut view = View::default();
    if width == 0 || height == 0 {
        return view;
    }
    let w = usize::from(width);

    // Arrow bar
    let prev_w = PREV_ARROW.width() as u16;
    let next_w = NEXT_ARROW.width() as u16;
    let row = if w >= PREV_ARROW.width() + NEXT_ARROW.width() + 1 {
        let gap = w - PREV_ARROW.width() - NEXT_ARROW.width();
        let row = view.push(Line::new(
            format!("{PREV_ARROW}{}{NEXT_ARROW}", " ".repeat(gap)),
            Emphasis::Dim,
        ));
        view.hits.push((row, width - next_w..width, Hit::Next));
        row
    } else {
        view.push(Line::new(truncate(PREV_ARROW, w), Emphasis::Dim))
    };
    view.hits.push((row, 0..prev_w.min(width), Hit::Previous));
    view.push(Line::blank());

    // Selected feature
    let selected = &snapshot.selected;
    let (position, total) = snapshot.position();
    view.push(Line::new(
        truncate(&format!("[{}]", selected.image_ref), w),
        Emphasis::Dim,
    ));
    view.push(Line::blank());
    view.push(Line::new(
        truncate(&format!("{}  ({position}/{total})", selected.title), w),
        Emphasis::Title,
    ));

    let label_rows = snapshot.labels.len() + 2;
    let reserved = view.lines.len() + label_rows + 1;
    let body_budget = usize::from(height).saturating_sub(reserved);
    for line in wrap(&selected.body, w).into_iter().take(body_budget) {
        view.push(Line::new(line, Emphasis::Normal));
    }
    view.push(Line::blank());

    // Label list
    view.push(Line::new(truncate("Features", w), Emphasis::Dim));
    for label in &snapshot.labels {
        if view.lines.len() + 1 >= usize::from(height) {
            break;
        }
        let (mark, emphasis) = if label.selected {
            (SELECTED_MARK, Emphasis::Selected)
        } else {
            (UNSELECTED_MARK, Emphasis::Normal)
        };
        let text = truncate(&format!(" {mark} {}", label.title), w);
        let text_w = text.width() as u16;
        let row = view.push(Line::new(text, emphasis));
        view.hits.push((row, 0..text_w, Hit::Label(label.index)));
    }

    // Pad and place the status line on the last row.
    view.lines.truncate(usize::from(height) - 1);
    view.hits.retain(|(r, _, _)| *r < height - 1);
    while view.lines.len() < usize::from(height) - 1 {
        view.push(Line::blank());
    }
    view.push(Line::new(truncate(&status_text(status), w), Emphasis::Dim));
    view
}

fn status_text(status: &PageStatus) -> String {
    let section = match status.progress {
        Some(p) => format!("section {:>3.0}%", (p * 100.0).min(999.0)),
        None => "section idle".to_string(),
    };
    format!(
        "page {:>3}% \u{b7} {section} \u{b7} \u{2191}\u{2193} scroll  \u{2190}\u{2192} browse  q quit",
        status.percent()
    )
}

/// Cut `text` to at most `width` display columns.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > width {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0;
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let word_w = word.width();
            let sep = usize::from(!current.is_empty());
            if current_w + sep + word_w <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                current_w += sep + word_w;
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_w = 0;
                continue;
            }
            // Word alone is too wide.
            let mut head = truncate(&word, width);
            if head.is_empty() {
                // A single glyph wider than the line still has to go somewhere.
                head = word.chars().take(1).collect();
            }
            let rest = word[head.len()..].to_string();
            lines.push(head);
            if rest.is_empty() {
                break;
            }
            word = rest;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use showcase_core::{Catalog, FixedGeometry, ShowcaseController};

    fn status() -> PageStatus {
        PageStatus {
            offset: 0,
            max_offset: 100,
            engaged: false,
            progress: None,
        }
    }

    fn snapshot(active: usize) -> ShowcaseSnapshot {
        let mut controller = ShowcaseController::new(Catalog::builtin(), FixedGeometry(None));
        controller.jump_to(active);
        controller.snapshot()
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("\u{4f60}\u{597d}", 3), "\u{4f60}");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn fills_exact_height_with_status_last() {
        let view = layout(&snapshot(0), &status(), 60, 24);
        assert_eq!(view.lines.len(), 24);
        assert!(view.lines[23].text.starts_with("page"));
    }

    #[test]
    fn selected_label_is_marked() {
        let view = layout(&snapshot(2), &status(), 60, 24);
        let selected: Vec<&Line> = view
            .lines
            .iter()
            .filter(|l| l.emphasis == Emphasis::Selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].text.contains("48MP Main Camera"));
        assert!(selected[0].text.contains(SELECTED_MARK));
    }

    #[test]
    fn title_line_shows_position() {
        let view = layout(&snapshot(4), &status(), 60, 24);
        assert!(
            view.lines
                .iter()
                .any(|l| l.emphasis == Emphasis::Title
                    && l.text == "Emergency SOS via Satellite  (5/5)")
        );
    }

    #[test]
    fn hit_test_routes_arrows_and_labels() {
        let view = layout(&snapshot(0), &status(), 60, 24);
        assert_eq!(view.hit_test(0, 0), Some(Hit::Previous));
        assert_eq!(view.hit_test(59, 0), Some(Hit::Next));
        assert_eq!(view.hit_test(30, 0), None);

        let row = view
            .lines
            .iter()
            .position(|l| l.text.contains("A16 Bionic Chip"))
            .unwrap() as u16;
        assert_eq!(view.hit_test(2, row), Some(Hit::Label(3)));
    }

    #[test]
    fn lines_never_exceed_width() {
        let view = layout(&snapshot(0), &status(), 20, 30);
        for line in &view.lines {
            assert!(line.text.width() <= 20, "too wide: {:?}", line.text);
        }
    }

    #[test]
    fn tiny_viewport_keeps_status_line() {
        let view = layout(&snapshot(0), &status(), 40, 4);
        assert_eq!(view.lines.len(), 4);
        assert!(view.lines[3].text.starts_with("page"));
        assert!(view.hits.iter().all(|(r, _, _)| *r < 3));
    }

    #[test]
    fn empty_area_renders_nothing() {
        assert!(layout(&snapshot(0), &status(), 0, 10).lines.is_empty());
        assert!(layout(&snapshot(0), &status(), 10, 0).lines.is_empty());
    }

    #[test]
    fn status_reports_section_progress() {
        let engaged = PageStatus {
            offset: 50,
            max_offset: 100,
            engaged: true,
            progress: Some(0.42),
        };
        let text = status_text(&engaged);
        assert!(text.starts_with("page  50%"));
        assert!(text.contains("section  42%"));
    }
}

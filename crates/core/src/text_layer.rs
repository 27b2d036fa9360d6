//! Rendered text layer abstraction
//!
//! The rendering collaborator exposes, for every currently materialized page,
//! a sequence of positioned text runs. This module is the neutral form of
//! that capability: enough to search text and reconstruct the geometry of a
//! match without reaching into any specific rendering technology.

use crate::coords::{PageViewport, Rect};

/// A single positioned run of text on a page
///
/// The rectangle is in viewport space, as delivered by the renderer. A run
/// corresponds to one text item of the underlying text layer; a visual line
/// is typically one run, but nothing here assumes that.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub rect: Rect,
}

impl TextRun {
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self { text: text.into(), rect }
    }
}

/// The text layer of one materialized page
///
/// Holds the page's runs in reading order plus their concatenation for fast
/// substring search. Runs concatenate with no separator, mirroring the
/// renderer's token stream.
#[derive(Debug, Clone)]
pub struct PageTextLayer {
    /// Owning page, 1-based
    pub page_number: u32,

    /// The page's current viewport transform
    pub viewport: PageViewport,

    runs: Vec<TextRun>,
    text: String,
}

impl PageTextLayer {
    /// Build a layer from the renderer's runs for one page
    pub fn from_runs(page_number: u32, viewport: PageViewport, runs: Vec<TextRun>) -> Self {
        let text = runs.iter().map(|run| run.text.as_str()).collect();
        Self { page_number, viewport, runs, text }
    }

    /// The page's runs in reading order
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Concatenated run text, searched by the locator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Viewport-space rectangles covering a byte span of the page text
    ///
    /// Produces one rectangle per run the span overlaps. A run covered only
    /// partially is sliced horizontally in proportion to the characters the
    /// span covers within it. Returns an empty list when the span covers no
    /// visible text; span ends that fall inside a multi-byte character
    /// contribute no rectangle for that run.
    pub fn rects_for_span(&self, start: usize, end: usize) -> Vec<Rect> {
        let mut rects = Vec::new();
        let mut run_start = 0;

        for run in &self.runs {
            let run_end = run_start + run.text.len();
            let overlap_start = start.max(run_start);
            let overlap_end = end.min(run_end);

            if overlap_start < overlap_end {
                let local_start = overlap_start - run_start;
                let local_end = overlap_end - run_start;
                if let Some(rect) = slice_run_rect(run, local_start, local_end) {
                    rects.push(rect);
                }
            }

            run_start = run_end;
            if run_start >= end {
                break;
            }
        }

        rects
    }
}

/// Horizontal slice of a run's rectangle covering a local byte range
///
/// Character positions map to x-coordinates proportionally; the run keeps
/// its full height. Returns `None` for runs with no characters and for
/// offsets that fall inside a multi-byte character.
fn slice_run_rect(run: &TextRun, local_start: usize, local_end: usize) -> Option<Rect> {
    let total_chars = run.text.chars().count();
    if total_chars == 0 {
        return None;
    }
    if !run.text.is_char_boundary(local_start) || !run.text.is_char_boundary(local_end) {
        return None;
    }

    let chars_before = run.text[..local_start].chars().count() as f64;
    let chars_covered = run.text[local_start..local_end].chars().count() as f64;
    let per_char = run.rect.width() / total_chars as f64;

    Some(Rect {
        x1: run.rect.x1 + chars_before * per_char,
        y1: run.rect.y1,
        x2: run.rect.x1 + (chars_before + chars_covered) * per_char,
        y2: run.rect.y2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_line_layer() -> PageTextLayer {
        PageTextLayer::from_runs(
            1,
            PageViewport::default(),
            vec![
                TextRun::new("John Smith ", Rect::new(0.0, 0.0, 110.0, 12.0)),
                TextRun::new("signed the deal.", Rect::new(0.0, 14.0, 160.0, 26.0)),
            ],
        )
    }

    #[test]
    fn runs_concatenate_without_separator() {
        let layer = two_line_layer();
        assert_eq!(layer.text(), "John Smith signed the deal.");
    }

    #[test]
    fn full_run_span_yields_the_run_rect() {
        let layer = two_line_layer();

        let rects = layer.rects_for_span(0, 11);
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 110.0, 12.0)]);
    }

    #[test]
    fn partial_run_span_is_sliced_proportionally() {
        let layer = two_line_layer();

        // "Smith" occupies characters 5..10 of an 11-character run that is
        // 110 units wide, so 10 units per character.
        let rects = layer.rects_for_span(5, 10);
        assert_eq!(rects, vec![Rect::new(50.0, 0.0, 100.0, 12.0)]);
    }

    #[test]
    fn span_across_runs_yields_one_rect_per_line() {
        let layer = two_line_layer();

        // "Smith signed" spans the run boundary.
        let start = layer.text().find("Smith").unwrap();
        let end = start + "Smith signed".len();
        let rects = layer.rects_for_span(start, end);

        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(50.0, 0.0, 110.0, 12.0));
        // "signed" is the first 6 of 16 characters on the second line.
        assert_eq!(rects[1], Rect::new(0.0, 14.0, 60.0, 26.0));
    }

    #[test]
    fn span_ends_inside_a_multi_byte_character_do_not_panic() {
        // "é" is two bytes; byte 1 is not a character boundary.
        let layer = PageTextLayer::from_runs(
            1,
            PageViewport::default(),
            vec![TextRun::new("état", Rect::new(0.0, 0.0, 40.0, 12.0))],
        );

        assert!(layer.rects_for_span(1, 3).is_empty());

        // Boundary-aligned spans over the same text still slice normally.
        let rects = layer.rects_for_span(0, 2);
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 10.0, 12.0)]);
    }

    #[test]
    fn empty_runs_contribute_no_rects() {
        let layer = PageTextLayer::from_runs(
            1,
            PageViewport::default(),
            vec![TextRun::new("", Rect::new(0.0, 0.0, 0.0, 12.0))],
        );

        assert!(layer.rects_for_span(0, 0).is_empty());
    }
}

//! Text-to-geometry locator
//!
//! Turns literal text fragments (as proposed by the classification service)
//! into concrete highlight candidates by searching the materialized text
//! layers and reconstructing on-page geometry for every match. Only pages
//! whose layers are passed in can yield matches; fragments on unmounted
//! pages contribute nothing, which is an accepted limitation of searching
//! the rendered view rather than the full extracted text.

use crate::coords::{position_to_scaled, Rect};
use crate::highlight::{HighlightCandidate, HighlightContent, Position};
use crate::text_layer::PageTextLayer;
use std::collections::HashSet;
use tracing::warn;

/// Locate every rendered occurrence of the given fragments
///
/// Fragments are deduplicated first (later duplicates contribute nothing).
/// Each fragment is searched with its apostrophes stripped, a defensive
/// measure against quote-sensitive search carried over from the original
/// matching mechanism. Emitted candidates carry scaled positions and the
/// full matched text; ids are assigned later by the store's batch import.
///
/// Ordering follows fragment iteration order, then page order, then match
/// order within a page.
pub fn locate(fragments: &[String], pages: &[PageTextLayer]) -> Vec<HighlightCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for fragment in fragments {
        if !seen.insert(fragment.as_str()) {
            continue;
        }

        let search_key = fragment.replace('\'', "");
        if search_key.is_empty() {
            continue;
        }

        locate_fragment(&search_key, pages, &mut candidates);
    }

    candidates
}

fn locate_fragment(
    search_key: &str,
    pages: &[PageTextLayer],
    candidates: &mut Vec<HighlightCandidate>,
) {
    for layer in pages {
        for (idx, matched) in layer.text().match_indices(search_key) {
            let rects = layer.rects_for_span(idx, idx + search_key.len());

            let Some(bounding_rect) = Rect::union_all(&rects) else {
                // No geometry for a confirmed text match: the layer cannot
                // make further progress on this fragment.
                warn!(page = layer.page_number, "match without geometry, dropping fragment");
                return;
            };

            let viewport_position = Position {
                page_number: layer.page_number,
                bounding_rect,
                rects,
            };

            candidates.push(HighlightCandidate::new(
                position_to_scaled(&viewport_position, &layer.viewport),
                HighlightContent::text(matched),
            ));
        }
    }
}

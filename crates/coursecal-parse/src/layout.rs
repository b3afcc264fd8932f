//! Geometric row reconstruction from positioned text fragments.
//!
//! PDF text carries no row or column markup; all this stage has to work
//! with is each fragment's x offset and baseline y. The algorithm:
//!
//! 1. Round each fragment's baseline y to an integer key and group
//!    fragments sharing that key. Rounding (not exact equality) is
//!    mandatory: two fragments meant to sit on one visual line routinely
//!    differ by sub-integer amounts from font metrics.
//! 2. Order groups by descending rounded y (PDF convention: larger y =
//!    higher on the page, so this is top of page first).
//! 3. Within a group, order fragments by ascending x (left to right).
//! 4. Trim each cell, drop cells that trim to empty, drop rows left with
//!    zero cells.
//!
//! Pages are processed strictly in document order and their rows
//! concatenated, so row order across the whole document follows the
//! printed reading order.

use coursecal_core::{Row, TextFragment};
use std::collections::BTreeMap;

/// Reconstruct the ordered rows of a single page from its fragments.
///
/// A page with zero fragments yields zero rows; there is no error state.
#[must_use = "returns the reconstructed rows of the page"]
pub fn reconstruct_page(fragments: &[TextFragment]) -> Vec<Row> {
    let mut groups: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        #[allow(clippy::cast_possible_truncation)] // baselines are page coordinates, well within i64
        let key = fragment.y.round() as i64;
        groups.entry(key).or_default().push(fragment);
    }

    // BTreeMap iterates ascending; reverse for top-of-page (largest y) first
    groups
        .into_iter()
        .rev()
        .filter_map(|(_, mut group)| {
            group.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            let cells: Row = group
                .iter()
                .map(|fragment| fragment.text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect();
            (!cells.is_empty()).then_some(cells)
        })
        .collect()
}

/// Reconstruct the full row sequence of a document, page by page.
#[must_use = "returns the document's full row sequence"]
pub fn reconstruct_document(pages: &[Vec<TextFragment>]) -> Vec<Row> {
    let mut rows = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let page_rows = reconstruct_page(page);
        log::debug!(
            "page {}: {} fragments -> {} rows",
            index + 1,
            page.len(),
            page_rows.len()
        );
        rows.extend(page_rows);
    }
    rows
}

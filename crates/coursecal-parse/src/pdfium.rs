//! Positioned-fragment extraction from PDF files via pdfium.
//!
//! This is the input boundary of the pipeline: everything downstream only
//! sees [`TextFragment`]s, so any extractor that produces content plus an
//! x offset and baseline y can stand in for this module. Compiled only
//! with the `pdf` feature; requires a pdfium dynamic library next to the
//! binary or on the system at runtime.

use coursecal_core::{Result, ScheduleError, TextFragment};
use pdfium_render::prelude::*;
use std::path::Path;

/// Extracts per-page positioned text fragments from PDF files
pub struct FragmentExtractor {
    pdfium: Pdfium,
}

impl FragmentExtractor {
    /// Bind the pdfium library and create an extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ExtractionError`] if no pdfium library can
    /// be bound.
    pub fn new() -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| {
                    ScheduleError::ExtractionError(format!("failed to bind pdfium: {e}"))
                })?,
        );
        Ok(Self { pdfium })
    }

    /// Extract one fragment collection per page, in page order.
    ///
    /// Pages are traversed strictly sequentially; downstream row ordering
    /// across pages depends on this. Text segments whose content trims to
    /// empty (pure marked-content markers included) are filtered out here.
    /// The baseline y is taken directly from the page's bottom-left
    /// coordinate space, so larger y means higher on the page.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ExtractionError`] if the document or a
    /// page's text cannot be loaded.
    pub fn extract_document(&self, path: &Path) -> Result<Vec<Vec<TextFragment>>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ScheduleError::ExtractionError(format!("failed to load PDF: {e}")))?;

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let text = page.text().map_err(|e| {
                ScheduleError::ExtractionError(format!("failed to read page {} text: {e}", index + 1))
            })?;

            let mut fragments = Vec::new();
            for segment in text.segments().iter() {
                let content = segment.text();
                if content.trim().is_empty() {
                    continue;
                }
                let bounds = segment.bounds();
                fragments.push(TextFragment::new(
                    content,
                    f64::from(bounds.left().value),
                    f64::from(bounds.bottom().value),
                ));
            }
            log::debug!("page {}: {} fragments", index + 1, fragments.len());
            pages.push(fragments);
        }
        Ok(pages)
    }
}

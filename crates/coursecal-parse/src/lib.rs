//! # coursecal-parse
//!
//! Recovers tabular structure from a printed schedule's positioned text
//! fragments and assembles it into resolved course-meeting records.
//!
//! Two stages:
//!
//! - [`layout`] - purely geometric row/cell reconstruction from fragment
//!   coordinates (no row or column markup exists in the source).
//! - [`assembler`] - a priority-ordered row classifier plus a small state
//!   machine that copes with variable-length course blocks, restated date
//!   ranges and multiple meeting patterns per course.
//!
//! With the `pdf` feature enabled, [`pdfium`] provides the fragment
//! extraction front end.
//!
//! ## Example
//!
//! ```
//! use coursecal_core::TextFragment;
//! use coursecal_parse::{assemble_courses, reconstruct_document};
//!
//! let pages = vec![vec![
//!     TextFragment::new("Title", 40.0, 700.0),
//!     TextFragment::new("Total Hours", 40.0, 100.0),
//! ]];
//! let rows = reconstruct_document(&pages);
//! let courses = assemble_courses(&rows);
//! assert!(courses.is_empty()); // empty table body
//! ```

pub mod assembler;
pub mod layout;
#[cfg(feature = "pdf")]
pub mod pdfium;

pub use assembler::{assemble_courses, classify_row, RowKind};
pub use layout::{reconstruct_document, reconstruct_page};
#[cfg(feature = "pdf")]
pub use pdfium::FragmentExtractor;

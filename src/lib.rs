//! Find the series you started but never finished.
//!
//! Rows come from either a Goodreads CSV export or a calibre library queried
//! through `calibredb`. They are normalized into [`types::book::BookRecord`]s,
//! held by a [`library::Library`], grouped by series and classified by the
//! [`analyzer`].

pub mod analyzer;
pub mod config;
pub mod default_colors;
pub mod library;
pub mod normalize;
pub mod report;
pub mod series;
pub mod source;
pub mod traits;
pub mod types;

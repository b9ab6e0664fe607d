//! Immigration notice field extraction.
//!
//! Pipeline: [`normalize`] the raw text once, run every field extractor in
//! [`rules`] over it, then [`validate`] the assembled record.

pub mod normalize;
mod parser;
pub mod rules;
pub mod validate;

pub use normalize::normalize;
pub use parser::{extract, ExtractionResult, NoticeExtractor, NoticeParser};
pub use validate::{is_valid_date, is_valid_range, is_valid_receipt_number, validate};

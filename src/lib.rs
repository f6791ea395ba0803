// src/lib.rs
//! Extraction of safety information (minimum age, allergy mentions,
//! cross-references) from Czech SPC documents.
pub mod document;
pub mod extractors;
pub mod storage;
pub mod utils;

pub use document::NormalizedDocument;
pub use extractors::{AnalysisResult, SpcExtractor};

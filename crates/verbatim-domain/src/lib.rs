//! Verbatim Domain Layer
//!
//! Core types and trait seams for the interview coding pipeline.
//!
//! ## Key Concepts
//!
//! - **Document reference**: an interview index paired with the path of its transcript
//! - **Analysis record**: one theme / sub-theme / verbatim triple produced by the model
//! - **LLM provider**: anything that turns a prompt into completion text
//! - **Document reader**: anything that turns a transcript path into plain text
//!
//! Infrastructure implementations (HTTP client, PDF extraction) live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod record;
pub mod traits;

pub use document::DocumentRef;
pub use record::AnalysisRecord;

//! parser/mod.rs
//!
//! Source extraction: raw C text → functions, `#define` constants, includes.
//!
//! Extraction is lexical by design (regex + brace counting) and tolerant of
//! the macro-heavy, non-standard C common in embedded codebases. The
//! `FunctionExtractor` seam exists so an AST-backed extractor can replace the
//! regex one without touching the rest of the pipeline.

pub mod functions;
pub mod source;

use crate::model::Function;

/// Recovers top-level function definitions from source text.
pub trait FunctionExtractor {
    fn extract_functions(&self, content: &str) -> Vec<Function>;
}

pub use functions::RegexExtractor;
pub use source::SourceFile;

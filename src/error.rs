//! error.rs
//!
//! Typed errors for the generation pipeline.
//!
//! Parser and configuration failures are fatal to a single generation call.
//! Analyzer degeneracies never surface here: analysis is heuristic and
//! degrades to empty facts instead of failing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    /// Source file missing or unreadable.
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source bytes decoded under neither the principal nor the
    /// fallback encoding.
    #[error("source not decodable as UTF-8 or GBK: {path}")]
    SourceDecode { path: PathBuf },

    /// Requested function absent from the parsed set.
    #[error("function not found: {name}")]
    FunctionNotFound { name: String },

    /// Configuration rejected by validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Requested output format is not a known variant.
    #[error("unsupported output format: {format}")]
    FormatUnsupported { format: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),
}

impl GenError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GenError::SourceNotFound { .. } | GenError::FunctionNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

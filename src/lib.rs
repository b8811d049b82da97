//! tessgen
//!
//! Automated unit-test script generation for embedded C functions.
//!
//! The pipeline is linear: a lexical parser recovers function signatures
//! and bodies from C source text, a heuristic analyzer derives control- and
//! data-flow facts, a strategy turns those facts into abstract test
//! scenarios, a value generator maps scenarios onto concrete literals, and
//! a formatter renders the assembled suite as a Tessy test script (or a
//! JSON view of the same data).
//!
//! ```no_run
//! use tessgen::{Generator, GeneratorConfig};
//!
//! let generator = Generator::new(GeneratorConfig::default())?;
//! let script = generator.generate_from_source(
//!     "int f(int x) { if (x > 0) { return 0; } return 1; }",
//!     "f",
//! )?;
//! println!("{script}");
//! # Ok::<(), tessgen::GenError>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod testgen;

pub use config::GeneratorConfig;
pub use error::{GenError, Result};
pub use format::OutputFormat;
pub use pipeline::Generator;

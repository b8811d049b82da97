//! testgen/mod.rs
//!
//! Scenario synthesis, concrete value generation and suite assembly.

pub mod assembler;
pub mod scenarios;
pub mod values;

pub use assembler::{assemble_suite, determine_test_data, TestData};
pub use scenarios::generate_scenarios;
pub use values::ValueGenerator;

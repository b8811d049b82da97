//! pipeline.rs
//!
//! End-to-end generation: parse → analyze → scenario synthesis → value
//! generation → assembly → formatting. Single-threaded; every run owns its
//! intermediate state and discards it once the suite is rendered.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::analyzer;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::format;
use crate::model::TestSuite;
use crate::parser::SourceFile;
use crate::testgen::{self, ValueGenerator};

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Generator> {
        config.validate()?;
        Ok(Generator { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the rendered test script for one function of a file.
    pub fn generate_from_file(&self, path: &Path, function_name: &str) -> Result<String> {
        let source = SourceFile::read(path)?;
        self.generate(&source, function_name)
    }

    /// Same pipeline over an in-memory source string.
    pub fn generate_from_source(&self, content: &str, function_name: &str) -> Result<String> {
        let source = SourceFile::from_source(content);
        self.generate(&source, function_name)
    }

    pub fn generate(&self, source: &SourceFile, function_name: &str) -> Result<String> {
        let suite = self.build_suite(source, function_name)?;
        format::render(&suite, self.config.format()?)
    }

    /// Generate and also write the script to `out`.
    pub fn generate_to_file(
        &self,
        source_path: &Path,
        function_name: &str,
        out: &Path,
    ) -> Result<String> {
        let text = self.generate_from_file(source_path, function_name)?;
        fs::write(out, &text)?;
        info!(path = %out.display(), "test script written");
        Ok(text)
    }

    /// Run every stage up to assembly and return the suite itself.
    pub fn build_suite(&self, source: &SourceFile, function_name: &str) -> Result<TestSuite> {
        info!(
            function = function_name,
            source = %source.path_display(),
            "generating test suite"
        );

        let function = source.function(function_name)?;
        let analysis = analyzer::analyze(function);
        debug!(
            complexity = analysis.complexity,
            branches = analysis.branch_count(),
            returns = analysis.return_count(),
            "analysis complete"
        );

        let scenarios = testgen::generate_scenarios(function, &analysis, &self.config);
        debug!(scenarios = scenarios.len(), "scenarios synthesized");

        let mut values = ValueGenerator::new(self.config.value_seed);
        Ok(testgen::assemble_suite(
            function,
            &scenarios,
            &analysis,
            &source.defines,
            &self.config,
            source.path_display(),
            &mut values,
        ))
    }

    /// Generate for every function of a parsed file, skipping
    /// underscore-prefixed (private by convention) names. Per-function
    /// failures are logged and recorded as `None`.
    pub fn generate_all(&self, source: &SourceFile) -> Vec<(String, Option<String>)> {
        source
            .functions
            .iter()
            .filter(|f| !f.name.starts_with('_'))
            .map(|f| {
                let rendered = match self.generate(source, &f.name) {
                    Ok(text) => Some(text),
                    Err(e) => {
                        error!(function = %f.name, error = %e, "generation failed");
                        None
                    }
                };
                (f.name.clone(), rendered)
            })
            .collect()
    }

    /// Sequential batch over (file, function) pairs. One failing item never
    /// aborts the rest; its entry is `None` in the result map.
    pub fn batch(&self, pairs: &[(std::path::PathBuf, String)]) -> BTreeMap<String, Option<String>> {
        let mut results = BTreeMap::new();

        for (path, function_name) in pairs {
            match self.generate_from_file(path, function_name) {
                Ok(text) => {
                    results.insert(function_name.clone(), Some(text));
                }
                Err(e) => {
                    error!(
                        function = %function_name,
                        source = %path.display(),
                        error = %e,
                        "batch item failed"
                    );
                    results.insert(function_name.clone(), None);
                }
            }
        }

        results
    }
}

//! analyzer/data_flow.rs
//!
//! Best-effort extraction of declarations, assignments, call sites,
//! uppercase constant references and per-parameter usage.

use regex::Regex;

use crate::analyzer::{AnalysisResult, Assignment, CallSite, ParameterUsage, Variable};
use crate::model::Function;

fn declaration_pattern() -> Regex {
    Regex::new(r"(\w+)\s+(\w+)\s*[=;]").unwrap()
}

fn assignment_pattern() -> Regex {
    Regex::new(r"(\w+)\s*=\s*([^;=][^;]*);").unwrap()
}

fn call_pattern() -> Regex {
    Regex::new(r"(\w+)\s*\(").unwrap()
}

fn constant_pattern() -> Regex {
    Regex::new(r"\b[A-Z_][A-Z0-9_]*\b").unwrap()
}

pub fn analyze_data_flow(function: &Function, result: &mut AnalysisResult) {
    let body = &function.body;

    result.variables = declaration_pattern()
        .captures_iter(body)
        .map(|caps| Variable {
            c_type: caps[1].to_string(),
            name: caps[2].to_string(),
            position: caps.get(0).map(|m| m.start()).unwrap_or(0),
        })
        .collect();

    result.assignments = assignment_pattern()
        .captures_iter(body)
        .map(|caps| Assignment {
            target: caps[1].to_string(),
            expression: caps[2].trim().to_string(),
        })
        .collect();

    result.call_sites = call_pattern()
        .captures_iter(body)
        .map(|caps| CallSite {
            callee: caps[1].to_string(),
            position: caps.get(0).map(|m| m.start()).unwrap_or(0),
        })
        .collect();

    result.constants = uppercase_constants(body);
    result.parameter_usage = parameter_usage(function);
}

/// Uppercase identifiers of length three or more, deduplicated in
/// source order. Values come from `#define` context elsewhere.
fn uppercase_constants(body: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for m in constant_pattern().find_iter(body) {
        let name = m.as_str();
        if name.len() > 2 && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }

    out
}

fn parameter_usage(function: &Function) -> Vec<ParameterUsage> {
    function
        .parameters
        .iter()
        .map(|param| {
            let word = Regex::new(&format!(r"\b{}\b", regex::escape(&param.name))).unwrap();
            let occurrences = word.find_iter(&function.body).count();

            // `=` but not `==`: left side of an actual assignment.
            let assigned = Regex::new(&format!(
                r"\b{}\s*=(?:[^=]|$)",
                regex::escape(&param.name)
            ))
            .unwrap();
            let is_modified = assigned.is_match(&function.body);

            ParameterUsage {
                name: param.name.clone(),
                occurrences,
                is_modified,
            }
        })
        .collect()
}

//! analyzer/control_flow.rs
//!
//! Branch inventory, condition recovery and McCabe complexity.

use regex::Regex;

use crate::analyzer::{AnalysisResult, Branch, BranchKind, ReturnPoint};

fn keyword_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"\b{keyword}\s*\(")).unwrap()
}

fn case_pattern() -> Regex {
    Regex::new(r"\bcase\s+[^:]+:").unwrap()
}

fn for_pattern() -> Regex {
    // Only the three-clause form counts as a loop header.
    Regex::new(r"\bfor\s*\([^)]*;[^)]*;[^)]*\)").unwrap()
}

fn return_pattern() -> Regex {
    Regex::new(r"\breturn\s+([^;]+);").unwrap()
}

pub fn analyze_control_flow(body: &str) -> AnalysisResult {
    let mut branches = Vec::new();

    for m in keyword_pattern("if").find_iter(body) {
        branches.push(Branch {
            kind: BranchKind::If,
            position: m.start(),
            condition: extract_condition(body, m.end()),
        });
    }

    for m in for_pattern().find_iter(body) {
        branches.push(Branch {
            kind: BranchKind::For,
            position: m.start(),
            condition: None,
        });
    }

    for m in keyword_pattern("while").find_iter(body) {
        branches.push(Branch {
            kind: BranchKind::While,
            position: m.start(),
            condition: extract_condition(body, m.end()),
        });
    }

    for m in keyword_pattern("switch").find_iter(body) {
        branches.push(Branch {
            kind: BranchKind::Switch,
            position: m.start(),
            condition: extract_condition(body, m.end()),
        });
    }

    for m in case_pattern().find_iter(body) {
        branches.push(Branch {
            kind: BranchKind::Case,
            position: m.start(),
            condition: None,
        });
    }

    branches.sort_by_key(|b| b.position);

    let return_points = return_pattern()
        .captures_iter(body)
        .map(|caps| ReturnPoint {
            value: caps[1].trim().to_string(),
            position: caps.get(0).map(|m| m.start()).unwrap_or(0),
        })
        .collect();

    let complexity = 1 + branches
        .iter()
        .filter(|b| {
            matches!(
                b.kind,
                BranchKind::If | BranchKind::For | BranchKind::While | BranchKind::Case
            )
        })
        .count();

    let has_loops = branches
        .iter()
        .any(|b| matches!(b.kind, BranchKind::For | BranchKind::While));
    let has_switch = branches.iter().any(|b| b.kind == BranchKind::Switch);

    AnalysisResult {
        branches,
        return_points,
        complexity,
        has_loops,
        has_switch,
        ..AnalysisResult::default()
    }
}

/// Paren-balanced scan starting just past the opening `(`. Returns the
/// condition text, or what remains of the body if the parens never balance.
fn extract_condition(body: &str, start: usize) -> Option<String> {
    let bytes = body.as_bytes();
    let mut depth = 1usize;
    let mut pos = start;

    while pos < bytes.len() && depth > 0 {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }

    let end = if depth == 0 { pos - 1 } else { pos };
    Some(body[start..end].trim().to_string())
}

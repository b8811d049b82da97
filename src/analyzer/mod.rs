//! analyzer/mod.rs
//!
//! Lightweight static analysis over a parsed function body: control-flow
//! facts (branches, return points, complexity) and data-flow facts
//! (variables, assignments, call sites, parameter usage).
//!
//! Everything here is heuristic and never fails: a malformed or truncated
//! body degrades to empty facts.

pub mod control_flow;
pub mod data_flow;

use crate::model::Function;

/* ---------- control flow ---------- */

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BranchKind {
    If,
    For,
    While,
    Switch,
    Case,
}

#[derive(Debug, Clone)]
pub struct Branch {
    pub kind: BranchKind,
    /// Byte offset within the body.
    pub position: usize,
    /// Recovered for paren-headed constructs (`if`/`while`/`switch`).
    pub condition: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReturnPoint {
    pub value: String,
    pub position: usize,
}

/* ---------- data flow ---------- */

#[derive(Debug, Clone)]
pub struct Variable {
    pub c_type: String,
    pub name: String,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: String,
    pub expression: String,
}

#[derive(Debug, Clone)]
pub struct CallSite {
    pub callee: String,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct ParameterUsage {
    pub name: String,
    pub occurrences: usize,
    pub is_modified: bool,
}

/* ---------- combined result ---------- */

#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub branches: Vec<Branch>,
    pub return_points: Vec<ReturnPoint>,
    pub variables: Vec<Variable>,
    pub assignments: Vec<Assignment>,
    pub call_sites: Vec<CallSite>,
    pub constants: Vec<String>,
    pub parameter_usage: Vec<ParameterUsage>,
    pub complexity: usize,
    pub has_loops: bool,
    pub has_switch: bool,
}

impl AnalysisResult {
    pub fn branch_count(&self) -> usize {
        self.branches
            .iter()
            .filter(|b| b.kind != BranchKind::Switch)
            .count()
    }

    pub fn if_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.kind == BranchKind::If)
    }

    pub fn return_count(&self) -> usize {
        self.return_points.len()
    }

    /// Callee names eligible for stub synthesis: call-shaped sites whose
    /// identifier is not a control keyword, deduplicated in source order.
    pub fn callees(&self) -> Vec<&str> {
        let mut seen = Vec::new();

        for site in &self.call_sites {
            let name = site.callee.as_str();
            if matches!(name, "if" | "for" | "while" | "return") {
                continue;
            }
            if !seen.contains(&name) {
                seen.push(name);
            }
        }

        seen
    }
}

/// Run both analysis passes over one function.
pub fn analyze(function: &Function) -> AnalysisResult {
    let mut result = control_flow::analyze_control_flow(&function.body);
    data_flow::analyze_data_flow(function, &mut result);
    result
}

//! testgen/scenarios.rs
//!
//! Abstract test scenarios derived from analysis facts. Emission order is
//! deterministic and significant: case ids follow it.

use crate::analyzer::AnalysisResult;
use crate::config::GeneratorConfig;
use crate::model::{Function, Scenario, ScenarioKind};

/// Emit the scenario list for one function:
///
/// 1. the normal execution path, always first, priority 1;
/// 2. one boundary scenario per `if` branch;
/// 3. an error-handling scenario when more than one return point exists;
/// 4. zero-/multiple-iteration scenarios when loops are present;
/// 5. one boundary scenario per integer-like parameter.
///
/// The list is then truncated to `max_test_cases`, keeping priority-1
/// scenarios first and filling the rest in emission order.
pub fn generate_scenarios(
    function: &Function,
    analysis: &AnalysisResult,
    config: &GeneratorConfig,
) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    scenarios.push(Scenario {
        name: "Normal Path Test".into(),
        description: "Test normal execution path with valid inputs".into(),
        kind: ScenarioKind::Normal,
        priority: 1,
        target_parameter: None,
        target_branch: None,
        target_return: None,
    });

    if config.include_boundary_tests {
        for (index, branch) in analysis.if_branches().enumerate() {
            let description = match &branch.condition {
                Some(cond) => format!("Exercise branch condition: {cond}"),
                None => format!("Exercise branch {}", index + 1),
            };

            scenarios.push(Scenario {
                name: format!("Branch Coverage Test {}", index + 1),
                description,
                kind: ScenarioKind::Boundary,
                priority: 2,
                target_parameter: None,
                target_branch: Some(index),
                target_return: None,
            });
        }
    }

    if config.include_error_tests && analysis.return_count() > 1 {
        scenarios.push(Scenario {
            name: "Error Handling Test".into(),
            description: "Test error handling paths".into(),
            kind: ScenarioKind::Error,
            priority: 3,
            target_parameter: None,
            target_branch: None,
            target_return: None,
        });
    }

    if analysis.has_loops {
        scenarios.push(Scenario {
            name: "Loop Zero Iterations".into(),
            description: "Test loop with zero iterations".into(),
            kind: ScenarioKind::Boundary,
            priority: 2,
            target_parameter: None,
            target_branch: None,
            target_return: None,
        });
        scenarios.push(Scenario {
            name: "Loop Multiple Iterations".into(),
            description: "Test loop with multiple iterations".into(),
            kind: ScenarioKind::Normal,
            priority: 2,
            target_parameter: None,
            target_branch: None,
            target_return: None,
        });
    }

    if config.include_boundary_tests {
        for param in &function.parameters {
            if param.data_type.is_integer_like() && !param.is_pointer {
                scenarios.push(Scenario {
                    name: format!("Boundary Test - {}", param.name),
                    description: format!("Test boundary values for parameter {}", param.name),
                    kind: ScenarioKind::Boundary,
                    priority: 2,
                    target_parameter: Some(param.name.clone()),
                    target_branch: None,
                    target_return: None,
                });
            }
        }
    }

    truncate(scenarios, config.max_test_cases)
}

/// Keep every priority-1 scenario, then fill the remaining slots in
/// emission order.
fn truncate(scenarios: Vec<Scenario>, max: usize) -> Vec<Scenario> {
    if scenarios.len() <= max {
        return scenarios;
    }

    let mut kept: Vec<Scenario> = scenarios.iter().filter(|s| s.priority == 1).cloned().collect();

    for scenario in scenarios {
        if kept.len() >= max {
            break;
        }
        if scenario.priority != 1 {
            kept.push(scenario);
        }
    }

    kept
}

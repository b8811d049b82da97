//! testgen/assembler.rs
//!
//! Turns abstract scenarios into concrete test cases and wraps them in a
//! suite: input literals per parameter, expected outputs, stub bodies for
//! recorded callees, sequential 1-based ids.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::analyzer::AnalysisResult;
use crate::config::GeneratorConfig;
use crate::model::{
    DataType, DefineValue, Function, Scenario, ScenarioKind, SuiteMetadata, TestCase, TestSuite,
    Value,
};
use crate::testgen::values::ValueGenerator;

#[derive(Debug, Clone, Default)]
pub struct TestData {
    pub inputs: Vec<(String, Value)>,
    pub outputs: Vec<(String, Value)>,
    pub stubs: Vec<(String, String)>,
}

/// Concrete data for one scenario.
///
/// A boundary scenario with a target parameter forces a boundary value for
/// that parameter only; its peers receive normal values. Untargeted
/// scenarios apply their kind to every parameter.
pub fn determine_test_data(
    scenario: &Scenario,
    function: &Function,
    analysis: &AnalysisResult,
    defines: &BTreeMap<String, DefineValue>,
    config: &GeneratorConfig,
    gen: &mut ValueGenerator,
) -> TestData {
    let mut data = TestData::default();

    for param in &function.parameters {
        let kind = effective_kind(scenario, &param.name);

        if param.is_pointer {
            data.inputs.extend(gen.pointer_value(&param.name, kind));
            continue;
        }

        if param.data_type == DataType::Array || param.array_size.is_some() {
            data.inputs
                .push((param.name.clone(), Value::literal(gen.array_value(&param.name, kind))));
            continue;
        }

        let literal = match param.constraint {
            Some(constraint) => gen.constrained_value(constraint),
            None => match kind {
                ScenarioKind::Boundary => gen.boundary_value(param.data_type, false),
                ScenarioKind::Error => gen.error_value(param.data_type, false),
                _ => gen.normal_value(&param.name, param.data_type, defines),
            },
        };

        data.inputs.push((param.name.clone(), Value::literal(literal)));
    }

    if function.return_type != DataType::Void {
        let expected = ValueGenerator::stub_return_value(scenario.kind);
        data.outputs.push(("return".to_string(), Value::literal(expected)));
    }

    if config.generate_stubs {
        for callee in analysis.callees() {
            data.stubs
                .push((callee.to_string(), stub_body(scenario.kind)));
        }
    }

    data
}

fn effective_kind(scenario: &Scenario, param_name: &str) -> ScenarioKind {
    match (&scenario.target_parameter, scenario.kind) {
        (Some(target), ScenarioKind::Boundary) if target == param_name => ScenarioKind::Boundary,
        (Some(_), ScenarioKind::Boundary) => ScenarioKind::Normal,
        (_, kind) => kind,
    }
}

/// Stub bodies drive a step counter so repeated calls can walk a return
/// sequence during test execution.
fn stub_body(kind: ScenarioKind) -> String {
    let value = ValueGenerator::stub_return_value(kind);
    format!(
        "static int step = 0;\nswitch (step) {{\ncase 0:\n    return {value};\ndefault:\n    break;\n}}\nstep++;"
    )
}

/// Materialize every scenario and wrap the cases in a suite. Ids are
/// assigned here, after the scenario list is final, so they are dense and
/// 1-based within the suite.
pub fn assemble_suite(
    function: &Function,
    scenarios: &[Scenario],
    analysis: &AnalysisResult,
    defines: &BTreeMap<String, DefineValue>,
    config: &GeneratorConfig,
    source_path: String,
    gen: &mut ValueGenerator,
) -> TestSuite {
    let test_cases = scenarios
        .iter()
        .enumerate()
        .map(|(index, scenario)| {
            let data = determine_test_data(scenario, function, analysis, defines, config, gen);

            TestCase {
                id: index + 1,
                name: scenario.name.clone(),
                description: scenario.description.clone(),
                kind: scenario.kind,
                inputs: data.inputs,
                expected_outputs: data.outputs,
                stub_functions: data.stubs,
                preconditions: Vec::new(),
                postconditions: Vec::new(),
            }
        })
        .collect();

    TestSuite {
        function_name: function.name.clone(),
        test_cases,
        coverage_target: config.coverage_target,
        metadata: SuiteMetadata {
            source_path,
            generated_at: Utc::now().to_rfc3339(),
            complexity: analysis.complexity,
            scenario_count: scenarios.len(),
        },
    }
}

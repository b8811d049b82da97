//! format/json.rs
//!
//! JSON view of a suite, all fields verbatim.

use serde_json::{json, Map, Value as Json};

use crate::error::Result;
use crate::model::{TestSuite, Value};

pub fn render(suite: &TestSuite) -> Result<String> {
    let cases: Vec<Json> = suite
        .test_cases
        .iter()
        .map(|case| {
            json!({
                "id": case.id,
                "name": case.name,
                "description": case.description,
                "type": case.kind.as_str(),
                "inputs": entries_to_json(&case.inputs),
                "expected_outputs": entries_to_json(&case.expected_outputs),
                "stub_functions": stub_map(&case.stub_functions),
                "preconditions": case.preconditions,
                "postconditions": case.postconditions,
            })
        })
        .collect();

    let doc = json!({
        "function_name": suite.function_name,
        "coverage_target": suite.coverage_target,
        "metadata": {
            "source_path": suite.metadata.source_path,
            "generated_at": suite.metadata.generated_at,
            "complexity": suite.metadata.complexity,
            "scenario_count": suite.metadata.scenario_count,
        },
        "test_cases": cases,
    });

    Ok(serde_json::to_string_pretty(&doc)?)
}

fn entries_to_json(entries: &[(String, Value)]) -> Json {
    let mut map = Map::new();
    for (name, value) in entries {
        map.insert(name.clone(), value_to_json(value));
    }
    Json::Object(map)
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Literal(text) => Json::String(text.clone()),
        Value::Nested(fields) => {
            let mut map = Map::new();
            for (name, field_value) in fields {
                map.insert(name.clone(), value_to_json(field_value));
            }
            Json::Object(map)
        }
    }
}

fn stub_map(stubs: &[(String, String)]) -> Json {
    let mut map = Map::new();
    for (name, body) in stubs {
        map.insert(name.clone(), Json::String(body.clone()));
    }
    Json::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScenarioKind, SuiteMetadata, TestCase};

    fn sample_suite() -> TestSuite {
        TestSuite {
            function_name: "f".into(),
            test_cases: vec![TestCase {
                id: 1,
                name: "Normal Path Test".into(),
                description: "normal".into(),
                kind: ScenarioKind::Normal,
                inputs: vec![
                    ("x".into(), Value::literal("100")),
                    (
                        "&target_buf".into(),
                        Value::Nested(vec![("Length".into(), Value::literal("0"))]),
                    ),
                ],
                expected_outputs: vec![("return".into(), Value::literal("0"))],
                stub_functions: vec![("Drv_Init".into(), "return 0;".into())],
                preconditions: Vec::new(),
                postconditions: Vec::new(),
            }],
            coverage_target: 0.85,
            metadata: SuiteMetadata {
                source_path: "<memory>".into(),
                generated_at: "2026-01-01T00:00:00+00:00".into(),
                complexity: 1,
                scenario_count: 1,
            },
        }
    }

    #[test]
    fn document_carries_all_fields_verbatim() {
        let text = render(&sample_suite()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["function_name"], "f");
        assert_eq!(doc["coverage_target"], 0.85);
        assert_eq!(doc["metadata"]["complexity"], 1);
        assert_eq!(doc["test_cases"][0]["id"], 1);
        assert_eq!(doc["test_cases"][0]["type"], "normal");
        assert_eq!(doc["test_cases"][0]["inputs"]["x"], "100");
        assert_eq!(doc["test_cases"][0]["stub_functions"]["Drv_Init"], "return 0;");
    }

    #[test]
    fn nested_values_become_objects() {
        let text = render(&sample_suite()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["test_cases"][0]["inputs"]["&target_buf"]["Length"], "0");
    }

    #[test]
    fn rendering_is_idempotent() {
        let suite = sample_suite();
        assert_eq!(render(&suite).unwrap(), render(&suite).unwrap());
    }
}

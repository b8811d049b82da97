//! format/tessy.rs
//!
//! Renders a suite into the brace-delimited, `$`-keyword script syntax the
//! downstream test tool imports. `$name`/`$uuid` fields are emitted empty;
//! the tool fills them on import.

use crate::model::{TestCase, TestSuite, Value};

const INDENT: &str = "    ";

pub fn render(suite: &TestSuite) -> String {
    let mut out = vec!["$testobject {".to_string(), String::new()];

    for case in &suite.test_cases {
        render_case(case, &mut out);
        out.push(String::new());
    }

    out.push("}".to_string());
    out.join("\n")
}

fn render_case(case: &TestCase, out: &mut Vec<String>) {
    out.push(format!("{INDENT}$testcase {} {{", case.id));
    out.push(format!("{INDENT}{INDENT}$name \"\""));
    out.push(format!("{INDENT}{INDENT}$uuid \"\""));
    out.push(String::new());
    out.push(format!("{INDENT}{INDENT}$teststep {}.1 {{", case.id));
    out.push(format!("{}$name \"\"", INDENT.repeat(3)));
    out.push(format!("{}$uuid \"\"", INDENT.repeat(3)));

    if !case.stub_functions.is_empty() {
        out.push(format!("{}$stubfunctions {{", INDENT.repeat(3)));
        for (name, body) in &case.stub_functions {
            out.push(format!("{}{name} '''{body}'''", INDENT.repeat(4)));
        }
        out.push(format!("{}}}", INDENT.repeat(3)));
    }

    if !case.inputs.is_empty() {
        out.push(format!("{}$inputs {{", INDENT.repeat(3)));
        for (name, value) in &case.inputs {
            render_entry(name, value, 4, true, out);
        }
        out.push(format!("{}}}", INDENT.repeat(3)));
    }

    if !case.expected_outputs.is_empty() {
        out.push(format!("{}$outputs {{", INDENT.repeat(3)));
        for (name, value) in &case.expected_outputs {
            render_entry(name, value, 4, false, out);
        }
        out.push(format!("{}}}", INDENT.repeat(3)));
    }

    out.push(format!("{}$calltrace {{", INDENT.repeat(3)));
    out.push(format!("{}*** Ignore Call Trace ***", INDENT.repeat(4)));
    out.push(format!("{}}}", INDENT.repeat(3)));
    out.push(format!("{INDENT}{INDENT}}}"));
    out.push(format!("{INDENT}}}"));
}

/// One input/output line. Inputs use `name = value`, outputs `name value`.
/// Nested pointer targets open their own block: `&target { field = value }`.
fn render_entry(
    name: &str,
    value: &Value,
    depth: usize,
    with_equals: bool,
    out: &mut Vec<String>,
) {
    let pad = INDENT.repeat(depth);

    match value {
        Value::Literal(literal) => {
            if with_equals {
                out.push(format!("{pad}{name} = {literal}"));
            } else {
                out.push(format!("{pad}{name} {literal}"));
            }
        }
        Value::Nested(fields) => {
            out.push(format!("{pad}{name} {{"));
            for (field, field_value) in fields {
                render_entry(field, field_value, depth + 1, with_equals, out);
            }
            out.push(format!("{pad}}}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScenarioKind, SuiteMetadata};

    fn sample_suite() -> TestSuite {
        TestSuite {
            function_name: "Cpu_Check".into(),
            test_cases: vec![TestCase {
                id: 1,
                name: "Normal Path Test".into(),
                description: "normal".into(),
                kind: ScenarioKind::Normal,
                inputs: vec![
                    ("reg".into(), Value::literal("100")),
                    ("buf".into(), Value::literal("target_buf")),
                    (
                        "&target_buf".into(),
                        Value::Nested(vec![
                            ("DataPtr".into(), Value::literal("target_buf_DataPtr")),
                            ("Length".into(), Value::literal("*none*")),
                        ]),
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
                complexity: 2,
                scenario_count: 1,
            },
        }
    }

    #[test]
    fn wraps_cases_in_a_testobject_block() {
        let text = render(&sample_suite());

        assert!(text.starts_with("$testobject {"));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("$testcase 1 {"));
        assert!(text.contains("$teststep 1.1 {"));
    }

    #[test]
    fn inputs_use_equals_and_outputs_do_not() {
        let text = render(&sample_suite());

        assert!(text.contains("reg = 100"));
        assert!(text.contains("return 0"));
        assert!(!text.contains("return = 0"));
    }

    #[test]
    fn nested_pointer_renders_as_target_block() {
        let text = render(&sample_suite());

        assert!(text.contains("&target_buf {"));
        assert!(text.contains("DataPtr = target_buf_DataPtr"));
        assert!(text.contains("Length = *none*"));
    }

    #[test]
    fn stub_functions_are_triple_quoted() {
        let text = render(&sample_suite());
        assert!(text.contains("Drv_Init '''return 0;'''"));
    }

    #[test]
    fn calltrace_placeholder_is_always_present() {
        let text = render(&sample_suite());
        assert!(text.contains("*** Ignore Call Trace ***"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let suite = sample_suite();
        assert_eq!(render(&suite), render(&suite));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut suite = sample_suite();
        suite.test_cases[0].stub_functions.clear();
        suite.test_cases[0].inputs.clear();

        let text = render(&suite);
        assert!(!text.contains("$stubfunctions"));
        assert!(!text.contains("$inputs"));
        assert!(text.contains("$outputs"));
    }
}

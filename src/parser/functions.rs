//! parser/functions.rs
//!
//! Function-definition extraction: signature matching, brace-balanced body
//! recovery, parameter parsing.

use regex::Regex;

use crate::model::{DataType, Function, Parameter};
use crate::parser::FunctionExtractor;

/// Regex-based extractor. Matches `[static] <return-type> <name> (<params>) {`
/// and scans forward to the balancing `}`.
///
/// The brace scan does not skip braces inside string/char literals or
/// comments; that is an accepted approximation of this lexical frontend.
pub struct RegexExtractor {
    signature: Regex,
}

impl Default for RegexExtractor {
    fn default() -> Self {
        RegexExtractor {
            signature: Regex::new(r"(static\s+)?(\w+(?:\s*\*)?)\s+(\w+)\s*\(([^)]*)\)\s*\{")
                .unwrap(),
        }
    }
}

impl FunctionExtractor for RegexExtractor {
    fn extract_functions(&self, content: &str) -> Vec<Function> {
        let mut out = Vec::new();

        for caps in self.signature.captures_iter(content) {
            let whole = caps.get(0).unwrap();
            let is_static = caps.get(1).is_some();
            let return_type = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            let name = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            let params = caps.get(4).map(|m| m.as_str()).unwrap_or("");

            // `else if (x) {` matches the signature shape; keywords are
            // never function names.
            if matches!(name, "if" | "for" | "while" | "switch" | "return") {
                continue;
            }

            let body_start = whole.end();
            let (body, body_end) = extract_body(content, body_start);

            out.push(Function {
                name: name.to_string(),
                return_type: DataType::from_c_type(return_type),
                parameters: parse_parameters(params),
                is_static,
                body,
                line_start: line_of(content, whole.start()),
                line_end: line_of(content, body_end),
            });
        }

        out
    }
}

/* ============================================================
   Body extraction
   ============================================================ */

/// Scan from just past the opening `{`, counting nesting, and return the
/// body text exclusive of the balancing `}` plus the end byte offset.
/// A truncated body (never balances) yields the remainder of the file.
fn extract_body(content: &str, start: usize) -> (String, usize) {
    let bytes = content.as_bytes();
    let mut depth = 1usize;
    let mut pos = start;

    while pos < bytes.len() && depth > 0 {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }

    let end = if depth == 0 { pos - 1 } else { pos };
    (content[start..end].to_string(), pos)
}

fn line_of(content: &str, byte_pos: usize) -> usize {
    content[..byte_pos.min(content.len())]
        .bytes()
        .filter(|b| *b == b'\n')
        .count()
        + 1
}

/* ============================================================
   Parameter parsing
   ============================================================ */

/// Split a parameter list on top-level commas and parse each entry as
/// `[const] <type-words> [*] <name>`. `void` or an empty list yields
/// zero parameters.
pub fn parse_parameters(params: &str) -> Vec<Parameter> {
    let trimmed = params.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return Vec::new();
    }

    trimmed
        .split(',')
        .filter_map(|p| parse_single_parameter(p.trim()))
        .collect()
}

fn parse_single_parameter(text: &str) -> Option<Parameter> {
    let mut parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let is_const = parts.contains(&"const");
    let is_pointer = text.contains('*');
    parts.retain(|p| *p != "const");

    let raw_name = parts.last()?.replace('*', "");
    let type_text = parts[..parts.len() - 1].join(" ").replace('*', "");

    let (name, array_size) = split_array_suffix(raw_name.trim());

    let data_type = if array_size.is_some() || name_has_array_suffix(raw_name.trim()) {
        DataType::Array
    } else {
        DataType::from_c_type(&type_text)
    };

    Some(Parameter {
        name,
        data_type,
        is_pointer,
        is_const,
        array_size,
        constraint: None,
    })
}

/// `buf[8]` → ("buf", Some(8)); `buf[]` → ("buf", None) but still an array.
fn split_array_suffix(raw: &str) -> (String, Option<usize>) {
    let Some(open) = raw.find('[') else {
        return (raw.to_string(), None);
    };

    let name = raw[..open].to_string();
    let size = raw[open + 1..]
        .trim_end_matches(']')
        .trim()
        .parse::<usize>()
        .ok();

    (name, size)
}

fn name_has_array_suffix(raw: &str) -> bool {
    raw.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FunctionExtractor;

    const SOURCE: &str = r#"
#include <stdint.h>

static int helper(int a) {
    return a + 1;
}

int Cpu_Check(uint32 reg, const uint8 *data) {
    if (reg > MAX_REG) {
        return 1;
    }
    return 0;
}

void no_params(void) {
}
"#;

    #[test]
    fn finds_all_top_level_functions() {
        let funcs = RegexExtractor::default().extract_functions(SOURCE);
        let names: Vec<&str> = funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["helper", "Cpu_Check", "no_params"]);
    }

    #[test]
    fn body_excludes_closing_brace_and_balances() {
        let funcs = RegexExtractor::default().extract_functions(SOURCE);
        let f = &funcs[1];

        assert!(f.body.contains("if (reg > MAX_REG)"));
        assert!(f.body.trim_end().ends_with("return 0;"));

        let opens = f.body.matches('{').count();
        let closes = f.body.matches('}').count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn static_flag_and_line_numbers() {
        let funcs = RegexExtractor::default().extract_functions(SOURCE);
        assert!(funcs[0].is_static);
        assert!(!funcs[1].is_static);
        assert!(funcs[0].line_start < funcs[1].line_start);
        assert!(funcs[1].line_end >= funcs[1].line_start);
    }

    #[test]
    fn parses_pointer_and_const_parameters() {
        let funcs = RegexExtractor::default().extract_functions(SOURCE);
        let params = &funcs[1].parameters;

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "reg");
        assert_eq!(params[0].data_type, DataType::UInt);
        assert!(!params[0].is_pointer);

        assert_eq!(params[1].name, "data");
        assert!(params[1].is_pointer);
        assert!(params[1].is_const);
    }

    #[test]
    fn void_parameter_list_is_empty() {
        let funcs = RegexExtractor::default().extract_functions(SOURCE);
        assert!(funcs[2].parameters.is_empty());
    }

    #[test]
    fn array_parameter_gets_size() {
        let params = parse_parameters("uint8 buf[16], int n");
        assert_eq!(params[0].name, "buf");
        assert_eq!(params[0].data_type, DataType::Array);
        assert_eq!(params[0].array_size, Some(16));
        assert_eq!(params[1].name, "n");
        assert_eq!(params[1].data_type, DataType::Int);
    }

    #[test]
    fn unknown_parameter_type_defaults_to_int() {
        let params = parse_parameters("Weird_t x");
        assert_eq!(params[0].data_type, DataType::Int);
    }

    #[test]
    fn truncated_body_degrades_to_remainder() {
        let src = "int broken(int x) { if (x) { return 1;";
        let funcs = RegexExtractor::default().extract_functions(src);
        assert_eq!(funcs.len(), 1);
        assert!(funcs[0].body.contains("return 1;"));
    }

    #[test]
    fn nested_braces_stay_inside_body() {
        let src = "int f(int x) { if (x) { while (x) { x--; } } return 0; }\nint g(void) { return 2; }";
        let funcs = RegexExtractor::default().extract_functions(src);
        assert_eq!(funcs.len(), 2);
        assert!(funcs[0].body.contains("x--;"));
        assert!(!funcs[0].body.contains("return 2"));
    }
}

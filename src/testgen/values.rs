//! testgen/values.rs
//!
//! Type-driven literal selection. A fixed per-type table supplies one
//! normal value plus boundary (min/max) and out-of-range error lists;
//! `#define` constants override by parameter name, and explicit
//! constraints override the table entirely.
//!
//! Selection among boundary/error candidates is random but seeded, so a
//! given config reproduces the same suite byte for byte.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Constraint, DataType, DefineValue, ScenarioKind, Value};

/// The absent-pointer sentinel understood by the downstream tool.
pub const NULL_SENTINEL: &str = "*none*";

struct TypeValues {
    key: &'static str,
    normal: &'static str,
    boundary: &'static [&'static str],
    error: &'static [&'static str],
}

const TYPE_TABLE: &[TypeValues] = &[
    TypeValues {
        key: "uint32",
        normal: "1234567890",
        boundary: &["0", "4294967295"],
        error: &["4294967296"],
    },
    TypeValues {
        key: "uint8",
        normal: "128",
        boundary: &["0", "255"],
        error: &["256"],
    },
    TypeValues {
        key: "int",
        normal: "100",
        boundary: &["-2147483648", "2147483647"],
        error: &["2147483648"],
    },
    TypeValues {
        key: "boolean",
        normal: "1",
        boundary: &["0", "1"],
        error: &["2"],
    },
    TypeValues {
        key: "pointer",
        normal: "target_ptr",
        boundary: &[NULL_SENTINEL],
        error: &[NULL_SENTINEL],
    },
    TypeValues {
        key: "char",
        normal: "'A'",
        boundary: &["'\\0'", "'\\xFF'"],
        error: &["'\\x100'"],
    },
    TypeValues {
        key: "float",
        normal: "1.0",
        boundary: &["0.0", "3.4028235e+38"],
        error: &["inf"],
    },
    TypeValues {
        key: "double",
        normal: "1.0",
        boundary: &["0.0", "1.7976931348623157e+308"],
        error: &["inf"],
    },
];

/// Collapse a semantic type onto its value-table key. Narrow and wide
/// signed types share the `int` row; unsigned widths share `uint32`
/// except bytes.
fn base_key(data_type: DataType) -> &'static str {
    match data_type {
        DataType::UInt | DataType::ULong | DataType::UShort => "uint32",
        DataType::UChar => "uint8",
        DataType::Int | DataType::Short | DataType::Long | DataType::Enum => "int",
        DataType::Boolean => "boolean",
        DataType::Pointer => "pointer",
        DataType::Char => "char",
        DataType::Float => "float",
        DataType::Double => "double",
        DataType::Void | DataType::Array | DataType::Struct => "",
    }
}

fn table(key: &str) -> Option<&'static TypeValues> {
    TYPE_TABLE.iter().find(|t| t.key == key)
}

pub struct ValueGenerator {
    rng: StdRng,
}

impl ValueGenerator {
    pub fn new(seed: u64) -> ValueGenerator {
        ValueGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Normal value: `#define` override by parameter name, else the
    /// table's normal literal, else "0".
    pub fn normal_value(
        &mut self,
        param_name: &str,
        data_type: DataType,
        defines: &BTreeMap<String, DefineValue>,
    ) -> String {
        if let Some(value) = defines.get(param_name) {
            return value.to_string();
        }

        match table(base_key(data_type)) {
            Some(entry) => entry.normal.to_string(),
            None => "0".to_string(),
        }
    }

    /// One of the type's boundary values (minimum or maximum), or the
    /// null sentinel for pointers.
    pub fn boundary_value(
        &mut self,
        data_type: DataType,
        is_pointer: bool,
    ) -> String {
        if is_pointer {
            return NULL_SENTINEL.to_string();
        }

        match table(base_key(data_type)) {
            Some(entry) => self.pick(entry.boundary),
            None => "0".to_string(),
        }
    }

    /// An out-of-range value, `-1` for integer-like types with no table
    /// row, the null sentinel for pointers.
    pub fn error_value(
        &mut self,
        data_type: DataType,
        is_pointer: bool,
    ) -> String {
        if is_pointer {
            return NULL_SENTINEL.to_string();
        }

        let key = base_key(data_type);
        match table(key) {
            Some(entry) => self.pick(entry.error),
            None if matches!(key, "int" | "uint32" | "uint8") => "-1".to_string(),
            None => "0".to_string(),
        }
    }

    /// Uniform sample within explicit inclusive bounds.
    pub fn constrained_value(&mut self, constraint: Constraint) -> String {
        if constraint.min >= constraint.max {
            return constraint.min.to_string();
        }
        self.rng.gen_range(constraint.min..=constraint.max).to_string()
    }

    fn pick(&mut self, candidates: &[&str]) -> String {
        if candidates.is_empty() {
            return "0".to_string();
        }
        let index = self.rng.gen_range(0..candidates.len());
        candidates[index].to_string()
    }

    /* ---------- pointers and arrays ---------- */

    /// Expand a pointer parameter into its structured value entries.
    ///
    /// Normal scenarios point at a populated target buffer; error
    /// scenarios pass the null sentinel; boundary scenarios point at a
    /// zero-length target.
    pub fn pointer_value(&self, param_name: &str, kind: ScenarioKind) -> Vec<(String, Value)> {
        let target = format!("target_{param_name}");
        let data_ptr = format!("{target}_DataPtr");

        match kind {
            ScenarioKind::Error => vec![(param_name.to_string(), Value::literal(NULL_SENTINEL))],
            ScenarioKind::Boundary => vec![
                (param_name.to_string(), Value::literal(&target)),
                (
                    format!("&{target}"),
                    Value::Nested(vec![
                        ("DataPtr".into(), Value::literal(NULL_SENTINEL)),
                        ("Length".into(), Value::literal("0")),
                    ]),
                ),
            ],
            _ => vec![
                (param_name.to_string(), Value::literal(&target)),
                (
                    format!("&{target}"),
                    Value::Nested(vec![
                        ("DataPtr".into(), Value::literal(&data_ptr)),
                        ("Length".into(), Value::literal(NULL_SENTINEL)),
                    ]),
                ),
                (format!("&{data_ptr}"), Value::literal(NULL_SENTINEL)),
            ],
        }
    }

    /// Arrays degrade to a named placeholder per scenario kind.
    pub fn array_value(&self, param_name: &str, kind: ScenarioKind) -> String {
        match kind {
            ScenarioKind::Error => NULL_SENTINEL.to_string(),
            ScenarioKind::Boundary => format!("target_{param_name}_boundary"),
            _ => format!("target_{param_name}_array"),
        }
    }

    /// Return literal a synthesized stub should produce.
    pub fn stub_return_value(kind: ScenarioKind) -> &'static str {
        match kind {
            ScenarioKind::Error => "1",
            _ => "0",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defines() -> BTreeMap<String, DefineValue> {
        let mut map = BTreeMap::new();
        map.insert("MAX_REG".to_string(), DefineValue::Int(31));
        map
    }

    #[test]
    fn normal_values_come_from_the_table() {
        let mut gen = ValueGenerator::new(0);
        assert_eq!(gen.normal_value("x", DataType::Int, &defines()), "100");
        assert_eq!(
            gen.normal_value("count", DataType::UInt, &defines()),
            "1234567890"
        );
        assert_eq!(gen.normal_value("flag", DataType::Boolean, &defines()), "1");
    }

    #[test]
    fn define_context_overrides_the_table() {
        let mut gen = ValueGenerator::new(0);
        assert_eq!(gen.normal_value("MAX_REG", DataType::UInt, &defines()), "31");
    }

    #[test]
    fn uint32_boundary_is_min_or_max_for_any_seed() {
        for seed in 0..64 {
            let mut gen = ValueGenerator::new(seed);
            let picked = gen.boundary_value(DataType::UInt, false);
            assert!(
                picked == "0" || picked == "4294967295",
                "unexpected boundary {picked}"
            );
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_picks() {
        let picks = |seed| {
            let mut gen = ValueGenerator::new(seed);
            (0..16)
                .map(|_| gen.boundary_value(DataType::Int, false))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(7), picks(7));
    }

    #[test]
    fn pointers_get_the_null_sentinel() {
        let mut gen = ValueGenerator::new(0);
        assert_eq!(gen.boundary_value(DataType::UInt, true), NULL_SENTINEL);
        assert_eq!(gen.error_value(DataType::UInt, true), NULL_SENTINEL);
    }

    #[test]
    fn pointer_expansion_shapes_per_scenario() {
        let gen = ValueGenerator::new(0);

        let normal = gen.pointer_value("buf", ScenarioKind::Normal);
        assert_eq!(normal.len(), 3);
        assert_eq!(normal[0].0, "buf");
        assert_eq!(normal[0].1.as_literal(), Some("target_buf"));
        assert_eq!(normal[1].0, "&target_buf");

        let error = gen.pointer_value("buf", ScenarioKind::Error);
        assert_eq!(error.len(), 1);
        assert_eq!(error[0].1.as_literal(), Some(NULL_SENTINEL));

        let boundary = gen.pointer_value("buf", ScenarioKind::Boundary);
        match &boundary[1].1 {
            Value::Nested(fields) => {
                assert_eq!(fields[1], ("Length".to_string(), Value::literal("0")));
            }
            other => panic!("expected nested value, got {other:?}"),
        }
    }

    #[test]
    fn constrained_value_stays_in_range() {
        let mut gen = ValueGenerator::new(42);
        for _ in 0..32 {
            let v: i64 = gen
                .constrained_value(Constraint { min: 10, max: 20 })
                .parse()
                .unwrap();
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn array_placeholders_follow_scenario_kind() {
        let gen = ValueGenerator::new(0);
        assert_eq!(gen.array_value("buf", ScenarioKind::Normal), "target_buf_array");
        assert_eq!(gen.array_value("buf", ScenarioKind::Error), NULL_SENTINEL);
        assert_eq!(
            gen.array_value("buf", ScenarioKind::Boundary),
            "target_buf_boundary"
        );
    }
}

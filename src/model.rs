//! model.rs
//!
//! Shared data model for the generation pipeline.
//!
//! One generation run owns one `Function` plus everything derived from it;
//! nothing here is persisted across runs.

use std::fmt;

/* ---------- C data types ---------- */

/// Semantic category of a C type, as recovered from source text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DataType {
    Void,
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Pointer,
    Array,
    Struct,
    Enum,
    Boolean,
}

impl DataType {
    /// Map raw C type text to a category. Unknown types default to `Int`,
    /// which is the safest guess for embedded integer typedefs.
    pub fn from_c_type(text: &str) -> DataType {
        let cleaned = text
            .replace("const", "")
            .replace("static", "")
            .replace('*', "");
        let cleaned = cleaned.trim().to_ascii_lowercase();

        match cleaned.as_str() {
            "void" => DataType::Void,
            "char" => DataType::Char,
            "unsigned char" | "uint8" | "uint8_t" => DataType::UChar,
            "short" => DataType::Short,
            "unsigned short" | "uint16" | "uint16_t" => DataType::UShort,
            "int" | "std_returntype" => DataType::Int,
            "unsigned int" | "uint32" | "uint32_t" => DataType::UInt,
            "long" => DataType::Long,
            "unsigned long" => DataType::ULong,
            "float" => DataType::Float,
            "double" => DataType::Double,
            "boolean" | "bool" => DataType::Boolean,
            _ => DataType::Int,
        }
    }

    /// Integer-like categories get per-parameter boundary scenarios.
    pub fn is_integer_like(self) -> bool {
        matches!(
            self,
            DataType::Char
                | DataType::UChar
                | DataType::Short
                | DataType::UShort
                | DataType::Int
                | DataType::UInt
                | DataType::Long
                | DataType::ULong
                | DataType::Boolean
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Void => "void",
            DataType::Char => "char",
            DataType::UChar => "unsigned char",
            DataType::Short => "short",
            DataType::UShort => "unsigned short",
            DataType::Int => "int",
            DataType::UInt => "unsigned int",
            DataType::Long => "long",
            DataType::ULong => "unsigned long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Pointer => "pointer",
            DataType::Array => "array",
            DataType::Struct => "struct",
            DataType::Enum => "enum",
            DataType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ---------- parameters ---------- */

/// Inclusive value bounds a caller may attach to a parameter.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Constraint {
    pub min: i64,
    pub max: i64,
}

/// A single function parameter. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
    pub is_pointer: bool,
    pub is_const: bool,
    pub array_size: Option<usize>,
    pub constraint: Option<Constraint>,
}

/* ---------- functions ---------- */

/// A parsed top-level function definition.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub return_type: DataType,
    pub parameters: Vec<Parameter>,
    pub is_static: bool,
    /// Body text between the outer braces, exclusive of the closing `}`.
    pub body: String,
    pub line_start: usize,
    pub line_end: usize,
}

/* ---------- preprocessor constants ---------- */

/// Value of a `#define` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum DefineValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for DefineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefineValue::Int(v) => write!(f, "{v}"),
            DefineValue::Text(s) => f.write_str(s),
        }
    }
}

/* ---------- scenarios ---------- */

/// Abstract test intent, prior to concrete value assignment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScenarioKind {
    Normal,
    Boundary,
    Error,
    Exception,
    Performance,
}

impl ScenarioKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Normal => "normal",
            ScenarioKind::Boundary => "boundary",
            ScenarioKind::Error => "error",
            ScenarioKind::Exception => "exception",
            ScenarioKind::Performance => "performance",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned test, ordered by emission and ranked by priority
/// (lower runs first; used by the truncation policy).
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub kind: ScenarioKind,
    pub priority: u8,
    pub target_parameter: Option<String>,
    pub target_branch: Option<usize>,
    pub target_return: Option<usize>,
}

/* ---------- concrete values ---------- */

/// A generated input or output value.
///
/// Pointer parameters expand into `Nested` entries, rendered as
/// `&target { field = value ... }` in the Tessy syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal(String),
    Nested(Vec<(String, Value)>),
}

impl Value {
    pub fn literal(text: impl Into<String>) -> Value {
        Value::Literal(text.into())
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Value::Literal(s) => Some(s),
            Value::Nested(_) => None,
        }
    }
}

/* ---------- test cases ---------- */

/// A fully materialized test case. Ids are dense and 1-based per suite.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub id: usize,
    pub name: String,
    pub description: String,
    pub kind: ScenarioKind,
    pub inputs: Vec<(String, Value)>,
    pub expected_outputs: Vec<(String, Value)>,
    pub stub_functions: Vec<(String, String)>,
    pub preconditions: Vec<String>,
    pub postconditions: Vec<String>,
}

/* ---------- suites ---------- */

#[derive(Debug, Clone)]
pub struct SuiteMetadata {
    pub source_path: String,
    pub generated_at: String,
    pub complexity: usize,
    pub scenario_count: usize,
}

#[derive(Debug, Clone)]
pub struct TestSuite {
    pub function_name: String,
    pub test_cases: Vec<TestCase>,
    pub coverage_target: f64,
    pub metadata: SuiteMetadata,
}

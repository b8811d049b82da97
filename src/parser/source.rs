//! parser/source.rs
//!
//! Whole-file view of a C source: decoded text, extracted functions,
//! `#define` constants and `#include` directives.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{GenError, Result};
use crate::model::{DefineValue, Function};
use crate::parser::{FunctionExtractor, RegexExtractor};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Option<PathBuf>,
    pub content: String,
    pub functions: Vec<Function>,
    pub defines: BTreeMap<String, DefineValue>,
    pub includes: Vec<String>,
}

impl SourceFile {
    /// Read and parse a file. UTF-8 first, GBK as the fallback for legacy
    /// vendor sources; both failing is a decode error, a missing path is
    /// `SourceNotFound`.
    pub fn read(path: &Path) -> Result<SourceFile> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GenError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => GenError::Io(e),
        })?;

        let content = decode(&bytes).ok_or_else(|| GenError::SourceDecode {
            path: path.to_path_buf(),
        })?;

        let mut parsed = SourceFile::from_source(&content);
        parsed.path = Some(path.to_path_buf());
        Ok(parsed)
    }

    /// Parse an in-memory source string.
    pub fn from_source(content: &str) -> SourceFile {
        let functions = RegexExtractor::default().extract_functions(content);
        debug!(functions = functions.len(), "parsed source");

        SourceFile {
            path: None,
            content: content.to_string(),
            functions,
            defines: extract_defines(content),
            includes: extract_includes(content),
        }
    }

    /// Look up one function by name.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| GenError::FunctionNotFound {
                name: name.to_string(),
            })
    }

    pub fn path_display(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<memory>".to_string(),
        }
    }
}

/* ============================================================
   Decoding
   ============================================================ */

fn decode(bytes: &[u8]) -> Option<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    let (text, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

/* ============================================================
   Preprocessor directives
   ============================================================ */

fn define_pattern() -> Regex {
    Regex::new(r"#define\s+(\w+)\s+(.+)").unwrap()
}

fn include_pattern() -> Regex {
    Regex::new(r#"#include\s*[<"]([^>"]+)[>"]"#).unwrap()
}

fn extract_defines(content: &str) -> BTreeMap<String, DefineValue> {
    let pattern = define_pattern();
    let mut out = BTreeMap::new();

    for line in content.lines() {
        if let Some(caps) = pattern.captures(line) {
            let name = caps[1].to_string();
            let value = parse_define_value(&caps[2]);
            out.insert(name, value);
        }
    }

    out
}

fn extract_includes(content: &str) -> Vec<String> {
    include_pattern()
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Hex (`0x...`) and decimal values become integers; an `UL`/`ul` suffix is
/// stripped before conversion; anything else is kept as literal text with a
/// trailing line comment removed.
fn parse_define_value(raw: &str) -> DefineValue {
    let mut text = raw.trim();
    if let Some((head, _)) = text.split_once("//") {
        text = head.trim();
    }

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        if let Ok(v) = i64::from_str_radix(hex, 16) {
            return DefineValue::Int(v);
        }
    }

    if text.bytes().all(|b| b.is_ascii_digit()) && !text.is_empty() {
        if let Ok(v) = text.parse::<i64>() {
            return DefineValue::Int(v);
        }
    }

    let unsuffixed = text
        .strip_suffix("UL")
        .or_else(|| text.strip_suffix("ul"));
    if let Some(num) = unsuffixed {
        if let Ok(v) = num.parse::<i64>() {
            return DefineValue::Int(v);
        }
    }

    DefineValue::Text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
#include <stdint.h>
#include "cpu_regs.h"

#define MAX_REG 0x1F
#define TIMEOUT_MS 500
#define LONG_VAL 1000UL
#define VERSION_TAG v2_rc1 // release tag

int Cpu_Check(uint32 reg) {
    if (reg > MAX_REG) {
        return 1;
    }
    return 0;
}
"#;

    #[test]
    fn extracts_defines_with_value_interpretation() {
        let src = SourceFile::from_source(SOURCE);

        assert_eq!(src.defines.get("MAX_REG"), Some(&DefineValue::Int(0x1F)));
        assert_eq!(src.defines.get("TIMEOUT_MS"), Some(&DefineValue::Int(500)));
        assert_eq!(src.defines.get("LONG_VAL"), Some(&DefineValue::Int(1000)));
        assert_eq!(
            src.defines.get("VERSION_TAG"),
            Some(&DefineValue::Text("v2_rc1".into()))
        );
    }

    #[test]
    fn extracts_includes_in_order() {
        let src = SourceFile::from_source(SOURCE);
        assert_eq!(src.includes, ["stdint.h", "cpu_regs.h"]);
    }

    #[test]
    fn function_lookup_reports_missing_name() {
        let src = SourceFile::from_source(SOURCE);
        assert!(src.function("Cpu_Check").is_ok());

        let err = src.function("g").unwrap_err();
        assert!(matches!(err, GenError::FunctionNotFound { ref name } if name == "g"));
        assert!(err.to_string().contains('g'));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = SourceFile::read(Path::new("/definitely/not/here.c")).unwrap_err();
        assert!(matches!(err, GenError::SourceNotFound { .. }));
    }

    #[test]
    fn gbk_bytes_decode_through_fallback() {
        // "测试" encoded as GBK, invalid as UTF-8.
        let bytes = [0xb2u8, 0xe2, 0xca, 0xd4];
        assert!(std::str::from_utf8(&bytes).is_err());
        assert_eq!(decode(&bytes).as_deref(), Some("测试"));
    }

    #[test]
    fn in_memory_source_has_no_path() {
        let src = SourceFile::from_source("int f(void) { return 0; }");
        assert_eq!(src.path_display(), "<memory>");
        assert_eq!(src.functions.len(), 1);
    }
}

//! @ai:module:intent Benchmark target, parameter and binary descriptors
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkDescriptor, TargetDescriptor, TypeDescriptor, BinaryDescriptor, ParameterDescriptor, ParameterValue
//! @ai:module:stateless true

use crate::descriptor::RunConfiguration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent A binary that owns a type: logical name, file name and where it actually lives
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryDescriptor {
    /// Logical name used in the build reference (e.g. "MyBenchmarks")
    pub name: String,
    /// File name the generated build expects next to the project (e.g. "MyBenchmarks.dll")
    pub file_name: String,
    /// Resolved location of the binary on disk
    pub location: PathBuf,
}

impl BinaryDescriptor {
    /// @ai:intent Whether this binary is the platform's always-present standard library
    /// @ai:effects pure
    pub fn is_base_runtime(&self, base_runtime_file: &str) -> bool {
        self.file_name.eq_ignore_ascii_case(base_runtime_file)
    }
}

/// @ai:intent Opaque type identity as decided at discovery time
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    pub binary: BinaryDescriptor,
}

impl TypeDescriptor {
    /// @ai:intent Namespace-qualified type name
    /// @ai:effects pure
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// @ai:intent Whether this is the void type
    /// @ai:effects pure
    pub fn is_void(&self) -> bool {
        self.name == "Void" || self.name == "void"
    }
}

/// @ai:intent The callable unit being benchmarked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub owner: TypeDescriptor,
    pub method: String,
    pub return_type: TypeDescriptor,
    #[serde(default = "default_operations_per_invoke")]
    pub operations_per_invoke: u64,
    #[serde(default)]
    pub setup_method: Option<String>,
    /// Source snippet pasted verbatim into the generated program
    #[serde(default)]
    pub additional_logic: String,
}

fn default_operations_per_invoke() -> u64 {
    1
}

/// @ai:intent Value assigned to a benchmark parameter before the run
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Anything else the descriptor carried; rendered via its default text form
    Other(serde_json::Value),
}

impl ParameterValue {
    /// @ai:intent Render the value as a source literal
    /// @ai:effects pure
    pub fn to_source_literal(&self) -> String {
        match self {
            ParameterValue::Bool(b) => b.to_string(),
            ParameterValue::Integer(i) => i.to_string(),
            ParameterValue::Float(f) => f.to_string(),
            ParameterValue::Text(s) => format!("\"{}\"", escape_string(s)),
            ParameterValue::Other(v) => v.to_string(),
        }
    }
}

/// @ai:intent Escape text for a regular (non-verbatim) string literal
/// @ai:post result contains no raw control characters
/// @ai:effects pure
fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                escaped.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// @ai:intent A named parameter set on the benchmark instance or type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub value: ParameterValue,
    #[serde(default)]
    pub is_static: bool,
}

/// @ai:intent Immutable description of one benchmark to generate a harness for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDescriptor {
    /// Short id; also the name of the generated directory
    pub identifier: String,
    pub target: TargetDescriptor,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub run: RunConfiguration,
}

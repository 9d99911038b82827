//! @ai:module:intent Render the harness entry-point source file
//! @ai:module:layer domain
//! @ai:module:public_api EntryPointGenerator
//! @ai:module:stateless true

use crate::descriptor::{BenchmarkDescriptor, ParameterDescriptor, TypeDescriptor};
use crate::generator::{Artifact, ArtifactGenerator};
use crate::template::{TemplateContext, TemplateEngine, TemplateName};

pub const ENTRY_POINT_FILE: &str = "Program.cs";

const STATEMENT_INDENT: &str = "\n            ";

/// @ai:intent Source fragments that depend on whether the target returns a value
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReturnShape {
    idle_return_type: String,
    delegate_type: String,
    result_holder_field: String,
    idle_implementation: String,
    hold_statement: String,
}

impl ReturnShape {
    /// @ai:intent Derive delegate, idle and result-holding fragments from the return type
    /// @ai:effects pure
    fn of(return_type: &TypeDescriptor) -> Self {
        if return_type.is_void() {
            return Self {
                idle_return_type: "void".to_string(),
                delegate_type: "Action".to_string(),
                result_holder_field: String::new(),
                idle_implementation: "private void Idle() { }".to_string(),
                hold_statement: "targetDelegate();".to_string(),
            };
        }

        let type_name = return_type.full_name();
        Self {
            idle_return_type: type_name.clone(),
            delegate_type: format!("Func<{}>", type_name),
            result_holder_field: format!("        private {} resultHolder;", type_name),
            idle_implementation: format!(
                "private {0} Idle() {{ return default({0}); }}",
                type_name
            ),
            hold_statement: "resultHolder = targetDelegate();".to_string(),
        }
    }
}

/// @ai:intent Generates Program.cs
pub struct EntryPointGenerator {
    engine: TemplateEngine,
}

impl EntryPointGenerator {
    /// @ai:intent Create a new entry-point generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }

    /// @ai:intent Source statement assigning one parameter before the run
    /// @ai:effects pure
    pub fn parameter_assignment(owner: &TypeDescriptor, parameter: &ParameterDescriptor) -> String {
        let receiver = if parameter.is_static {
            owner.full_name()
        } else {
            "instance".to_string()
        };
        format!(
            "{}.{} = {};",
            receiver,
            parameter.name,
            parameter.value.to_source_literal()
        )
    }

    /// @ai:intent using-directives for namespaces the template does not already import
    /// @ai:effects pure
    fn namespace_imports(descriptor: &BenchmarkDescriptor) -> String {
        let mut namespaces: Vec<&str> = Vec::new();
        for ns in [
            descriptor.target.owner.namespace.as_str(),
            descriptor.target.return_type.namespace.as_str(),
        ] {
            if !ns.is_empty() && ns != "System" && !namespaces.contains(&ns) {
                namespaces.push(ns);
            }
        }
        namespaces
            .iter()
            .map(|ns| format!("using {};", ns))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// @ai:intent Build the substitution context for Program.cs
    /// @ai:effects pure
    pub fn context(&self, descriptor: &BenchmarkDescriptor) -> TemplateContext {
        let target = &descriptor.target;
        let shape = ReturnShape::of(&target.return_type);

        let assignments = descriptor
            .parameters
            .iter()
            .map(|p| Self::parameter_assignment(&target.owner, p))
            .collect::<Vec<_>>()
            .join(STATEMENT_INDENT);

        let setup_call = target
            .setup_method
            .as_ref()
            .map(|m| format!("instance.{}();", m))
            .unwrap_or_default();

        TemplateContext::new()
            .with("NAMESPACE_IMPORTS", Self::namespace_imports(descriptor))
            .with("TARGET_TYPE_NAME", target.owner.full_name())
            .with("TARGET_METHOD_NAME", target.method.as_str())
            .with("RUN_ARGUMENTS", descriptor.run.encode())
            .with("OPERATIONS_PER_INVOKE", target.operations_per_invoke.to_string())
            .with("PARAMETER_ASSIGNMENTS", assignments)
            .with("SETUP_METHOD_CALL", setup_call)
            .with("IDLE_RETURN_TYPE", shape.idle_return_type)
            .with("TARGET_DELEGATE_TYPE", shape.delegate_type)
            .with("RESULT_HOLDER_FIELD", shape.result_holder_field)
            .with("IDLE_IMPLEMENTATION", shape.idle_implementation)
            .with("TARGET_HOLD_STATEMENT", shape.hold_statement)
            .with("ADDITIONAL_LOGIC", target.additional_logic.as_str())
    }
}

impl Default for EntryPointGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactGenerator for EntryPointGenerator {
    fn file_name(&self) -> &'static str {
        ENTRY_POINT_FILE
    }

    fn render(&self, descriptor: &BenchmarkDescriptor) -> Artifact {
        let content = self
            .engine
            .render(TemplateName::EntryPoint, &self.context(descriptor));
        Artifact::new(ENTRY_POINT_FILE, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParameterValue;
    use crate::generator::test_support::{descriptor, returning};
    use crate::template::unresolved_placeholders;

    #[test]
    fn test_void_target_uses_action_and_no_result_holder() {
        let artifact = EntryPointGenerator::new().render(&descriptor("MyBench"));

        assert_eq!(artifact.file_name, "Program.cs");
        assert!(artifact.content.contains("private Action targetDelegate;"));
        assert!(artifact.content.contains("private void Idle() { }"));
        assert!(artifact.content.contains("private delegate void IdleDelegate();"));
        assert!(!artifact.content.contains("resultHolder"));
        assert!(unresolved_placeholders(&artifact.content).is_empty());
    }

    #[test]
    fn test_value_target_holds_result() {
        let mut d = descriptor("IntBench");
        d.target.return_type = returning("Int32", "System");

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("private Func<System.Int32> targetDelegate;"));
        assert!(content.contains("private System.Int32 resultHolder;"));
        assert!(content.contains("resultHolder = targetDelegate();"));
        assert!(content.contains("return default(System.Int32);"));
    }

    #[test]
    fn test_parameter_assignments() {
        let mut d = descriptor("Params");
        d.parameters = vec![
            ParameterDescriptor {
                name: "Enabled".to_string(),
                value: ParameterValue::Bool(true),
                is_static: false,
            },
            ParameterDescriptor {
                name: "Label".to_string(),
                value: ParameterValue::Text("abc".to_string()),
                is_static: true,
            },
            ParameterDescriptor {
                name: "Size".to_string(),
                value: ParameterValue::Integer(42),
                is_static: false,
            },
        ];

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("instance.Enabled = true;"));
        assert!(content.contains("Samples.StringBenchmarks.Label = \"abc\";"));
        assert!(content.contains("instance.Size = 42;"));
    }

    #[test]
    fn test_setup_call_and_run_arguments() {
        let mut d = descriptor("Setup");
        d.target.setup_method = Some("GlobalSetup".to_string());
        d.target.operations_per_invoke = 16;

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("instance.GlobalSetup();"));
        assert!(content.contains("OperationsPerInvoke = 16;"));
        assert!(content.contains(&format!("RunArguments = \"{}\"", d.run.encode())));
    }

    #[test]
    fn test_additional_logic_is_not_expanded() {
        let mut d = descriptor("Logic");
        d.target.additional_logic = "// keeps {{TARGET_METHOD_NAME}} verbatim".to_string();

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("// keeps {{TARGET_METHOD_NAME}} verbatim"));
    }

    #[test]
    fn test_markers_in_parameter_values_are_not_expanded() {
        let mut d = descriptor("Markers");
        d.target.additional_logic = "INJECTED_CODE();".to_string();
        d.parameters = vec![ParameterDescriptor {
            name: "A".to_string(),
            value: ParameterValue::Text("{{ADDITIONAL_LOGIC}}".to_string()),
            is_static: false,
        }];

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("instance.A = \"{{ADDITIONAL_LOGIC}}\";"));
        assert_eq!(content.matches("INJECTED_CODE();").count(), 1);
    }

    #[test]
    fn test_multiline_string_parameter_stays_on_one_line() {
        let mut d = descriptor("Multiline");
        d.parameters = vec![ParameterDescriptor {
            name: "B".to_string(),
            value: ParameterValue::Text("line1\nline2".to_string()),
            is_static: false,
        }];

        let content = EntryPointGenerator::new().render(&d).content;
        assert!(content.contains("instance.B = \"line1\\nline2\";"));
    }

    #[test]
    fn test_namespace_imports_skip_system_and_duplicates() {
        let mut d = descriptor("Imports");
        d.target.return_type = returning("Result", "Samples");

        let imports = EntryPointGenerator::namespace_imports(&d);
        assert_eq!(imports, "using Samples;");
    }
}

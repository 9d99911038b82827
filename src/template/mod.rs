//! @ai:module:intent Bundled templates and literal placeholder substitution
//! @ai:module:layer domain
//! @ai:module:public_api TemplateName, TemplateContext, TemplateEngine, unresolved_placeholders
//! @ai:module:stateless true

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// @ai:intent Names of the templates bundled with the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    EntryPoint,
    BuildDescriptor,
    BuildReference,
    BuildScript,
    RuntimeConfig,
    RuntimeConfigEmpty,
}

impl TemplateName {
    /// @ai:intent All bundled templates
    /// @ai:effects pure
    pub fn all() -> [TemplateName; 6] {
        [
            TemplateName::EntryPoint,
            TemplateName::BuildDescriptor,
            TemplateName::BuildReference,
            TemplateName::BuildScript,
            TemplateName::RuntimeConfig,
            TemplateName::RuntimeConfigEmpty,
        ]
    }

    /// @ai:intent Resource name of the template
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::EntryPoint => "Program.cs.txt",
            TemplateName::BuildDescriptor => "Program.csproj.txt",
            TemplateName::BuildReference => "Reference.xml.txt",
            TemplateName::BuildScript => "BuildBenchmark.bat.txt",
            TemplateName::RuntimeConfig => "app.config.txt",
            TemplateName::RuntimeConfigEmpty => "app.config.empty.txt",
        }
    }

    /// @ai:intent Raw template text with placeholder markers
    /// @ai:effects pure
    pub fn source(&self) -> &'static str {
        match self {
            TemplateName::EntryPoint => include_str!("../../templates/Program.cs.txt"),
            TemplateName::BuildDescriptor => include_str!("../../templates/Program.csproj.txt"),
            TemplateName::BuildReference => include_str!("../../templates/Reference.xml.txt"),
            TemplateName::BuildScript => include_str!("../../templates/BuildBenchmark.bat.txt"),
            TemplateName::RuntimeConfig => include_str!("../../templates/app.config.txt"),
            TemplateName::RuntimeConfigEmpty => {
                include_str!("../../templates/app.config.empty.txt")
            }
        }
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Ordered placeholder -> value mapping for one render
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    entries: Vec<(String, String)>,
}

impl TemplateContext {
    /// @ai:intent Create an empty context
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Add a substitution
    /// @ai:effects pure
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// @ai:intent Add or replace a substitution in place
    /// @ai:effects state:write
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// @ai:intent Look up a substitution value
    /// @ai:effects pure
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// @ai:intent Renders bundled templates
pub struct TemplateEngine;

impl TemplateEngine {
    /// @ai:intent Create a new template engine
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render a bundled template, replacing every occurrence of each mapped marker
    /// @ai:effects pure
    pub fn render(&self, name: TemplateName, context: &TemplateContext) -> String {
        Self::render_text(name.source(), context)
    }

    /// @ai:intent Apply a context to arbitrary template text in a single pass
    /// @ai:post substituted values are never scanned for markers; unmapped markers are kept
    /// @ai:effects pure
    pub fn render_text(template: &str, context: &TemplateContext) -> String {
        placeholder_pattern()
            .replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("placeholder pattern is valid")
    })
}

/// @ai:intent List distinct placeholder names still present in rendered text, in order of appearance
/// @ai:effects pure
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in placeholder_pattern().captures_iter(text) {
        let name = cap[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

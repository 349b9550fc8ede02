//! Function declarations for LLM function calling.
//!
//! Tools here are described, never executed: the model may ask for one, and
//! the request is relayed to the caller that owns the data.
//!
//! - [`ToolDeclaration`] — A named operation with a typed parameter list
//! - [`ParamSpec`] and [`ParamType`] — Parameter descriptions
//! - [`ToolCatalog`] — Ordered, validated set of declarations
//! - [`financial_catalog`] — The built-in personal-finance catalog
//!
//! # Declaring a Tool
//!
//! ```rust
//! use trackr_tools::{ParamSpec, ToolCatalog, ToolDeclaration};
//!
//! let catalog = ToolCatalog::new(vec![
//!     ToolDeclaration::new("archiveCard", "Archives one of the user's cards")
//!         .param(ParamSpec::string("cardId").describe("Card identifier").required()),
//! ])
//! .unwrap();
//!
//! let schema = &catalog.schemas()[0];
//! assert_eq!(schema.parameters["required"][0], "cardId");
//! ```

mod financial;

pub use financial::financial_catalog;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

pub use trackr_core::{ToolCall, ToolSchema};

/// Errors raised while validating declarations.
#[derive(Error, Debug, PartialEq)]
pub enum ToolError {
    /// A declaration is malformed.
    #[error("Invalid tool declaration '{tool}': {message}")]
    InvalidDeclaration { tool: String, message: String },
}

impl ToolError {
    fn invalid(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidDeclaration { tool: tool.to_string(), message: message.into() }
    }
}

/// Value type of a tool parameter, named the way Gemini's schema expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParamType {
    String,
    Number,
    Integer,
}

/// A single parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub description: Option<String>,
    pub allowed: Option<Vec<String>>,
    pub required: bool,
}

impl ParamSpec {
    /// Creates an optional parameter of the given type.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            allowed: None,
            required: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Number)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Integer)
    }

    /// Creates a string parameter restricted to the given values.
    pub fn one_of(name: impl Into<String>, values: &[&str]) -> Self {
        let mut spec = Self::string(name);
        spec.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        spec
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the parameter as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.param_type));
        if let Some(description) = &self.description {
            schema.insert("description".into(), json!(description));
        }
        if let Some(values) = &self.allowed {
            schema.insert("format".into(), json!("enum"));
            schema.insert("enum".into(), json!(values));
        }
        Value::Object(schema)
    }
}

/// A named, schema-described operation the model may request.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDeclaration {
    /// Creates a declaration with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Names of the mandatory parameters, in declaration order.
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Checks the declaration for structural problems.
    pub fn validate(&self) -> Result<(), ToolError> {
        if !is_identifier(&self.name) {
            return Err(ToolError::invalid(&self.name, "name must be a non-empty identifier"));
        }
        if self.description.trim().is_empty() {
            return Err(ToolError::invalid(&self.name, "description is empty"));
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if param.name.trim().is_empty() {
                return Err(ToolError::invalid(&self.name, "parameter with empty name"));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ToolError::invalid(
                    &self.name,
                    format!("duplicate parameter '{}'", param.name),
                ));
            }
            if let Some(values) = &param.allowed {
                if param.param_type != ParamType::String {
                    return Err(ToolError::invalid(
                        &self.name,
                        format!("enum on non-string parameter '{}'", param.name),
                    ));
                }
                if values.is_empty() {
                    return Err(ToolError::invalid(
                        &self.name,
                        format!("empty enum on parameter '{}'", param.name),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Renders the declaration as a function schema.
    pub fn schema(&self) -> ToolSchema {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();

        let mut parameters = Map::new();
        parameters.insert("type".into(), json!("OBJECT"));
        parameters.insert("properties".into(), Value::Object(properties));
        let required = self.required_params();
        if !required.is_empty() {
            parameters.insert("required".into(), json!(required));
        }

        ToolSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: Value::Object(parameters),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered set of validated declarations.
///
/// Construction fails if any declaration is malformed or two share a name,
/// so a catalog in hand is always safe to send.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDeclaration>,
}

impl ToolCatalog {
    /// Validates and wraps the given declarations.
    pub fn new(tools: Vec<ToolDeclaration>) -> Result<Self, ToolError> {
        let mut names = HashSet::new();
        for tool in &tools {
            tool.validate()?;
            if !names.insert(tool.name.as_str()) {
                return Err(ToolError::invalid(&tool.name, "duplicate tool name"));
            }
        }
        Ok(Self { tools })
    }

    /// Gets a declaration by name.
    pub fn get(&self, name: &str) -> Option<&ToolDeclaration> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Returns true if a tool with the given name is declared.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the names of all declared tools, in order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Renders every declaration, in order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(ToolDeclaration::schema).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

//! The generator payload: final normalization and serialization.
//!
//! The payload build is reachable directly from form submission,
//! bypassing the wizard, so it re-applies its own normalization
//! independently of the mutation-time invariants: names re-cased,
//! a missing identifier force-promoted, CLASS-only flags zeroed on
//! non-CLASS nodes, relationship targets re-resolved. Anything that
//! cannot be repaired without inventing data fails the whole build
//! with a user-facing message and produces no payload.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::error::ApplicationError;
use crate::domain::naming::{to_camel_case, to_pascal_case, to_snake_case};
use crate::domain::{ClassNode, Diagram, Field, FieldType, Method, RelationshipType, StructureType};

/// Fallback module name when no artifact id is available.
const DEFAULT_MODULE: &str = "crud-module";
/// Fallback base package when the typed package name is unusable.
const DEFAULT_PACKAGE: &str = "com.example.demo";

// ── Wire types ────────────────────────────────────────────────────────────────

/// The JSON document handed to the external code-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPayload {
    pub module_name: String,
    pub base_package: String,
    pub classes: Vec<ClassPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub name: String,
    pub table_name: String,
    pub structure_type: StructureType,
    pub fields: Vec<FieldPayload>,
    pub methods: Vec<MethodPayload>,
    pub enum_constants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub identifier: bool,
    pub required: bool,
    pub unique: bool,
    pub object_type: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<RelationshipType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodPayload {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterPayload>,
    pub abstract_method: bool,
    pub default_implementation: bool,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builds [`GenerationPayload`]s for one generator submission.
///
/// Carries the module/package identity derived from the surrounding
/// form; the diagram itself is passed per call.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadBuilder {
    module_name: String,
    base_package: String,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::from_form(None, None)
    }
}

impl PayloadBuilder {
    /// Derive module and package identity from the form inputs.
    ///
    /// `artifact_id` becomes `<artifactId>-crud` after sanitization;
    /// the package name keeps only valid dotted segments. Both fall
    /// back to fixed defaults rather than failing.
    pub fn from_form(artifact_id: Option<&str>, package_name: Option<&str>) -> Self {
        let module_name = artifact_id
            .map(sanitize_module_name)
            .filter(|m| !m.is_empty())
            .map(|m| format!("{m}-crud"))
            .unwrap_or_else(|| DEFAULT_MODULE.to_string());

        let base_package = package_name
            .and_then(sanitize_package_name)
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string());

        Self {
            module_name,
            base_package,
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    /// Build the payload for a non-empty diagram.
    #[instrument(skip_all, fields(classes = diagram.len()))]
    pub fn build(&self, diagram: &Diagram) -> Result<GenerationPayload, ApplicationError> {
        if diagram.is_empty() {
            return Err(ApplicationError::PayloadRejected {
                reason: "the diagram has no structures".into(),
            });
        }

        let mut classes = Vec::with_capacity(diagram.len());
        for node in diagram.nodes() {
            classes.push(self.build_class(diagram, node)?);
        }

        debug!(module = %self.module_name, "payload built");
        Ok(GenerationPayload {
            module_name: self.module_name.clone(),
            base_package: self.base_package.clone(),
            classes,
        })
    }

    /// The hidden-form-field contract: `None` for an empty model
    /// (signals "no custom structures requested"), otherwise the
    /// serialized payload JSON.
    pub fn form_value(&self, diagram: &Diagram) -> Result<Option<String>, ApplicationError> {
        if diagram.is_empty() {
            return Ok(None);
        }
        let payload = self.build(diagram)?;
        let json =
            serde_json::to_string(&payload).map_err(|e| ApplicationError::Serialization {
                reason: e.to_string(),
            })?;
        Ok(Some(json))
    }

    fn build_class(
        &self,
        diagram: &Diagram,
        node: &ClassNode,
    ) -> Result<ClassPayload, ApplicationError> {
        let name = to_pascal_case(&node.name);
        if name.is_empty() {
            return Err(ApplicationError::PayloadRejected {
                reason: format!("class '{}' has no usable name", node.name),
            });
        }

        let is_class = node.structure_type.is_class();
        let is_interface = node.structure_type.is_interface();

        let table_name = if is_class {
            let trimmed = node.table_name.trim();
            if trimmed.is_empty() {
                to_snake_case(&name)
            } else {
                trimmed.to_string()
            }
        } else {
            String::new()
        };

        let mut fields = Vec::new();
        for field in &node.fields {
            if let Some(emitted) = self.build_field(diagram, &name, field, is_class)? {
                fields.push(emitted);
            }
        }

        if is_class {
            if fields.is_empty() {
                return Err(ApplicationError::PayloadRejected {
                    reason: format!("class '{name}' needs at least one usable field"),
                });
            }
            if !fields.iter().any(|f| f.identifier) {
                fields[0].identifier = true;
            }
        }

        let methods = node
            .methods
            .iter()
            .filter_map(|m| build_method(m, is_interface))
            .collect();

        let enum_constants = if node.structure_type.has_constants() {
            node.enum_constants.clone()
        } else {
            Vec::new()
        };

        Ok(ClassPayload {
            name,
            table_name,
            structure_type: node.structure_type,
            fields,
            methods,
            enum_constants,
        })
    }

    /// Emit one field, or `None` when its name normalizes to nothing.
    fn build_field(
        &self,
        diagram: &Diagram,
        class_name: &str,
        field: &Field,
        is_class: bool,
    ) -> Result<Option<FieldPayload>, ApplicationError> {
        let name = to_camel_case(&field.name);
        if name.is_empty() {
            return Ok(None);
        }

        if field.object_type && is_class {
            let target = field
                .target_class
                .and_then(|id| diagram.find(id))
                .filter(|t| t.structure_type.is_class())
                .ok_or_else(|| ApplicationError::PayloadRejected {
                    reason: format!(
                        "relationship field '{class_name}.{name}' does not target an existing class"
                    ),
                })?;
            let kind =
                field
                    .relationship_type
                    .ok_or_else(|| ApplicationError::PayloadRejected {
                        reason: format!(
                            "relationship field '{class_name}.{name}' has no relationship kind"
                        ),
                    })?;

            return Ok(Some(FieldPayload {
                name,
                field_type: FieldType::Object,
                identifier: false,
                required: field.required,
                unique: false,
                object_type: true,
                target_class_name: Some(to_pascal_case(&target.name)),
                relationship_type: Some(kind),
            }));
        }

        // Scalar path. A stale OBJECT type without relationship data
        // degrades to the default scalar; non-CLASS nodes emit neutral
        // CLASS-only flags regardless of what memory still holds.
        let field_type = if field.field_type.is_object() {
            FieldType::String
        } else {
            field.field_type
        };

        Ok(Some(FieldPayload {
            name,
            field_type,
            identifier: is_class && field.identifier,
            required: field.required,
            unique: is_class && field.unique,
            object_type: false,
            target_class_name: None,
            relationship_type: None,
        }))
    }
}

fn build_method(method: &Method, is_interface: bool) -> Option<MethodPayload> {
    let name = to_camel_case(&method.name);
    if name.is_empty() {
        return None;
    }

    let return_type = {
        let trimmed = method.return_type.trim();
        if trimmed.is_empty() {
            "void".to_string()
        } else {
            trimmed.to_string()
        }
    };

    let parameters = method
        .parameters
        .iter()
        .filter_map(|p| {
            let name = to_camel_case(&p.name);
            if name.is_empty() {
                return None;
            }
            let type_name = {
                let trimmed = p.type_name.trim();
                if trimmed.is_empty() {
                    "String".to_string()
                } else {
                    trimmed.to_string()
                }
            };
            Some(ParameterPayload { name, type_name })
        })
        .collect();

    Some(MethodPayload {
        name,
        return_type,
        parameters,
        // abstract is meaningless on an interface, default bodies
        // everywhere else; zero the inapplicable flag.
        abstract_method: method.abstract_method && !is_interface,
        default_implementation: method.default_implementation && is_interface,
        body: method.body.clone(),
    })
}

// ── Sanitizers ────────────────────────────────────────────────────────────────

/// Lowercase; anything outside `[a-z0-9-_]` becomes `-`.
fn sanitize_module_name(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Keep only valid package segments (`[a-z][a-z0-9_]*`); `None` when
/// nothing survives.
fn sanitize_package_name(raw: &str) -> Option<String> {
    let segments: Vec<String> = raw
        .split('.')
        .filter_map(|segment| {
            let cleaned: String = segment
                .trim()
                .to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            let starts_alpha = cleaned.chars().next().is_some_and(|c| c.is_ascii_lowercase());
            if starts_alpha { Some(cleaned) } else { None }
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

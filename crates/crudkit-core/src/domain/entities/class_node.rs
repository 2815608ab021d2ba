//! The `ClassNode` entity: one modeled structure on the canvas.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Field, FieldId, Method, MethodId, NodeId, Position};
use crate::domain::value_objects::StructureType;

/// One class, abstract class, interface, or enum in the diagram.
///
/// Field-level invariants (exactly one identifier on a CLASS, neutral
/// flags elsewhere) are re-established by the mutation operations on
/// [`super::Diagram`]; the helpers here do the per-node part of that
/// work so every call site normalizes the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: NodeId,
    /// Display identifier, PascalCase once validated.
    pub name: String,
    /// Optional override for the generated table name; empty = derive
    /// from the class name. Meaningful for CLASS only.
    pub table_name: String,
    pub structure_type: StructureType,
    pub position: Position,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    /// CONSTANT_CASE constants; meaningful for ENUM only.
    pub enum_constants: Vec<String>,
    /// View-only: a collapsed node renders as header-only.
    pub collapsed: bool,
}

impl ClassNode {
    /// A fresh CLASS node with the default identifier field.
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            table_name: String::new(),
            structure_type: StructureType::Class,
            position,
            fields: vec![Field::default_identifier()],
            methods: Vec::new(),
            enum_constants: Vec::new(),
            collapsed: false,
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.iter().find(|m| m.id == id)
    }

    pub fn method_mut(&mut self, id: MethodId) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.id == id)
    }

    pub fn has_field_named(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The field currently marked as identifier, if any.
    pub fn identifier_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.identifier)
    }

    /// Ensure a CLASS node with fields has an identifier by promoting
    /// the first field when none is marked. No-op otherwise.
    pub fn promote_identifier(&mut self) {
        if !self.structure_type.is_class() {
            return;
        }
        if self.fields.iter().any(|f| f.identifier) {
            return;
        }
        if let Some(first) = self.fields.first_mut() {
            first.identifier = true;
        }
    }

    /// Switch the structure type, normalizing everything that the new
    /// type cannot carry.
    pub fn set_structure_type(&mut self, new_type: StructureType) {
        self.structure_type = new_type;

        if new_type.is_class() {
            self.promote_identifier();
        } else {
            // Table names, identifiers, uniqueness, and relationships
            // are CLASS concepts; leaving CLASS drops them all.
            self.table_name.clear();
            for field in &mut self.fields {
                field.clear_class_markers();
            }
        }

        if !new_type.has_constants() {
            self.enum_constants.clear();
        }
    }
}

//! The `Field` entity: a scalar attribute or a relationship edge.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{FieldId, NodeId};
use crate::domain::value_objects::{FieldType, RelationshipType};

/// One attribute of a class.
///
/// A field is either a scalar (`object_type == false`) or a relationship
/// (`object_type == true`, `field_type == OBJECT`, target and kind set).
/// `identifier`/`unique` carry CLASS-only semantics and are forced off by
/// the owning diagram whenever the class is not a concrete CLASS.
///
/// `target_class` is a weak reference: it may dangle after the target is
/// deleted, until the cascade in `Diagram::remove_class` clears it. Every
/// reader validates it before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
    pub identifier: bool,
    pub required: bool,
    pub unique: bool,
    pub object_type: bool,
    pub target_class: Option<NodeId>,
    pub relationship_type: Option<RelationshipType>,
}

impl Field {
    /// A plain scalar field with neutral flags.
    pub fn scalar(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: FieldId::new(),
            name: name.into(),
            field_type,
            identifier: false,
            required: false,
            unique: false,
            object_type: false,
            target_class: None,
            relationship_type: None,
        }
    }

    /// The default primary-key field every new class starts with.
    pub fn default_identifier() -> Self {
        Self {
            identifier: true,
            required: true,
            unique: true,
            ..Self::scalar("id", FieldType::Long)
        }
    }

    /// A relationship field pointing at `target`.
    pub fn relationship(
        name: impl Into<String>,
        target: NodeId,
        kind: RelationshipType,
    ) -> Self {
        Self {
            field_type: FieldType::Object,
            object_type: true,
            target_class: Some(target),
            relationship_type: Some(kind),
            ..Self::scalar(name, FieldType::Object)
        }
    }

    pub fn is_relationship(&self) -> bool {
        self.object_type
    }

    /// Demote to a plain scalar: drops target and kind, and replaces the
    /// now-meaningless `OBJECT` type with the default scalar.
    pub fn clear_relationship(&mut self) {
        self.object_type = false;
        self.target_class = None;
        self.relationship_type = None;
        if self.field_type.is_object() {
            self.field_type = FieldType::String;
        }
    }

    /// Strip every CLASS-only marker (identifier, unique, relationship
    /// data). Used when the owning class stops being a concrete CLASS.
    pub fn clear_class_markers(&mut self) {
        self.identifier = false;
        self.unique = false;
        self.clear_relationship();
    }
}

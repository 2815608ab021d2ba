//! The `Diagram` aggregate root: every class node plus the selection.
//!
//! # Design
//!
//! All mutations go through the operations below. Each one validates its
//! inputs, performs the in-place change, and re-establishes the model
//! invariants *before* returning — there is no transactional rollback,
//! because a rejected operation never touches the model at all. The UI
//! layer simply re-renders from whatever state is left.
//!
//! Relationships are derived, not stored: any field with
//! `object_type == true` is an edge, and [`Diagram::relationships`]
//! recomputes the set on demand, dropping entries whose target is gone
//! or no longer a concrete CLASS. Consistency is structural.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    ClassNode, Field, FieldId, Method, MethodId, NodeId, Parameter, ParameterId, Position,
};
use crate::domain::error::DomainError;
use crate::domain::naming::{pluralize, to_camel_case, to_constant_case, unique_name};
use crate::domain::value_objects::{FieldType, RelationshipType, StructureType};

/// Where the first node lands on an empty canvas.
const FIRST_POSITION: Position = Position::new(60.0, 40.0);
/// Offset applied per new node so nodes never stack exactly.
const CASCADE_X: f64 = 36.0;
const CASCADE_Y: f64 = 28.0;

/// A derived relationship edge `(source → target, kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub source: NodeId,
    /// The field on the source class that materializes this edge.
    pub field: FieldId,
    pub target: NodeId,
    pub kind: RelationshipType,
}

/// The whole model: an ordered collection of class nodes and the
/// currently selected node, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    nodes: Vec<ClassNode>,
    selected: Option<NodeId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[ClassNode] {
        &self.nodes
    }

    /// Lookup that treats a missing node as an error.
    pub fn node(&self, id: NodeId) -> Result<&ClassNode, DomainError> {
        self.find(id)
            .ok_or_else(|| DomainError::NodeNotFound { id: id.to_string() })
    }

    /// Lookup that treats a missing node as absent (dangling reference).
    pub fn find(&self, id: NodeId) -> Option<&ClassNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut ClassNode, DomainError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound { id: id.to_string() })
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&ClassNode> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Recompute the derived relationship set. Dangling or non-CLASS
    /// targets are silently excluded — a deleted endpoint must degrade,
    /// never crash a render pass.
    pub fn relationships(&self) -> Vec<Relationship> {
        let mut edges = Vec::new();
        for node in &self.nodes {
            for field in &node.fields {
                if !field.object_type {
                    continue;
                }
                let (Some(target), Some(kind)) = (field.target_class, field.relationship_type)
                else {
                    continue;
                };
                match self.find(target) {
                    Some(t) if t.structure_type.is_class() => edges.push(Relationship {
                        source: node.id,
                        field: field.id,
                        target,
                        kind,
                    }),
                    _ => {}
                }
            }
        }
        edges
    }

    // ── Selection ────────────────────────────────────────────────────────

    pub fn select(&mut self, id: NodeId) -> Result<(), DomainError> {
        self.node(id)?;
        self.selected = Some(id);
        Ok(())
    }

    // ── Class operations ─────────────────────────────────────────────────

    /// Append a new CLASS node with the default identifier field,
    /// cascade-offset from the previous node, and select it.
    pub fn add_class(&mut self) -> NodeId {
        let name = unique_name("NewClass", |n| self.nodes.iter().any(|c| c.name == n));
        let position = self
            .nodes
            .last()
            .map(|n| n.position.translated(CASCADE_X, CASCADE_Y))
            .unwrap_or(FIRST_POSITION);

        let node = ClassNode::new(name, position);
        let id = node.id;
        self.nodes.push(node);
        self.selected = Some(id);
        id
    }

    /// Delete a node and clear every relationship field that targeted it.
    pub fn remove_class(&mut self, id: NodeId) -> Result<(), DomainError> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound { id: id.to_string() })?;
        self.nodes.remove(idx);

        for node in &mut self.nodes {
            for field in &mut node.fields {
                if field.target_class == Some(id) {
                    field.clear_relationship();
                }
            }
        }

        if self.selected == Some(id) {
            self.selected = self.nodes.first().map(|n| n.id);
        }
        Ok(())
    }

    pub fn set_position(&mut self, id: NodeId, position: Position) -> Result<(), DomainError> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Switch a node's structure type, normalizing what the new type
    /// cannot carry (see [`ClassNode::set_structure_type`]).
    pub fn set_structure_type(
        &mut self,
        class: NodeId,
        new_type: StructureType,
    ) -> Result<(), DomainError> {
        self.node_mut(class)?.set_structure_type(new_type);
        Ok(())
    }

    // ── Field operations ─────────────────────────────────────────────────

    /// Append a default String scalar with a generated unique name.
    pub fn add_field(&mut self, class: NodeId) -> Result<FieldId, DomainError> {
        let node = self.node_mut(class)?;
        let name = unique_name("field", |n| node.has_field_named(n));
        let field = Field::scalar(name, FieldType::String);
        let id = field.id;
        node.fields.push(field);
        node.promote_identifier();
        Ok(id)
    }

    /// Remove a field. The sole remaining field cannot be removed, and
    /// removing the identifier promotes the first remaining field.
    pub fn remove_field(&mut self, class: NodeId, field: FieldId) -> Result<(), DomainError> {
        let node = self.node_mut(class)?;
        if node.fields.len() <= 1 {
            return Err(DomainError::LastField {
                class: node.name.clone(),
            });
        }
        let class_name = node.name.clone();
        let idx = node
            .fields
            .iter()
            .position(|f| f.id == field)
            .ok_or_else(|| DomainError::FieldNotFound {
                class: class_name,
                id: field.to_string(),
            })?;

        let removed = node.fields.remove(idx);
        if removed.identifier {
            node.promote_identifier();
        }
        Ok(())
    }

    /// Mark `field` as the identifier and clear the flag on its siblings.
    pub fn set_field_identifier(
        &mut self,
        class: NodeId,
        field: FieldId,
    ) -> Result<(), DomainError> {
        let node = self.node_mut(class)?;
        if !node.structure_type.is_class() {
            return Err(DomainError::StructureMismatch {
                operation: "identifier selection",
                expected: "CLASS",
                actual: node.structure_type.to_string(),
                class: node.name.clone(),
            });
        }
        if node.field(field).is_none() {
            return Err(DomainError::FieldNotFound {
                class: node.name.clone(),
                id: field.to_string(),
            });
        }
        for f in &mut node.fields {
            f.identifier = f.id == field;
        }
        Ok(())
    }

    pub fn field_mut(&mut self, class: NodeId, field: FieldId) -> Result<&mut Field, DomainError> {
        let node = self.node_mut(class)?;
        let class_name = node.name.clone();
        node.field_mut(field).ok_or_else(|| DomainError::FieldNotFound {
            class: class_name,
            id: field.to_string(),
        })
    }

    // ── Relationship authoring ───────────────────────────────────────────

    /// Check that both endpoints exist and are concrete classes.
    pub fn can_link(&self, source: NodeId, target: NodeId) -> Result<(), DomainError> {
        for (role, id) in [("source", source), ("target", target)] {
            let node = self.node(id)?;
            if !node.structure_type.is_class() {
                return Err(DomainError::RelationshipEndpoints {
                    reason: format!("{role} '{}' is {}", node.name, node.structure_type),
                });
            }
        }
        Ok(())
    }

    /// Append a relationship field to `source` pointing at `target`.
    ///
    /// The field name is the camelCase target name, pluralized for
    /// to-many kinds and deduplicated with a numeric suffix.
    pub fn create_relationship_field(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: RelationshipType,
    ) -> Result<FieldId, DomainError> {
        self.can_link(source, target)?;

        let target_name = self.node(target)?.name.clone();
        let mut base = to_camel_case(&target_name);
        if base.is_empty() {
            base = "related".to_string();
        }
        if kind.is_to_many() {
            base = pluralize(&base);
        }

        let node = self.node_mut(source)?;
        let name = unique_name(&base, |n| node.has_field_named(n));
        let field = Field::relationship(name, target, kind);
        let id = field.id;
        node.fields.push(field);
        Ok(id)
    }

    // ── Method operations ────────────────────────────────────────────────

    pub fn add_method(&mut self, class: NodeId) -> Result<MethodId, DomainError> {
        let node = self.node_mut(class)?;
        let name = unique_name("method", |n| node.methods.iter().any(|m| m.name == n));
        let method = Method::new(name);
        let id = method.id;
        node.methods.push(method);
        Ok(id)
    }

    pub fn remove_method(&mut self, class: NodeId, method: MethodId) -> Result<(), DomainError> {
        let node = self.node_mut(class)?;
        let before = node.methods.len();
        node.methods.retain(|m| m.id != method);
        if node.methods.len() == before {
            return Err(DomainError::MethodNotFound {
                class: node.name.clone(),
                id: method.to_string(),
            });
        }
        Ok(())
    }

    pub fn method_mut(
        &mut self,
        class: NodeId,
        method: MethodId,
    ) -> Result<&mut Method, DomainError> {
        let node = self.node_mut(class)?;
        let class_name = node.name.clone();
        node.method_mut(method).ok_or_else(|| DomainError::MethodNotFound {
            class: class_name,
            id: method.to_string(),
        })
    }

    pub fn add_parameter(
        &mut self,
        class: NodeId,
        method: MethodId,
    ) -> Result<ParameterId, DomainError> {
        let m = self.method_mut(class, method)?;
        let name = unique_name("param", |n| m.parameters.iter().any(|p| p.name == n));
        let parameter = Parameter::new(name);
        let id = parameter.id;
        m.parameters.push(parameter);
        Ok(id)
    }

    pub fn parameter_mut(
        &mut self,
        class: NodeId,
        method: MethodId,
        parameter: ParameterId,
    ) -> Result<&mut Parameter, DomainError> {
        let m = self.method_mut(class, method)?;
        let method_name = m.name.clone();
        m.parameters
            .iter_mut()
            .find(|p| p.id == parameter)
            .ok_or_else(|| DomainError::ParameterNotFound {
                method: method_name,
                id: parameter.to_string(),
            })
    }

    pub fn remove_parameter(
        &mut self,
        class: NodeId,
        method: MethodId,
        parameter: ParameterId,
    ) -> Result<(), DomainError> {
        let m = self.method_mut(class, method)?;
        let before = m.parameters.len();
        m.parameters.retain(|p| p.id != parameter);
        if m.parameters.len() == before {
            return Err(DomainError::ParameterNotFound {
                method: m.name.clone(),
                id: parameter.to_string(),
            });
        }
        Ok(())
    }

    // ── Enum constants ───────────────────────────────────────────────────

    /// Normalize `raw` to CONSTANT_CASE and append it.
    pub fn add_enum_constant(&mut self, class: NodeId, raw: &str) -> Result<(), DomainError> {
        let node = self.node_mut(class)?;
        if !node.structure_type.has_constants() {
            return Err(DomainError::StructureMismatch {
                operation: "enum constants",
                expected: "ENUM",
                actual: node.structure_type.to_string(),
                class: node.name.clone(),
            });
        }
        let constant = to_constant_case(raw);
        if constant.is_empty() {
            return Err(DomainError::EmptyEnumConstant);
        }
        if node.enum_constants.iter().any(|c| c == &constant) {
            return Err(DomainError::DuplicateEnumConstant { name: constant });
        }
        node.enum_constants.push(constant);
        Ok(())
    }

    pub fn remove_enum_constant(&mut self, class: NodeId, name: &str) -> Result<(), DomainError> {
        self.node_mut(class)?.enum_constants.retain(|c| c != name);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn two_classes(diagram: &mut Diagram, a: &str, b: &str) -> (NodeId, NodeId) {
        let first = diagram.add_class();
        diagram.node_mut(first).unwrap().name = a.to_string();
        let second = diagram.add_class();
        diagram.node_mut(second).unwrap().name = b.to_string();
        (first, second)
    }

    // ── Class lifecycle ───────────────────────────────────────────────────

    #[test]
    fn add_class_selects_and_names_uniquely() {
        let mut d = Diagram::new();
        let a = d.add_class();
        let b = d.add_class();
        assert_eq!(d.selected(), Some(b));
        assert_eq!(d.node(a).unwrap().name, "NewClass");
        assert_eq!(d.node(b).unwrap().name, "NewClass2");
    }

    #[test]
    fn add_class_cascades_position() {
        let mut d = Diagram::new();
        let a = d.add_class();
        let b = d.add_class();
        let (pa, pb) = (d.node(a).unwrap().position, d.node(b).unwrap().position);
        assert!(pb.x > pa.x && pb.y > pa.y, "nodes must not stack exactly");
    }

    #[test]
    fn remove_class_clears_relationship_fields_in_others() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();

        d.remove_class(product).unwrap();

        let field = d.node(order).unwrap().fields.last().unwrap().clone();
        assert!(!field.object_type);
        assert_eq!(field.target_class, None);
        assert_eq!(field.relationship_type, None);
        assert!(d.relationships().is_empty());
    }

    #[test]
    fn remove_selected_class_falls_back_to_first() {
        let mut d = Diagram::new();
        let a = d.add_class();
        let b = d.add_class();
        assert_eq!(d.selected(), Some(b));

        d.remove_class(b).unwrap();
        assert_eq!(d.selected(), Some(a));

        d.remove_class(a).unwrap();
        assert_eq!(d.selected(), None);
    }

    // ── Field invariants ──────────────────────────────────────────────────

    #[test]
    fn exactly_one_identifier_through_mutation_sequences() {
        let mut d = Diagram::new();
        let id = d.add_class();
        let f2 = d.add_field(id).unwrap();
        let f3 = d.add_field(id).unwrap();

        d.set_field_identifier(id, f3).unwrap();
        let count = |d: &Diagram| {
            d.node(id)
                .unwrap()
                .fields
                .iter()
                .filter(|f| f.identifier)
                .count()
        };
        assert_eq!(count(&d), 1);

        // Removing the identifier promotes the first remaining field.
        d.remove_field(id, f3).unwrap();
        assert_eq!(count(&d), 1);
        assert!(d.node(id).unwrap().fields[0].identifier);

        d.set_field_identifier(id, f2).unwrap();
        assert_eq!(count(&d), 1);
    }

    #[test]
    fn last_field_removal_is_rejected() {
        let mut d = Diagram::new();
        let id = d.add_class();
        let only = d.node(id).unwrap().fields[0].id;

        let err = d.remove_field(id, only).unwrap_err();
        assert!(matches!(err, DomainError::LastField { .. }));
        assert_eq!(d.node(id).unwrap().fields.len(), 1);
    }

    #[test]
    fn structure_round_trip_restores_identifier() {
        let mut d = Diagram::new();
        let id = d.add_class();
        d.add_field(id).unwrap();

        d.set_structure_type(id, StructureType::Enum).unwrap();
        assert!(d.node(id).unwrap().identifier_field().is_none());

        d.set_structure_type(id, StructureType::Class).unwrap();
        assert!(d.node(id).unwrap().identifier_field().is_some());
    }

    // ── Relationships ─────────────────────────────────────────────────────

    #[test]
    fn relationship_field_pluralizes_and_targets() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");

        let fid = d
            .create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();

        let field = d.node(order).unwrap().field(fid).unwrap().clone();
        assert_eq!(field.name, "products");
        assert!(field.object_type);
        assert_eq!(field.field_type, FieldType::Object);
        assert_eq!(field.target_class, Some(product));
        assert_eq!(field.relationship_type, Some(RelationshipType::OneToMany));
    }

    #[test]
    fn to_one_relationship_keeps_singular_name() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");
        let fid = d
            .create_relationship_field(order, product, RelationshipType::ManyToOne)
            .unwrap();
        assert_eq!(d.node(order).unwrap().field(fid).unwrap().name, "product");
    }

    #[test]
    fn colliding_relationship_names_get_numeric_suffix() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();
        let second = d
            .create_relationship_field(order, product, RelationshipType::ManyToMany)
            .unwrap();
        assert_eq!(d.node(order).unwrap().field(second).unwrap().name, "products2");
    }

    #[test]
    fn non_class_endpoints_are_rejected_without_mutation() {
        let mut d = Diagram::new();
        let (order, target) = two_classes(&mut d, "Order", "Status");
        d.set_structure_type(target, StructureType::Enum).unwrap();
        let fields_before = d.node(order).unwrap().fields.len();

        let err = d
            .create_relationship_field(order, target, RelationshipType::OneToOne)
            .unwrap_err();
        assert!(matches!(err, DomainError::RelationshipEndpoints { .. }));
        assert_eq!(d.node(order).unwrap().fields.len(), fields_before);

        d.set_structure_type(target, StructureType::Interface).unwrap();
        assert!(d.create_relationship_field(order, target, RelationshipType::OneToOne).is_err());
    }

    #[test]
    fn relationships_skip_dangling_targets() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();
        assert_eq!(d.relationships().len(), 1);

        // Simulate a stale reference by downgrading the target instead
        // of deleting it: the scan must drop the edge either way.
        d.set_structure_type(product, StructureType::Interface).unwrap();
        assert!(d.relationships().is_empty());
    }

    // ── Methods, parameters, constants ────────────────────────────────────

    #[test]
    fn method_and_parameter_lifecycle() {
        let mut d = Diagram::new();
        let id = d.add_class();
        let m = d.add_method(id).unwrap();
        assert_eq!(d.node(id).unwrap().method(m).unwrap().return_type, "void");

        let p = d.add_parameter(id, m).unwrap();
        let p2 = d.add_parameter(id, m).unwrap();
        let method = d.node(id).unwrap().method(m).unwrap();
        assert_eq!(method.parameters[0].name, "param");
        assert_eq!(method.parameters[1].name, "param2");

        d.remove_parameter(id, m, p).unwrap();
        assert!(matches!(
            d.remove_parameter(id, m, p).unwrap_err(),
            DomainError::ParameterNotFound { .. }
        ));
        d.remove_parameter(id, m, p2).unwrap();
        d.remove_method(id, m).unwrap();
        assert!(d.node(id).unwrap().methods.is_empty());
    }

    #[test]
    fn enum_constants_normalize_and_reject_duplicates() {
        let mut d = Diagram::new();
        let id = d.add_class();

        // Constants require an ENUM structure.
        assert!(matches!(
            d.add_enum_constant(id, "active").unwrap_err(),
            DomainError::StructureMismatch { .. }
        ));

        d.set_structure_type(id, StructureType::Enum).unwrap();
        d.add_enum_constant(id, "in progress").unwrap();
        assert_eq!(d.node(id).unwrap().enum_constants, vec!["IN_PROGRESS"]);

        assert!(matches!(
            d.add_enum_constant(id, "In Progress").unwrap_err(),
            DomainError::DuplicateEnumConstant { .. }
        ));
        assert!(matches!(
            d.add_enum_constant(id, "--").unwrap_err(),
            DomainError::EmptyEnumConstant
        ));

        d.remove_enum_constant(id, "IN_PROGRESS").unwrap();
        assert!(d.node(id).unwrap().enum_constants.is_empty());
    }

    #[test]
    fn document_round_trips_through_serde() {
        let mut d = Diagram::new();
        let (order, product) = two_classes(&mut d, "Order", "Product");
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();

        let json = serde_json::to_string(&d).unwrap();
        let back: Diagram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.relationships().len(), 1);
    }
}

//! Wizard validation rules.
//!
//! All step-level validation logic lives here, not scattered across the
//! wizard or the entities. Every rule produces a [`ValidationIssue`] —
//! a blocking, user-facing message — and never mutates the model.
//!
//! Name patterns are checked with plain character predicates (see
//! `naming`), the same `^[A-Z][A-Za-z0-9]*$`-style rules the generator
//! applies server-side.

use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::{ClassNode, Diagram};
use crate::domain::naming::{is_camel_case, is_pascal_case, is_table_name};

/// One blocking validation message, scoped to the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pass/fail per category, produced by the review step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub basic: Vec<ValidationIssue>,
    pub fields: Vec<ValidationIssue>,
    pub methods: Vec<ValidationIssue>,
}

impl StepReport {
    pub fn is_pass(&self) -> bool {
        self.basic.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }

    /// All issues across categories, in step order.
    pub fn all(&self) -> Vec<&ValidationIssue> {
        self.basic
            .iter()
            .chain(&self.fields)
            .chain(&self.methods)
            .collect()
    }
}

/// Centralized wizard validation.
pub struct WizardValidator;

impl WizardValidator {
    /// Basic Info step: class name and table name.
    pub fn basic_info(diagram: &Diagram, node: &ClassNode) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let name = node.name.trim();

        if name.is_empty() {
            issues.push(ValidationIssue::new("class name is required"));
        } else if !is_pascal_case(name) {
            issues.push(ValidationIssue::new(format!(
                "class name '{name}' must be PascalCase (start with an uppercase letter, letters and digits only)"
            )));
        }

        let duplicate = diagram
            .nodes()
            .iter()
            .any(|other| other.id != node.id && other.name.trim() == name && !name.is_empty());
        if duplicate {
            issues.push(ValidationIssue::new(format!(
                "class name '{name}' is already used by another structure"
            )));
        }

        let table = node.table_name.trim();
        if node.structure_type.is_class() && !table.is_empty() && !is_table_name(table) {
            issues.push(ValidationIssue::new(format!(
                "table name '{table}' may only contain letters, digits, and underscores"
            )));
        }

        issues
    }

    /// Fields step: names, duplicates, the identifier invariant, and
    /// relationship targets.
    pub fn fields(diagram: &Diagram, node: &ClassNode) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let is_class = node.structure_type.is_class();

        if is_class && node.fields.is_empty() {
            issues.push(ValidationIssue::new("a class needs at least one field"));
        }

        let mut seen = HashSet::new();
        for field in &node.fields {
            let name = field.name.trim();
            if name.is_empty() {
                issues.push(ValidationIssue::new("every field needs a name"));
            } else if !is_camel_case(name) {
                issues.push(ValidationIssue::new(format!(
                    "field name '{name}' must be camelCase (start with a lowercase letter)"
                )));
            } else if !seen.insert(name) {
                issues.push(ValidationIssue::new(format!("duplicate field name '{name}'")));
            }

            if field.object_type {
                let display = if name.is_empty() { "(unnamed)" } else { name };
                let target_alive = field
                    .target_class
                    .and_then(|id| diagram.find(id))
                    .is_some_and(|t| t.structure_type.is_class());
                if !target_alive {
                    issues.push(ValidationIssue::new(format!(
                        "relationship field '{display}' does not target an existing class"
                    )));
                }
                if field.relationship_type.is_none() {
                    issues.push(ValidationIssue::new(format!(
                        "relationship field '{display}' has no relationship kind"
                    )));
                }
            }
        }

        if is_class && !node.fields.is_empty() {
            let identifiers = node.fields.iter().filter(|f| f.identifier).count();
            if identifiers == 0 {
                issues.push(ValidationIssue::new(
                    "mark exactly one field as the identifier (none is marked)",
                ));
            } else if identifiers > 1 {
                issues.push(ValidationIssue::new(format!(
                    "only one field may be the identifier ({identifiers} are marked)"
                )));
            }
        }

        issues
    }

    /// Methods/Constants step: enum constants, method names, and the
    /// default-implementation body rule.
    pub fn methods(node: &ClassNode) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if node.structure_type.has_constants() && node.enum_constants.is_empty() {
            issues.push(ValidationIssue::new("an enum needs at least one constant"));
        }

        let mut seen = HashSet::new();
        for method in &node.methods {
            let name = method.name.trim();
            if name.is_empty() {
                issues.push(ValidationIssue::new("every method needs a name"));
            } else if !is_camel_case(name) {
                issues.push(ValidationIssue::new(format!(
                    "method name '{name}' must be camelCase"
                )));
            } else if !seen.insert(name) {
                issues.push(ValidationIssue::new(format!("duplicate method name '{name}'")));
            }

            if method.default_implementation && method.body.trim().is_empty() {
                let display = if name.is_empty() { "(unnamed)" } else { name };
                issues.push(ValidationIssue::new(format!(
                    "default method '{display}' needs a body"
                )));
            }

            for parameter in &method.parameters {
                let pname = parameter.name.trim();
                if pname.is_empty() {
                    issues.push(ValidationIssue::new(format!(
                        "method '{name}' has an unnamed parameter"
                    )));
                } else if !is_camel_case(pname) {
                    issues.push(ValidationIssue::new(format!(
                        "parameter name '{pname}' must be camelCase"
                    )));
                }
            }
        }

        issues
    }

    /// Review step: re-run every category.
    pub fn review(diagram: &Diagram, node: &ClassNode) -> StepReport {
        StepReport {
            basic: Self::basic_info(diagram, node),
            fields: Self::fields(diagram, node),
            methods: Self::methods(node),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Field, NodeId};
    use crate::domain::value_objects::{FieldType, RelationshipType, StructureType};

    fn diagram_with_one() -> (Diagram, NodeId) {
        let mut d = Diagram::new();
        let id = d.add_class();
        d.node_mut(id).unwrap().name = "Person".into();
        (d, id)
    }

    #[test]
    fn valid_default_class_passes_every_step() {
        let (d, id) = diagram_with_one();
        let node = d.node(id).unwrap();
        assert!(WizardValidator::basic_info(&d, node).is_empty());
        assert!(WizardValidator::fields(&d, node).is_empty());
        assert!(WizardValidator::methods(node).is_empty());
        assert!(WizardValidator::review(&d, node).is_pass());
    }

    #[test]
    fn basic_rejects_bad_casing_and_duplicates() {
        let (mut d, id) = diagram_with_one();
        let other = d.add_class();
        d.node_mut(other).unwrap().name = "Person".into();

        let issues = WizardValidator::basic_info(&d, d.node(other).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("already used")));

        d.node_mut(id).unwrap().name = "person".into();
        let issues = WizardValidator::basic_info(&d, d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("PascalCase")));
    }

    #[test]
    fn basic_checks_table_name_charset() {
        let (mut d, id) = diagram_with_one();
        d.node_mut(id).unwrap().table_name = "person table".into();
        let issues = WizardValidator::basic_info(&d, d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("table name")));
    }

    #[test]
    fn fields_step_requires_exactly_one_identifier() {
        let (mut d, id) = diagram_with_one();
        d.node_mut(id).unwrap().fields[0].identifier = false;

        let issues = WizardValidator::fields(&d, d.node(id).unwrap());
        assert!(
            issues.iter().any(|i| i.message.contains("identifier")),
            "missing identifier must be named in the message"
        );

        d.node_mut(id).unwrap().fields[0].identifier = true;
        d.node_mut(id)
            .unwrap()
            .fields
            .push(Field {
                identifier: true,
                ..Field::scalar("name", FieldType::String)
            });
        let issues = WizardValidator::fields(&d, d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("only one field")));
    }

    #[test]
    fn fields_step_flags_dangling_relationship() {
        let (mut d, id) = diagram_with_one();
        d.node_mut(id).unwrap().fields.push(Field::relationship(
            "orders",
            NodeId::new(), // never added to the diagram
            RelationshipType::OneToMany,
        ));
        let issues = WizardValidator::fields(&d, d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("existing class")));
    }

    #[test]
    fn methods_step_enforces_enum_constants_and_bodies() {
        let (mut d, id) = diagram_with_one();
        d.set_structure_type(id, StructureType::Enum).unwrap();
        let issues = WizardValidator::methods(d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("constant")));

        d.add_enum_constant(id, "active").unwrap();
        assert!(WizardValidator::methods(d.node(id).unwrap()).is_empty());

        let m = d.add_method(id).unwrap();
        d.method_mut(id, m).unwrap().default_implementation = true;
        let issues = WizardValidator::methods(d.node(id).unwrap());
        assert!(issues.iter().any(|i| i.message.contains("needs a body")));

        d.method_mut(id, m).unwrap().body = "return 0;".into();
        assert!(WizardValidator::methods(d.node(id).unwrap()).is_empty());
    }

    #[test]
    fn review_aggregates_all_categories() {
        let (mut d, id) = diagram_with_one();
        d.node_mut(id).unwrap().name = "bad name".into();
        d.node_mut(id).unwrap().fields[0].name = "Id".into();

        let report = WizardValidator::review(&d, d.node(id).unwrap());
        assert!(!report.is_pass());
        assert!(!report.basic.is_empty());
        assert!(!report.fields.is_empty());
        assert!(report.methods.is_empty());
        assert_eq!(report.all().len(), report.basic.len() + report.fields.len());
    }
}

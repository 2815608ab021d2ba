//! Domain value objects: StructureType, FieldType, RelationshipType.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Capability rules that other layers consult (can a node own
//! relationships? does a kind pluralize its field name?) live here as
//! predicates on the type, so mutation operations and the payload
//! builder never re-derive them from string comparisons.
//!
//! The serialized spellings (`CLASS`, `ONE_TO_MANY`, `BigDecimal`, …)
//! are part of the generator wire contract and must not drift.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── StructureType ─────────────────────────────────────────────────────────────

/// The kind of structure a diagram node models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureType {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Enum,
}

impl StructureType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "CLASS",
            Self::AbstractClass => "ABSTRACT_CLASS",
            Self::Interface => "INTERFACE",
            Self::Enum => "ENUM",
        }
    }

    /// Short label used by the canvas header badge.
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::AbstractClass => "abstract",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }

    /// Only concrete classes may own table names, identifier/unique
    /// markers, and relationship endpoints.
    pub const fn is_class(self) -> bool {
        matches!(self, Self::Class)
    }

    /// Enum constants are meaningful only for `Enum`.
    pub const fn has_constants(self) -> bool {
        matches!(self, Self::Enum)
    }

    /// `abstractMethod` is meaningful on everything except interfaces;
    /// `defaultImplementation` only on interfaces.
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface)
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "class" => Ok(Self::Class),
            "abstract_class" | "abstract-class" | "abstract" => Ok(Self::AbstractClass),
            "interface" => Ok(Self::Interface),
            "enum" => Ok(Self::Enum),
            other => Err(DomainError::UnknownValue {
                kind: "structure type",
                value: other.to_string(),
            }),
        }
    }
}

// ── RelationshipType ──────────────────────────────────────────────────────────

/// Cardinality of a relationship edge between two CLASS nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// All kinds, in the order the kind-selection dialog offers them.
pub const RELATIONSHIP_KINDS: [RelationshipType; 4] = [
    RelationshipType::OneToOne,
    RelationshipType::OneToMany,
    RelationshipType::ManyToOne,
    RelationshipType::ManyToMany,
];

impl RelationshipType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "ONE_TO_ONE",
            Self::OneToMany => "ONE_TO_MANY",
            Self::ManyToOne => "MANY_TO_ONE",
            Self::ManyToMany => "MANY_TO_MANY",
        }
    }

    /// Connector label drawn at the line midpoint.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToOne => "N:1",
            Self::ManyToMany => "N:M",
        }
    }

    /// To-many kinds pluralize the generated field name.
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "one_to_one" | "one-to-one" | "onetoone" => Ok(Self::OneToOne),
            "one_to_many" | "one-to-many" | "onetomany" => Ok(Self::OneToMany),
            "many_to_one" | "many-to-one" | "manytoone" => Ok(Self::ManyToOne),
            "many_to_many" | "many-to-many" | "manytomany" => Ok(Self::ManyToMany),
            other => Err(DomainError::UnknownValue {
                kind: "relationship type",
                value: other.to_string(),
            }),
        }
    }
}

// ── FieldType ─────────────────────────────────────────────────────────────────

/// The scalar type of a field, plus the `OBJECT` sentinel used by
/// relationship fields.
///
/// The scalar set is fixed: it mirrors the types the downstream code
/// generator knows how to emit and import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    String,
    Long,
    Integer,
    Double,
    Boolean,
    BigDecimal,
    LocalDate,
    LocalDateTime,
    #[serde(rename = "OBJECT")]
    Object,
}

/// The scalar types offered by the field-type picker (excludes the
/// `OBJECT` sentinel, which only relationship authoring assigns).
pub const SCALAR_TYPES: [FieldType; 8] = [
    FieldType::String,
    FieldType::Long,
    FieldType::Integer,
    FieldType::Double,
    FieldType::Boolean,
    FieldType::BigDecimal,
    FieldType::LocalDate,
    FieldType::LocalDateTime,
];

impl FieldType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Long => "Long",
            Self::Integer => "Integer",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::BigDecimal => "BigDecimal",
            Self::LocalDate => "LocalDate",
            Self::LocalDateTime => "LocalDateTime",
            Self::Object => "OBJECT",
        }
    }

    pub const fn is_object(self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "long" => Ok(Self::Long),
            "int" | "integer" => Ok(Self::Integer),
            "double" => Ok(Self::Double),
            "bool" | "boolean" => Ok(Self::Boolean),
            "bigdecimal" => Ok(Self::BigDecimal),
            "localdate" => Ok(Self::LocalDate),
            "localdatetime" => Ok(Self::LocalDateTime),
            "object" => Ok(Self::Object),
            other => Err(DomainError::UnknownValue {
                kind: "field type",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_type_wire_spelling() {
        assert_eq!(StructureType::Class.to_string(), "CLASS");
        assert_eq!(StructureType::AbstractClass.to_string(), "ABSTRACT_CLASS");
        assert_eq!(StructureType::Interface.to_string(), "INTERFACE");
        assert_eq!(StructureType::Enum.to_string(), "ENUM");
    }

    #[test]
    fn structure_type_from_str_accepts_aliases() {
        assert_eq!(
            "abstract".parse::<StructureType>().unwrap(),
            StructureType::AbstractClass
        );
        assert_eq!("CLASS".parse::<StructureType>().unwrap(), StructureType::Class);
        assert!("record".parse::<StructureType>().is_err());
    }

    #[test]
    fn only_class_supports_relationships() {
        assert!(StructureType::Class.is_class());
        assert!(!StructureType::AbstractClass.is_class());
        assert!(!StructureType::Interface.is_class());
        assert!(!StructureType::Enum.is_class());
    }

    #[test]
    fn to_many_kinds_pluralize() {
        assert!(RelationshipType::OneToMany.is_to_many());
        assert!(RelationshipType::ManyToMany.is_to_many());
        assert!(!RelationshipType::OneToOne.is_to_many());
        assert!(!RelationshipType::ManyToOne.is_to_many());
    }

    #[test]
    fn field_type_from_str_accepts_generator_aliases() {
        assert_eq!("int".parse::<FieldType>().unwrap(), FieldType::Integer);
        assert_eq!("bool".parse::<FieldType>().unwrap(), FieldType::Boolean);
        assert_eq!("BigDecimal".parse::<FieldType>().unwrap(), FieldType::BigDecimal);
        assert!("varchar".parse::<FieldType>().is_err());
    }

    #[test]
    fn field_type_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&FieldType::LocalDateTime).unwrap(),
            "\"LocalDateTime\""
        );
        assert_eq!(serde_json::to_string(&FieldType::Object).unwrap(), "\"OBJECT\"");
    }

    #[test]
    fn relationship_type_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&RelationshipType::OneToMany).unwrap(),
            "\"ONE_TO_MANY\""
        );
    }
}

//! The `Method` and `Parameter` entities.
//!
//! Methods are never executed here; they are metadata the downstream
//! generator turns into real declarations.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{MethodId, ParameterId};

/// A behavior declaration on a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,
    pub name: String,
    /// Free-form return type, `"void"` by default.
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    /// Meaningful for non-interface structures.
    pub abstract_method: bool,
    /// Meaningful only for interfaces; requires a non-empty `body` to
    /// pass the methods step.
    pub default_implementation: bool,
    /// Optional source snippet handed through to the generator.
    pub body: String,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MethodId::new(),
            name: name.into(),
            return_type: "void".to_string(),
            parameters: Vec::new(),
            abstract_method: false,
            default_implementation: false,
            body: String::new(),
        }
    }
}

/// A method parameter. `type_name` is free-form like the return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParameterId::new(),
            name: name.into(),
            type_name: "String".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_defaults() {
        let m = Method::new("calculate");
        assert_eq!(m.return_type, "void");
        assert!(m.parameters.is_empty());
        assert!(!m.abstract_method && !m.default_implementation);
        assert!(m.body.is_empty());
    }

    #[test]
    fn parameter_defaults_to_string_type() {
        assert_eq!(Parameter::new("input").type_name, "String");
    }
}

pub mod class_node;
pub mod common;
pub mod diagram;
pub mod field;
pub mod method;

pub use crate::domain::DomainError;
pub use class_node::ClassNode;
pub use common::{FieldId, MethodId, NodeId, ParameterId, Position};
pub use diagram::{Diagram, Relationship};
pub use field::Field;
pub use method::{Method, Parameter};

//! Entity identifiers and canvas coordinates.
//!
//! Ids are opaque and stable for the lifetime of the element: the canvas,
//! the wizard, and relationship fields all hold ids, never indices, so
//! reordering or removal can never silently retarget a reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh id.
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`super::ClassNode`] within a diagram.
    NodeId
);
entity_id!(
    /// Identifies a [`super::Field`] within its owning class.
    FieldId
);
entity_id!(
    /// Identifies a [`super::Method`] within its owning class.
    MethodId
);
entity_id!(
    /// Identifies a [`super::Parameter`] within its owning method.
    ParameterId
);

/// Free-form canvas coordinates of a node's top-left corner.
///
/// Positions are user-dragged and carry no layout meaning; negative
/// values are legal (the host canvas may scroll).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

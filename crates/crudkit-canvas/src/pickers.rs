//! Kind-picker doubles for headless and test use.
//!
//! An interactive host answers the `RelationshipKindPicker` port with a
//! real modal; these implementations answer it from a script.

use std::collections::VecDeque;

use crudkit_core::application::ports::RelationshipKindPicker;
use crudkit_core::domain::{ClassNode, RelationshipType};

/// Always picks the same kind.
#[derive(Debug, Clone, Copy)]
pub struct FixedKindPicker {
    kind: RelationshipType,
}

impl FixedKindPicker {
    pub fn new(kind: RelationshipType) -> Self {
        Self { kind }
    }
}

impl RelationshipKindPicker for FixedKindPicker {
    fn pick(&mut self, _source: &ClassNode, _target: &ClassNode) -> Option<RelationshipType> {
        Some(self.kind)
    }
}

/// Always cancels the dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningPicker;

impl RelationshipKindPicker for DecliningPicker {
    fn pick(&mut self, _source: &ClassNode, _target: &ClassNode) -> Option<RelationshipType> {
        None
    }
}

/// Answers from a queue; an exhausted queue cancels.
#[derive(Debug, Clone, Default)]
pub struct QueuedPicker {
    answers: VecDeque<Option<RelationshipType>>,
}

impl QueuedPicker {
    pub fn new(answers: impl IntoIterator<Item = Option<RelationshipType>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }
}

impl RelationshipKindPicker for QueuedPicker {
    fn pick(&mut self, _source: &ClassNode, _target: &ClassNode) -> Option<RelationshipType> {
        self.answers.pop_front().flatten()
    }
}

//! The 4-step guided editing flow over the selected class.
//!
//! Steps gate on validation: `try_advance` refuses to move while the
//! active step has issues, surfacing them as transient feedback instead
//! of silently skipping. The flow itself holds no model data — it reads
//! the diagram fresh on every check.

use std::fmt;

use crate::application::error::ApplicationError;
use crate::domain::{ClassNode, Diagram, StepReport, ValidationIssue, WizardValidator};

/// One of the four gated wizard stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Fields,
    Methods,
    Review,
}

/// All steps in flow order.
pub const WIZARD_STEPS: [WizardStep; 4] = [
    WizardStep::BasicInfo,
    WizardStep::Fields,
    WizardStep::Methods,
    WizardStep::Review,
];

impl WizardStep {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Fields => "Fields & Relationships",
            Self::Methods => "Methods & Constants",
            Self::Review => "Review",
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Self::BasicInfo => 0,
            Self::Fields => 1,
            Self::Methods => 2,
            Self::Review => 3,
        }
    }

    const fn next(&self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::Fields),
            Self::Fields => Some(Self::Methods),
            Self::Methods => Some(Self::Review),
            Self::Review => None,
        }
    }

    const fn previous(&self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::Fields => Some(Self::BasicInfo),
            Self::Methods => Some(Self::Fields),
            Self::Review => Some(Self::Methods),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Transient feedback shown under the step header.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// The last advance was blocked by these issues.
    Blocked(Vec<ValidationIssue>),
}

/// The wizard state machine: active step + transient feedback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardFlow {
    active: WizardStep,
    feedback: Option<Feedback>,
}

impl WizardFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> WizardStep {
        self.active
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Issues for one step of one node. The review step re-runs every
    /// prior category.
    pub fn validate(diagram: &Diagram, node: &ClassNode, step: WizardStep) -> Vec<ValidationIssue> {
        match step {
            WizardStep::BasicInfo => WizardValidator::basic_info(diagram, node),
            WizardStep::Fields => WizardValidator::fields(diagram, node),
            WizardStep::Methods => WizardValidator::methods(node),
            WizardStep::Review => WizardValidator::review(diagram, node)
                .all()
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Whether "Next" should be enabled for the selected node.
    pub fn can_advance(&self, diagram: &Diagram) -> bool {
        match diagram.selected_node() {
            Some(node) => Self::validate(diagram, node, self.active).is_empty(),
            None => false,
        }
    }

    /// Advance to the next step, gated on the active step's validation.
    ///
    /// On failure the issues become the transient feedback and the step
    /// does not change. Advancing from `Review` stays on `Review`.
    pub fn try_advance(&mut self, diagram: &Diagram) -> Result<WizardStep, ApplicationError> {
        let node = diagram.selected_node().ok_or(ApplicationError::NoSelection)?;

        let issues = Self::validate(diagram, node, self.active);
        if !issues.is_empty() {
            self.feedback = Some(Feedback::Blocked(issues.clone()));
            return Err(ApplicationError::StepBlocked {
                step: self.active,
                issues,
            });
        }

        self.feedback = None;
        if let Some(next) = self.active.next() {
            self.active = next;
        }
        Ok(self.active)
    }

    /// Move back one step. Never gated.
    pub fn back(&mut self) {
        if let Some(previous) = self.active.previous() {
            self.active = previous;
        }
        self.feedback = None;
    }

    /// The review report for the selected node.
    pub fn review(&self, diagram: &Diagram) -> Option<StepReport> {
        diagram
            .selected_node()
            .map(|node| WizardValidator::review(diagram, node))
    }

    /// Any edit clears transient feedback but keeps the step.
    pub fn note_edit(&mut self) {
        self.feedback = None;
    }

    /// Creating, deleting, or selecting a class restarts the flow.
    pub fn reset(&mut self) {
        self.active = WizardStep::BasicInfo;
        self.feedback = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

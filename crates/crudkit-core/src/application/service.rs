//! Designer service - main application orchestrator.
//!
//! Every user action routes through this service. Each mutation:
//! 1. applies the domain operation (which re-establishes invariants),
//! 2. performs the wizard bookkeeping (edits clear transient feedback;
//!    creating/deleting/selecting a class restarts the flow),
//! 3. pushes a full re-render through the view port.
//!
//! Step 3 is the one consistency mechanism in the design: after every
//! mutation the view reflects the model exactly.

use tracing::{debug, info, instrument};

use crate::application::error::ApplicationError;
use crate::application::payload::{GenerationPayload, PayloadBuilder};
use crate::application::ports::{DiagramView, RelationshipKindPicker};
use crate::application::wizard::{WizardFlow, WizardStep};
use crate::domain::{
    Diagram, FieldId, FieldType, MethodId, NodeId, ParameterId, Position, StepReport,
    StructureType,
};
use crate::error::CrudKitResult;

/// Main designer service.
///
/// Owns the model, the wizard state, and the driven ports.
pub struct DesignerService {
    diagram: Diagram,
    wizard: WizardFlow,
    view: Box<dyn DiagramView>,
    picker: Box<dyn RelationshipKindPicker>,
}

impl DesignerService {
    /// Create a service over an empty diagram.
    pub fn new(view: Box<dyn DiagramView>, picker: Box<dyn RelationshipKindPicker>) -> Self {
        Self::with_diagram(Diagram::new(), view, picker)
    }

    /// Create a service over an existing model (e.g. a loaded document).
    pub fn with_diagram(
        diagram: Diagram,
        view: Box<dyn DiagramView>,
        picker: Box<dyn RelationshipKindPicker>,
    ) -> Self {
        let mut service = Self {
            diagram,
            wizard: WizardFlow::new(),
            view,
            picker,
        };
        service.sync();
        service
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn wizard(&self) -> &WizardFlow {
        &self.wizard
    }

    /// Full re-render: the single synchronization point.
    fn sync(&mut self) {
        self.view.refresh(&self.diagram);
    }

    /// Force a re-render with no model change (e.g. after a host
    /// resize, when connector geometry must be recomputed).
    pub fn refresh_view(&mut self) {
        self.sync();
    }

    // ── Class lifecycle (resets the wizard) ──────────────────────────────

    #[instrument(skip_all)]
    pub fn add_class(&mut self) -> NodeId {
        let id = self.diagram.add_class();
        info!(class = %id, "class added");
        self.wizard.reset();
        self.sync();
        id
    }

    #[instrument(skip_all, fields(class = %id))]
    pub fn remove_class(&mut self, id: NodeId) -> CrudKitResult<()> {
        self.diagram.remove_class(id)?;
        info!("class removed");
        self.wizard.reset();
        self.sync();
        Ok(())
    }

    pub fn select_class(&mut self, id: NodeId) -> CrudKitResult<()> {
        self.diagram.select(id)?;
        self.wizard.reset();
        self.sync();
        Ok(())
    }

    // ── Edits (clear transient feedback, keep the step) ──────────────────

    pub fn rename_class(&mut self, id: NodeId, name: &str) -> CrudKitResult<()> {
        self.diagram.node_mut(id)?.name = name.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_table_name(&mut self, id: NodeId, table: &str) -> CrudKitResult<()> {
        self.diagram.node_mut(id)?.table_name = table.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_structure_type(&mut self, id: NodeId, new_type: StructureType) -> CrudKitResult<()> {
        self.diagram.set_structure_type(id, new_type)?;
        debug!(class = %id, structure = %new_type, "structure type changed");
        self.note_edit();
        Ok(())
    }

    pub fn toggle_collapsed(&mut self, id: NodeId) -> CrudKitResult<()> {
        let node = self.diagram.node_mut(id)?;
        node.collapsed = !node.collapsed;
        self.note_edit();
        Ok(())
    }

    pub fn add_field(&mut self, class: NodeId) -> CrudKitResult<FieldId> {
        let id = self.diagram.add_field(class)?;
        self.note_edit();
        Ok(id)
    }

    pub fn remove_field(&mut self, class: NodeId, field: FieldId) -> CrudKitResult<()> {
        self.diagram.remove_field(class, field)?;
        self.note_edit();
        Ok(())
    }

    pub fn set_field_name(&mut self, class: NodeId, field: FieldId, name: &str) -> CrudKitResult<()> {
        self.diagram.field_mut(class, field)?.name = name.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_field_type(
        &mut self,
        class: NodeId,
        field: FieldId,
        field_type: FieldType,
    ) -> CrudKitResult<()> {
        self.diagram.field_mut(class, field)?.field_type = field_type;
        self.note_edit();
        Ok(())
    }

    pub fn set_field_identifier(&mut self, class: NodeId, field: FieldId) -> CrudKitResult<()> {
        self.diagram.set_field_identifier(class, field)?;
        self.note_edit();
        Ok(())
    }

    pub fn set_field_required(
        &mut self,
        class: NodeId,
        field: FieldId,
        required: bool,
    ) -> CrudKitResult<()> {
        self.diagram.field_mut(class, field)?.required = required;
        self.note_edit();
        Ok(())
    }

    pub fn set_field_unique(
        &mut self,
        class: NodeId,
        field: FieldId,
        unique: bool,
    ) -> CrudKitResult<()> {
        self.diagram.field_mut(class, field)?.unique = unique;
        self.note_edit();
        Ok(())
    }

    pub fn add_method(&mut self, class: NodeId) -> CrudKitResult<MethodId> {
        let id = self.diagram.add_method(class)?;
        self.note_edit();
        Ok(id)
    }

    pub fn remove_method(&mut self, class: NodeId, method: MethodId) -> CrudKitResult<()> {
        self.diagram.remove_method(class, method)?;
        self.note_edit();
        Ok(())
    }

    pub fn set_method_name(
        &mut self,
        class: NodeId,
        method: MethodId,
        name: &str,
    ) -> CrudKitResult<()> {
        self.diagram.method_mut(class, method)?.name = name.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_method_return_type(
        &mut self,
        class: NodeId,
        method: MethodId,
        return_type: &str,
    ) -> CrudKitResult<()> {
        self.diagram.method_mut(class, method)?.return_type = return_type.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_method_body(
        &mut self,
        class: NodeId,
        method: MethodId,
        body: &str,
    ) -> CrudKitResult<()> {
        self.diagram.method_mut(class, method)?.body = body.to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_method_abstract(
        &mut self,
        class: NodeId,
        method: MethodId,
        abstract_method: bool,
    ) -> CrudKitResult<()> {
        self.diagram.method_mut(class, method)?.abstract_method = abstract_method;
        self.note_edit();
        Ok(())
    }

    pub fn set_method_default_implementation(
        &mut self,
        class: NodeId,
        method: MethodId,
        default_implementation: bool,
    ) -> CrudKitResult<()> {
        self.diagram.method_mut(class, method)?.default_implementation = default_implementation;
        self.note_edit();
        Ok(())
    }

    pub fn add_parameter(&mut self, class: NodeId, method: MethodId) -> CrudKitResult<ParameterId> {
        let id = self.diagram.add_parameter(class, method)?;
        self.note_edit();
        Ok(id)
    }

    pub fn remove_parameter(
        &mut self,
        class: NodeId,
        method: MethodId,
        parameter: ParameterId,
    ) -> CrudKitResult<()> {
        self.diagram.remove_parameter(class, method, parameter)?;
        self.note_edit();
        Ok(())
    }

    pub fn set_parameter_name(
        &mut self,
        class: NodeId,
        method: MethodId,
        parameter: ParameterId,
        name: &str,
    ) -> CrudKitResult<()> {
        self.diagram.parameter_mut(class, method, parameter)?.name = name.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn set_parameter_type(
        &mut self,
        class: NodeId,
        method: MethodId,
        parameter: ParameterId,
        type_name: &str,
    ) -> CrudKitResult<()> {
        self.diagram.parameter_mut(class, method, parameter)?.type_name =
            type_name.trim().to_string();
        self.note_edit();
        Ok(())
    }

    pub fn add_enum_constant(&mut self, class: NodeId, raw: &str) -> CrudKitResult<()> {
        self.diagram.add_enum_constant(class, raw)?;
        self.note_edit();
        Ok(())
    }

    pub fn remove_enum_constant(&mut self, class: NodeId, name: &str) -> CrudKitResult<()> {
        self.diagram.remove_enum_constant(class, name)?;
        self.note_edit();
        Ok(())
    }

    /// Reposition a node mid-drag. Re-renders so the relationship
    /// overlay live-follows the pointer.
    pub fn move_class(&mut self, id: NodeId, position: Position) -> CrudKitResult<()> {
        self.diagram.set_position(id, position)?;
        self.sync();
        Ok(())
    }

    fn note_edit(&mut self) {
        self.wizard.note_edit();
        self.sync();
    }

    // ── Relationship authoring ───────────────────────────────────────────

    /// Complete a relationship drag released over `target`.
    ///
    /// Releasing over the source node itself, or cancelling the kind
    /// dialog, discards the pending relationship with no mutation.
    #[instrument(skip_all, fields(source = %source, target = %target))]
    pub fn complete_link(
        &mut self,
        source: NodeId,
        target: NodeId,
    ) -> CrudKitResult<Option<FieldId>> {
        if source == target {
            debug!("link released over its own source; discarded");
            return Ok(None);
        }
        self.diagram.can_link(source, target)?;

        let source_node = self.diagram.node(source)?.clone();
        let target_node = self.diagram.node(target)?.clone();
        let Some(kind) = self.picker.pick(&source_node, &target_node) else {
            debug!("relationship kind selection cancelled");
            return Ok(None);
        };

        let field = self
            .diagram
            .create_relationship_field(source, target, kind)?;
        info!(kind = %kind, "relationship created");
        self.note_edit();
        Ok(Some(field))
    }

    // ── Wizard flow ──────────────────────────────────────────────────────

    pub fn advance_wizard(&mut self) -> CrudKitResult<WizardStep> {
        let result = self.wizard.try_advance(&self.diagram);
        // Re-render either way: a blocked advance changed the feedback.
        self.sync();
        Ok(result?)
    }

    pub fn wizard_back(&mut self) {
        self.wizard.back();
        self.sync();
    }

    pub fn review(&self) -> Option<StepReport> {
        self.wizard.review(&self.diagram)
    }

    // ── Payload ──────────────────────────────────────────────────────────

    pub fn build_payload(
        &self,
        builder: &PayloadBuilder,
    ) -> Result<GenerationPayload, ApplicationError> {
        builder.build(&self.diagram)
    }

    /// The value for the hidden form field (`None` clears it).
    pub fn form_value(&self, builder: &PayloadBuilder) -> Result<Option<String>, ApplicationError> {
        builder.form_value(&self.diagram)
    }
}

//! Implementation of the `crudkit sample` command.
//!
//! Builds a small shop model through the real designer service —
//! including relationships authored through the drag-completion path —
//! and emits it as an interchange document.

use tracing::instrument;

use crudkit_canvas::{CanvasStage, QueuedPicker};
use crudkit_core::application::DesignerService;
use crudkit_core::domain::{FieldType, RelationshipType, StructureType};

use crate::cli::SampleArgs;
use crate::document;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all)]
pub fn execute(args: SampleArgs, output: OutputManager) -> CliResult<()> {
    let stage = CanvasStage::new();
    let picker = QueuedPicker::new([
        Some(RelationshipType::OneToMany),
        Some(RelationshipType::ManyToOne),
    ]);
    let mut designer = DesignerService::new(Box::new(stage), Box::new(picker));

    // Order
    let order = designer.add_class();
    designer.rename_class(order, "Order")?;
    designer.set_table_name(order, "orders")?;
    let total = designer.add_field(order)?;
    designer.set_field_name(order, total, "total")?;
    designer.set_field_type(order, total, FieldType::BigDecimal)?;
    designer.set_field_required(order, total, true)?;

    // Product
    let product = designer.add_class();
    designer.rename_class(product, "Product")?;
    let name = designer.add_field(product)?;
    designer.set_field_name(product, name, "name")?;
    designer.set_field_required(product, name, true)?;
    let price = designer.add_field(product)?;
    designer.set_field_name(product, price, "price")?;
    designer.set_field_type(product, price, FieldType::BigDecimal)?;

    let display = designer.add_method(product)?;
    designer.set_method_name(product, display, "displayName")?;
    designer.set_method_return_type(product, display, "String")?;
    let locale = designer.add_parameter(product, display)?;
    designer.set_parameter_name(product, display, locale, "locale")?;

    // Order status enum
    let status = designer.add_class();
    designer.rename_class(status, "OrderStatus")?;
    designer.set_structure_type(status, StructureType::Enum)?;
    for constant in ["new", "paid", "shipped"] {
        designer.add_enum_constant(status, constant)?;
    }

    // Relationships go through the same completion path a drag uses.
    designer.complete_link(order, product)?; // Order.products  [1:N]
    designer.complete_link(product, order)?; // Product.order   [N:1]

    designer.select_class(order)?;

    let json = serde_json::to_string_pretty(designer.diagram()).map_err(|e| {
        CliError::Core(crudkit_core::error::CrudKitError::Internal {
            message: format!("document serialization failed: {e}"),
        })
    })?;

    document::write_output(args.output.as_deref(), &json)?;
    if let Some(path) = &args.output {
        output.success(&format!("Sample document written to {}", path.display()))?;
    }
    Ok(())
}

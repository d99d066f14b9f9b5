//! Stock adjustment commands.

use anyhow::Result;
use parts_commerce::prelude::*;
use parts_data::InventoryService;

use super::{InventoryArgs, InventoryCommand};
use crate::context::Context;

/// Run the inventory command.
pub async fn run(args: InventoryArgs, ctx: &Context) -> Result<()> {
    match args.command {
        InventoryCommand::Adjust {
            id,
            delta,
            reason,
            notes,
        } => adjust(ProductId::new(id), delta, &reason, notes, ctx).await,
    }
}

async fn adjust(
    id: ProductId,
    delta: i64,
    reason: &str,
    notes: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let reason: AdjustmentReason = reason.parse()?;

    let spinner = ctx.output.spinner("Adjusting stock...");
    let plan = InventoryService::new(ctx.row_api()?)
        .adjust(id, delta, reason, notes)
        .await;
    spinner.finish_and_clear();
    let plan = plan?;

    if ctx.output.is_json() {
        ctx.output.json(&plan);
        return Ok(());
    }

    if plan.is_noop() {
        ctx.output
            .info(&format!("Product {} stock unchanged at {}", id, plan.new_quantity));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Product {} stock {} -> {} ({})",
        id,
        plan.previous_quantity,
        plan.new_quantity,
        plan.reason.as_str()
    ));
    if !plan.in_stock {
        ctx.output.warn("Product is now out of stock");
    }
    Ok(())
}

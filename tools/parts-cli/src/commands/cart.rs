//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use parts_commerce::prelude::*;
use parts_store::CartStore;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;

    match args.command.unwrap_or(CartCommand::Show { pickup: false }) {
        CartCommand::Show { pickup } => show(&cart, pickup, ctx),
        CartCommand::Add { id } => add(&mut cart, ProductId::new(id), ctx).await,
        CartCommand::Remove { id } => {
            if cart.remove(ProductId::new(id))? {
                ctx.output.success(&format!("Removed product {} from cart", id));
            } else {
                ctx.output.info(&format!("Product {} is not in the cart", id));
            }
            Ok(())
        }
        CartCommand::Inc { id, by } => change_quantity(&mut cart, id, by.abs(), ctx),
        CartCommand::Dec { id, by } => change_quantity(&mut cart, id, -by.abs(), ctx),
        CartCommand::Clear { yes } => {
            if cart.cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items?", cart.cart().item_count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            cart.clear()?;
            ctx.output.success("Cart cleared");
            Ok(())
        }
    }
}

fn show(cart: &CartStore, pickup: bool, ctx: &Context) -> Result<()> {
    // Pickup is free at any branch, so the store id does not change totals.
    let delivery = if pickup {
        DeliveryMethod::Pickup {
            store_id: StoreId::new(0),
        }
    } else {
        DeliveryMethod::Standard
    };
    let totals = cart.totals(delivery)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": cart.cart().lines(),
            "totals": totals,
        }));
        return Ok(());
    }

    if cart.cart().is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", totals.item_count));
    ctx.output.cart(cart.cart(), &totals);
    Ok(())
}

async fn add(cart: &mut CartStore, id: ProductId, ctx: &Context) -> Result<()> {
    let product = ctx
        .catalog()?
        .product(id)
        .await
        .with_context(|| format!("Failed to load product {}", id))?;

    if !product.is_available() {
        bail!("{} is out of stock", product.name);
    }

    let event = cart.add(&product.cart_product())?;
    ctx.output.success(&event.message());
    Ok(())
}

fn change_quantity(cart: &mut CartStore, id: i64, delta: i64, ctx: &Context) -> Result<()> {
    match cart.update_quantity(ProductId::new(id), delta)? {
        Some(quantity) => {
            ctx.output
                .success(&format!("Product {} quantity is now {}", id, quantity));
            Ok(())
        }
        None => bail!("Product {} is not in the cart", id),
    }
}

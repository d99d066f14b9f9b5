//! Checkout command.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use parts_commerce::prelude::*;
use parts_data::OrderService;

use super::CheckoutArgs;
use crate::context::Context;

const TOTAL_STEPS: u8 = 5;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;
    if cart.cart().is_empty() {
        bail!("Your cart is empty. Add products with `parts cart add <id>`.");
    }

    let mut flow = CheckoutFlow::new();

    // Contact
    flow.set_contact(ContactInfo {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
    });
    step(ctx, &flow, &format!("Contact: {}", flow.contact.full_name()));
    flow.advance().context("Contact details are incomplete")?;

    // Delivery
    let delivery = match args.pickup {
        Some(id) => DeliveryMethod::Pickup {
            store_id: pickup_store(ctx, StoreId::new(id)).await?,
        },
        None => DeliveryMethod::Standard,
    };
    flow.set_delivery(delivery);
    if delivery.requires_address() {
        flow.set_address(address_from(&args));
    }
    step(ctx, &flow, &format!("Delivery: {}", delivery.display_name()));
    flow.advance().context("Delivery details are incomplete")?;

    // Payment
    let payment: PaymentMethod = args.payment.parse()?;
    flow.set_payment(payment);
    if let Some(notes) = &args.notes {
        flow.set_notes(notes.as_str());
    }
    step(ctx, &flow, &format!("Payment: {}", payment.display_name()));
    flow.advance().context("Payment details are incomplete")?;

    // Review
    let checkout = flow.validate()?;
    let totals = cart.totals(checkout.delivery)?;
    step(ctx, &flow, "Review");
    review(ctx, &checkout, &cart, &totals);

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", totals.total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order not placed");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let placed = OrderService::new(ctx.row_api()?)
        .place_order(&checkout, &mut cart)
        .await;
    spinner.finish_and_clear();

    let placed = match placed {
        Ok(placed) => placed,
        Err(e) => {
            if e.left_orphan() {
                ctx.output
                    .warn("The backend may hold an order without items. Contact the shop before retrying.");
            }
            return Err(e).context("Checkout failed");
        }
    };

    flow.mark_complete();

    if ctx.output.is_json() {
        ctx.output.json(&placed);
        return Ok(());
    }

    step(ctx, &flow, "Complete");
    ctx.output.success(&format!("Order {} placed", placed.order_number));
    ctx.output.kv("Items", &placed.item_count.to_string());
    ctx.output.kv("Total", &placed.total.display());
    ctx.output.kv("Payment", payment.display_name());

    Ok(())
}

fn step(ctx: &Context, flow: &CheckoutFlow, msg: &str) {
    ctx.output.step(flow.step.number(), TOTAL_STEPS, msg);
}

fn address_from(args: &CheckoutArgs) -> ShippingAddress {
    ShippingAddress {
        street: args.street.clone().unwrap_or_default(),
        barangay: args.barangay.clone().unwrap_or_default(),
        city: args.city.clone().unwrap_or_default(),
        province: args.province.clone().unwrap_or_default(),
        postal_code: args.postal_code.clone().unwrap_or_default(),
        landmark: args.landmark.clone(),
    }
}

/// Only active stores accept pickups.
async fn pickup_store(ctx: &Context, id: StoreId) -> Result<StoreId> {
    let stores = ctx
        .catalog()?
        .stores()
        .await
        .context("Failed to load stores")?;

    match stores.iter().find(|store| store.id == id) {
        Some(store) if store.is_active => {
            ctx.output.debug(&format!("Pickup at {}", store.name));
            Ok(store.id)
        }
        Some(store) => bail!("{} is not taking pickups", store.name),
        None => bail!("Store {} not found. See `parts content stores`.", id),
    }
}

fn review(ctx: &Context, checkout: &ValidatedCheckout, cart: &parts_store::CartStore, totals: &CartTotals) {
    if ctx.output.is_json() {
        return;
    }

    ctx.output.header("Order summary");
    ctx.output.kv("Name", &checkout.contact.full_name());
    ctx.output.kv("Email", checkout.contact.email.trim());
    ctx.output.kv("Phone", checkout.contact.phone.trim());
    ctx.output.kv("Delivery", checkout.delivery.display_name());
    if let Some(address) = &checkout.address {
        ctx.output.kv("Ship to", &address.one_line());
        if let Some(landmark) = &address.landmark {
            ctx.output.kv("Landmark", landmark);
        }
    }
    ctx.output.kv("Payment", checkout.payment.display_name());
    if let Some(notes) = &checkout.notes {
        ctx.output.kv("Notes", notes);
    }
    ctx.output.info("");
    ctx.output.cart(cart.cart(), totals);
}

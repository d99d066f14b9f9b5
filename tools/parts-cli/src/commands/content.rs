//! Storefront content and the contact form.

use anyhow::{Context as _, Result};
use parts_commerce::prelude::*;
use parts_data::MessageService;

use super::{ContentArgs, ContentCommand};
use crate::context::Context;

/// Run the content command.
pub async fn run(args: ContentArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ContentCommand::Slides => {
            let slides = ctx
                .catalog()?
                .hero_slides()
                .await
                .context("Failed to load hero slides")?;
            if ctx.output.is_json() {
                ctx.output.json(&slides);
                return Ok(());
            }

            ctx.output.header("Hero slides");
            for slide in &slides {
                ctx.output.list_item(&slide.title);
                if let Some(subtitle) = &slide.subtitle {
                    ctx.output.kv("Subtitle", subtitle);
                }
                if let (Some(label), Some(link)) = (&slide.cta_label, &slide.cta_link) {
                    ctx.output.kv(label, link);
                }
                ctx.output.kv("Image", &slide.image_url);
            }
            Ok(())
        }
        ContentCommand::Stores => {
            let stores: Vec<Store> = ctx
                .catalog()?
                .stores()
                .await
                .context("Failed to load stores")?
                .into_iter()
                .filter(|store| store.is_active)
                .collect();
            if ctx.output.is_json() {
                ctx.output.json(&stores);
                return Ok(());
            }

            ctx.output.header("Stores");
            if stores.is_empty() {
                ctx.output.info("No stores are open for pickup.");
            }
            for store in &stores {
                ctx.output.list_item(&format!("[{}] {}", store.id, store.name));
                ctx.output.kv("Address", &store.address);
                if let Some(hours) = &store.hours {
                    ctx.output.kv("Hours", hours);
                }
                if let Some(phone) = &store.phone {
                    ctx.output.kv("Phone", phone);
                }
            }
            Ok(())
        }
        ContentCommand::Links => {
            let links = ctx
                .catalog()?
                .social_links()
                .await
                .context("Failed to load social links")?;
            if ctx.output.is_json() {
                ctx.output.json(&links);
                return Ok(());
            }

            ctx.output.header("Follow us");
            for link in &links {
                ctx.output.kv(&link.platform, &link.url);
            }
            Ok(())
        }
        ContentCommand::Contact {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let message = ContactMessage {
                name,
                email,
                phone,
                subject,
                message,
            };
            message.validate()?;

            MessageService::new(ctx.row_api()?)
                .submit(&message)
                .await
                .context("Failed to send message")?;
            ctx.output
                .success("Message sent. We'll get back to you soon.");
            Ok(())
        }
    }
}

//! Configuration management commands.

use std::fs;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        let mut redacted = config.clone();
        redacted.backend.anon_key = redacted.backend.anon_key.as_deref().map(mask);
        ctx.output.json(&redacted);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[backend]");
    ctx.output
        .kv("url", config.backend.url.as_deref().unwrap_or("(not set)"));
    ctx.output.kv(
        "anon_key",
        &config
            .backend
            .anon_key
            .as_deref()
            .map(mask)
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    ctx.output
        .kv("timeout_ms", &config.backend.timeout_ms.to_string());
    ctx.output.kv(
        "connect_timeout_ms",
        &config.backend.connect_timeout_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[regions]");
    ctx.output.kv("base_url", &config.regions.base_url);

    ctx.output.info("");
    ctx.output.info("[state]");
    ctx.output
        .kv("dir", &ctx.state_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("currency", &config.shop.currency);
    ctx.output.kv("per_page", &config.shop.per_page.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output
        .kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("parts.toml");

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config file left unchanged");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    ctx.output.info("Set [backend] url and anon_key before browsing the catalog.");

    Ok(())
}

/// Keep the first few characters of a secret.
fn mask(secret: &str) -> String {
    let shown: String = secret.chars().take(4).collect();
    format!("{}****", shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("eyJhbGciOi"), "eyJh****");
        assert_eq!(mask("ab"), "ab****");
    }
}

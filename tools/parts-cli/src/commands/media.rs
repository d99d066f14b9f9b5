//! Image upload commands.

use std::path::Path;

use anyhow::{Context as _, Result};
use parts_data::{MediaBucket, MediaService};

use super::{MediaArgs, MediaCommand};
use crate::context::Context;
use crate::output::format_bytes;

/// Run the media command.
pub async fn run(args: MediaArgs, ctx: &Context) -> Result<()> {
    match args.command {
        MediaCommand::Upload { file, bucket } => upload(&file, &bucket, ctx).await,
    }
}

async fn upload(file: &str, bucket: &str, ctx: &Context) -> Result<()> {
    let bucket: MediaBucket = bucket
        .parse()
        .context("Use products or hero-images")?;

    let path = ctx.resolve_path(file);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?
        .to_string();
    let bytes = read_file(&path)?;
    let size = bytes.len() as u64;

    let spinner = ctx
        .output
        .spinner(&format!("Uploading {} ({})...", file_name, format_bytes(size)));
    let url = MediaService::new(ctx.row_api()?)
        .upload_image(bucket, &file_name, bytes)
        .await;
    spinner.finish_and_clear();
    let url = url.with_context(|| format!("Failed to upload {}", file_name))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "bucket": bucket.as_str(),
            "file": file_name,
            "size": size,
            "url": url,
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Uploaded {} to {}", file_name, bucket));
    ctx.output.kv("Size", &format_bytes(size));
    ctx.output.kv("URL", &url);
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

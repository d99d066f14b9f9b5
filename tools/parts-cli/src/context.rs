//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use parts_commerce::Currency;
use parts_data::{CatalogRepository, RegionClient, RestClient, RowApi};
use parts_store::{CartStore, FileStore, GarageStore, KvStore};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["parts.toml", ".parts.toml", "parts.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, env overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the cart and garage.
    pub fn state_dir(&self) -> PathBuf {
        match &self.config.state.dir {
            Some(dir) => self.resolve_path(dir),
            None => self.cwd.join(".parts"),
        }
    }

    fn kv_store(&self) -> Result<Arc<dyn KvStore>> {
        let dir = self.state_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open state directory: {}", dir.display()))?;
        Ok(Arc::new(store))
    }

    pub fn cart_store(&self) -> Result<CartStore> {
        CartStore::open(self.kv_store()?).context("Failed to load cart")
    }

    pub fn garage_store(&self) -> Result<GarageStore> {
        GarageStore::open(self.kv_store()?).context("Failed to load garage")
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Client for the hosted backend.
    pub fn row_api(&self) -> Result<Arc<dyn RowApi>> {
        let client = RestClient::new(self.config.backend_config()?)
            .context("Failed to create backend client")?;
        Ok(Arc::new(client))
    }

    pub fn catalog(&self) -> Result<CatalogRepository> {
        Ok(CatalogRepository::new(self.row_api()?).with_currency(self.currency()?))
    }

    pub fn regions(&self) -> Result<RegionClient> {
        RegionClient::new(self.config.regions.base_url.clone())
            .context("Failed to create region client")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_commerce::prelude::*;

    fn context(dir: &Path, state_dir: Option<&str>) -> Context {
        let mut config = CliConfig::default();
        config.state.dir = state_dir.map(PathBuf::from);
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            config_path: None,
        }
    }

    #[test]
    fn test_state_dir_defaults_under_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), None);
        assert_eq!(ctx.state_dir(), dir.path().join(".parts"));

        let ctx = context(dir.path(), Some("state"));
        assert_eq!(ctx.state_dir(), dir.path().join("state"));
    }

    #[test]
    fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), None);
        let filter = CartProduct {
            id: ProductId::new(3),
            name: "Oil Filter".to_string(),
            category: "Filters".to_string(),
            unit_price: Money::new(35_000, Currency::PHP),
            image_url: None,
        };

        let mut cart = ctx.cart_store().unwrap();
        cart.add(&filter).unwrap();
        cart.add(&filter).unwrap();
        drop(cart);

        let cart = ctx.cart_store().unwrap();
        assert_eq!(cart.cart().item_count(), 2);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("parts.toml"), "[shop]\nper_page = 24\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.shop.per_page, 24);
        assert_eq!(path, dir.path().join("parts.toml"));
    }

    #[test]
    fn test_backend_required_for_remote_commands() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), None);
        assert!(ctx.row_api().is_err());
    }
}

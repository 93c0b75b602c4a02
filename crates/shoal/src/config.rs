//! Harness configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `shoal.ron` file (if exists)
//! 3. Environment variables prefixed with `SHOAL_`
//!
//! Example environment variable: `SHOAL_BREEDING__EXPANSION_RATE=0.05`

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use shoal_catalog::GeneCatalog;
use shoal_genetics::BreedingConfig;

/// Main harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShoalConfig {
    #[serde(default)]
    pub breeding: BreedingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where gene data comes from
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// RON catalog overriding the built-in genes (built-in when unset)
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn load_catalog(&self) -> Result<GeneCatalog> {
        let Some(path) = &self.path else {
            return Ok(GeneCatalog::new());
        };

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gene catalog {}", path.display()))?;
        let catalog = GeneCatalog::from_ron(&source)
            .with_context(|| format!("Failed to parse gene catalog {}", path.display()))?;
        log::info!("Loaded gene catalog from {}", path.display());
        Ok(catalog)
    }
}

impl ShoalConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `shoal.ron` file (if exists)
    /// 3. Environment variables prefixed with `SHOAL_` (highest priority)
    pub fn load() -> Result<Self> {
        let defaults = BreedingConfig::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("breeding.substitution_rate", defaults.substitution_rate as f64)?
            .set_default("breeding.expansion_rate", defaults.expansion_rate as f64)?
            .set_default("breeding.deletion_rate", defaults.deletion_rate as f64)?
            .set_default(
                "breeding.special_mutation_rate",
                defaults.special_mutation_rate as f64,
            )?
            .set_default(
                "breeding.double_special_rate",
                defaults.double_special_rate as f64,
            )?
            .set_default("breeding.genome_ceiling", defaults.genome_ceiling as i64)?
            .set_default("breeding.prune_rate", defaults.prune_rate as f64)?
            .set_default(
                "breeding.spot_color_mutation_rate",
                defaults.spot_color_mutation_rate as f64,
            )?
            .set_default("breeding.lightness_jitter", defaults.lightness_jitter as f64)?
            .set_default("breeding.atavism.chance", defaults.atavism.chance as f64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("shoal")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (SHOAL_BREEDING__PRUNE_RATE, etc.)
            .add_source(Environment::with_prefix("SHOAL").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        loaded
            .breeding
            .validate()
            .context("Invalid breeding configuration")?;
        Ok(loaded)
    }
}

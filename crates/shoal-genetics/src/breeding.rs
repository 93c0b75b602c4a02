//! Breeding engine
//!
//! Combines the gamete engine, spot inheritor, polygenic engine and lineage
//! tracker into one offspring genotype. Parents are only read.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shoal_catalog::GeneCatalog;

use crate::config::{BreedingConfig, MAX_LIGHTNESS_JITTER};
use crate::error::Result;
use crate::gamete::{breed_genomes, Mutation};
use crate::generational::derive_generational_data;
use crate::genotype::{random_genotype, Genotype};
use crate::polygenic::breed_traits;
use crate::rng::{self, SeededRng};
use crate::spots::breed_spots;

/// Offspring genotype plus the mutations that occurred while forming it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedOutcome {
    pub genotype: Genotype,
    pub mutations: Vec<Mutation>,
}

/// Child lightness: the parents' mean drifted by up to `jitter` either way, clamped to 0 - 100.
///
/// Jitter is limited to `MAX_LIGHTNESS_JITTER`; a NaN jitter means no drift.
pub fn inherit_lightness<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32, jitter: f32) -> f32 {
    let mean = (a + b) / 2.0;
    let jitter = if jitter.is_nan() {
        0.0
    } else {
        jitter.min(MAX_LIGHTNESS_JITTER)
    };
    let drift = if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };
    (mean + drift).clamp(0.0, 100.0)
}

/// Breed one offspring from two parents.
///
/// The config is validated first, so a hand-built config with out-of-range
/// values fails with `InvalidConfig` instead of producing nonsense.
pub fn breed_with<R: Rng + ?Sized>(
    rng: &mut R,
    maternal: &Genotype,
    paternal: &Genotype,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Result<BreedOutcome> {
    config.validate()?;
    let generational = derive_generational_data(maternal, paternal)?;

    let (genome, mutations) =
        breed_genomes(rng, &maternal.genome, &paternal.genome, config, catalog);
    let spots = breed_spots(rng, &maternal.spots, &paternal.spots, config, catalog);
    let lightness = inherit_lightness(
        rng,
        maternal.clamped_lightness(),
        paternal.clamped_lightness(),
        config.lightness_jitter,
    );
    let polygenic = breed_traits(rng, maternal.polygenic.as_ref(), paternal.polygenic.as_ref());

    let genotype = Genotype {
        genome,
        spots,
        lightness,
        polygenic: Some(polygenic),
        generational,
    };

    log::debug!(
        "Bred generation {} offspring: {} genes, {} spots, {} mutations, expresses {}",
        genotype.generational.generation,
        genotype.genome.len(),
        genotype.spots.len(),
        mutations.len(),
        genotype.phenotype(catalog)
    );

    Ok(BreedOutcome {
        genotype,
        mutations,
    })
}

/// Breed `count` independent offspring from the same pair
pub fn breed_litter<R: Rng + ?Sized>(
    rng: &mut R,
    maternal: &Genotype,
    paternal: &Genotype,
    count: usize,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Result<Vec<BreedOutcome>> {
    (0..count)
        .map(|_| breed_with(rng, maternal, paternal, config, catalog))
        .collect()
}

/// Owns a config, a catalog and a seedable generator.
///
/// Two breeders created with the same seed produce identical offspring for
/// identical calls.
pub struct Breeder<R = SeededRng> {
    config: BreedingConfig,
    catalog: GeneCatalog,
    rng: R,
}

impl Breeder<SeededRng> {
    /// Reproducible breeder with the built-in config and catalog
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            BreedingConfig::default(),
            GeneCatalog::default(),
            rng::seeded(seed),
        )
    }

    /// Breeder seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(
            BreedingConfig::default(),
            GeneCatalog::default(),
            rng::from_entropy(),
        )
    }
}

impl<R: Rng> Breeder<R> {
    pub fn new(config: BreedingConfig, catalog: GeneCatalog, rng: R) -> Self {
        Self {
            config,
            catalog,
            rng,
        }
    }

    pub fn with_config(mut self, config: BreedingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: GeneCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &GeneCatalog {
        &self.catalog
    }

    pub fn breed(&mut self, maternal: &Genotype, paternal: &Genotype) -> Result<BreedOutcome> {
        breed_with(
            &mut self.rng,
            maternal,
            paternal,
            &self.config,
            &self.catalog,
        )
    }

    pub fn breed_litter(
        &mut self,
        maternal: &Genotype,
        paternal: &Genotype,
        count: usize,
    ) -> Result<Vec<BreedOutcome>> {
        breed_litter(
            &mut self.rng,
            maternal,
            paternal,
            count,
            &self.config,
            &self.catalog,
        )
    }

    pub fn random_genotype(&mut self) -> Genotype {
        random_genotype(&mut self.rng, &self.catalog)
    }
}

//! Genetics engine for Shoal
//!
//! This crate turns genotypes into observable fish and breeds new ones:
//! - Genotype aggregate and its parts (Genome, Spot, PolygenicTraits, GenerationalData)
//! - Phenotype resolution by copy count and dominance
//! - Gamete formation with substitution, expansion, deletion and special mutations
//! - Spot pattern and polygenic trait inheritance, atavism
//! - Market valuation of an individual
//!
//! Every operation takes its random source as an argument. The functions at the
//! crate root are shortcuts that use the thread RNG with the built-in catalog
//! and default [`BreedingConfig`]; use [`Breeder`] for reproducible runs.

use std::sync::OnceLock;

pub mod breeding;
pub mod config;
pub mod error;
pub mod gamete;
pub mod generational;
pub mod genome;
pub mod genotype;
pub mod phenotype;
pub mod polygenic;
pub mod rng;
pub mod sampler;
pub mod spots;
pub mod valuation;

pub use breeding::{breed_litter, breed_with, BreedOutcome, Breeder};
pub use config::BreedingConfig;
pub use error::{GeneticsError, Result};
pub use gamete::{Mutation, MutationKind};
pub use generational::{AncestorTraits, AtavismRule, GenerationalData};
pub use genome::Genome;
pub use genotype::Genotype;
pub use polygenic::{DominanceMode, LocusName, PolygenicLocus, PolygenicTraits, SpotPhenotype};
pub use spots::{Spot, SpotShape};
pub use valuation::{GrowthStage, Individual, ValuationBreakdown};

pub use shoal_catalog::{display_color, to_hex, ColorGeneId, GeneCatalog, GeneDef, Hsl};

fn builtin_catalog() -> &'static GeneCatalog {
    static CATALOG: OnceLock<GeneCatalog> = OnceLock::new();
    CATALOG.get_or_init(GeneCatalog::new)
}

/// Color a genome expresses under the built-in catalog
pub fn resolve_phenotype(genome: &Genome) -> ColorGeneId {
    phenotype::resolve_phenotype(genome, builtin_catalog())
}

/// Breed one offspring with the default config
pub fn breed(maternal: &Genotype, paternal: &Genotype) -> Result<BreedOutcome> {
    breed_with(
        &mut rand::thread_rng(),
        maternal,
        paternal,
        &BreedingConfig::default(),
        builtin_catalog(),
    )
}

/// Market value under the built-in catalog
pub fn valuate(individual: &Individual) -> u64 {
    valuation::valuate(individual, builtin_catalog())
}

/// Random starter genotype
pub fn random_genotype() -> Genotype {
    genotype::random_genotype(&mut rand::thread_rng(), builtin_catalog())
}

//! The genotype aggregate owned by one fish

use rand::Rng;
use serde::{Deserialize, Serialize};
use shoal_catalog::{ColorGeneId, GeneCatalog};

use crate::error::Result;
use crate::generational::{apply_atavism, AtavismRule, GenerationalData};
use crate::genome::Genome;
use crate::phenotype::resolve_phenotype;
use crate::polygenic::{PolygenicTraits, SpotPhenotype};
use crate::spots::Spot;

/// Lightness that leaves the base color unchanged
pub const DEFAULT_LIGHTNESS: f32 = 50.0;

/// Most spots a randomly seeded fish starts with
pub const MAX_SEED_SPOTS: usize = 3;

fn default_lightness() -> f32 {
    DEFAULT_LIGHTNESS
}

/// Everything heritable about one fish.
///
/// Genotypes are never edited in place by the engine; breeding reads two of
/// them and builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    pub genome: Genome,

    #[serde(default)]
    pub spots: Vec<Spot>,

    /// Lightness offset (0 - 100, 50 = neutral)
    #[serde(default = "default_lightness")]
    pub lightness: f32,

    /// Missing on fish saved before spot traits existed
    #[serde(default)]
    pub polygenic: Option<PolygenicTraits>,

    #[serde(default)]
    pub generational: GenerationalData,
}

impl Genotype {
    /// Deterministic starter fish expressing `gene`: two copies, no spots,
    /// neutral lightness, no polygenic traits.
    pub fn seed(gene: ColorGeneId) -> Self {
        Self {
            genome: Genome::new(vec![gene, gene]),
            spots: Vec::new(),
            lightness: DEFAULT_LIGHTNESS,
            polygenic: None,
            generational: GenerationalData::default(),
        }
    }

    /// Color this genotype expresses
    pub fn phenotype(&self, catalog: &GeneCatalog) -> ColorGeneId {
        resolve_phenotype(&self.genome, catalog)
    }

    /// Lightness clamped to 0 - 100 (saved data may be out of range)
    pub fn clamped_lightness(&self) -> f32 {
        if self.lightness.is_nan() {
            return DEFAULT_LIGHTNESS;
        }
        self.lightness.clamp(0.0, 100.0)
    }

    /// Expressed spot parameters, or `None` without polygenic traits
    pub fn spot_phenotype(&self) -> Result<Option<SpotPhenotype>> {
        self.polygenic
            .as_ref()
            .map(PolygenicTraits::express)
            .transpose()
    }

    /// Expressed spot parameters with a chance of ancestral reversion
    pub fn spot_phenotype_with_atavism<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        rule: &AtavismRule,
    ) -> Result<Option<SpotPhenotype>> {
        Ok(self
            .spot_phenotype()?
            .map(|own| apply_atavism(rng, own, &self.generational, rule)))
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn from_ron(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }
}

/// Random starter fish: a uniformly chosen gene in two copies, a few spots,
/// random lightness and a fresh polygenic trait set.
pub fn random_genotype<R: Rng + ?Sized>(rng: &mut R, catalog: &GeneCatalog) -> Genotype {
    let genes = catalog.genes();
    let gene = genes[rng.gen_range(0..genes.len())].id;
    let spot_count = rng.gen_range(0..=MAX_SEED_SPOTS);

    Genotype {
        genome: Genome::new(vec![gene, gene]),
        spots: (0..spot_count).map(|_| Spot::random(rng, catalog)).collect(),
        lightness: rng.gen_range(0.0..=100.0),
        polygenic: Some(PolygenicTraits::random(rng)),
        generational: GenerationalData::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_seed_expresses_its_gene() {
        let catalog = GeneCatalog::new();
        for gene in ColorGeneId::ALL {
            assert_eq!(Genotype::seed(gene).phenotype(&catalog), gene);
        }
    }

    #[test]
    fn test_random_genotype_shape() {
        let catalog = GeneCatalog::new();
        let mut rng = seeded(100);
        for _ in 0..50 {
            let genotype = random_genotype(&mut rng, &catalog);
            assert_eq!(genotype.genome.len(), 2);
            assert!(genotype.spots.len() <= MAX_SEED_SPOTS);
            assert!((0.0..=100.0).contains(&genotype.lightness));
            assert!(genotype.polygenic.is_some());
            assert_eq!(genotype.generational.generation, 0);
        }
    }

    #[test]
    fn test_clamped_lightness() {
        let mut genotype = Genotype::seed(ColorGeneId::Red);
        genotype.lightness = 140.0;
        assert_eq!(genotype.clamped_lightness(), 100.0);
        genotype.lightness = -3.0;
        assert_eq!(genotype.clamped_lightness(), 0.0);
    }

    #[test]
    fn test_minimal_ron_uses_defaults() {
        let genotype = Genotype::from_ron("(genome: [BLUE, BLUE])").expect("Failed to parse");
        assert_eq!(genotype.lightness, DEFAULT_LIGHTNESS);
        assert!(genotype.spots.is_empty());
        assert!(genotype.polygenic.is_none());
        assert_eq!(genotype.phenotype(&GeneCatalog::new()), ColorGeneId::Blue);
    }

    #[test]
    fn test_ron_round_trip() {
        let catalog = GeneCatalog::new();
        let mut rng = seeded(8);
        let genotype = random_genotype(&mut rng, &catalog);

        let text = genotype.to_ron().expect("Failed to serialize genotype");
        let restored = Genotype::from_ron(&text).expect("Failed to parse genotype");
        assert_eq!(restored, genotype);
    }

    #[test]
    fn test_spot_phenotype_without_traits() {
        let genotype = Genotype::seed(ColorGeneId::Red);
        assert_eq!(genotype.spot_phenotype().unwrap(), None);
    }
}

//! Market valuation of an individual
//!
//! Value is a pure function of genotype, growth stage and condition. Rarer
//! expressed colors, rare carried genes, extreme lightness and many rare spots
//! all add to the price; poor condition cuts it.

use serde::{Deserialize, Serialize};
use shoal_catalog::GeneCatalog;

use crate::genotype::Genotype;

pub const BASE_VALUE: f64 = 100.0;
pub const PHENOTYPE_FACTOR: f64 = 50.0;
pub const CARRIED_GENE_FACTOR: f64 = 5.0;
pub const LIGHTNESS_FACTOR: f64 = 0.5;
pub const SPOT_COUNT_FACTOR: f64 = 5.0;
pub const SPOT_COUNT_CURVE_FACTOR: f64 = 2.0;
pub const SPOT_COLOR_FACTOR: f64 = 3.0;

/// At or below this stamina (or when sick) a fish is worthless
pub const WORTHLESS_STAMINA: f32 = 10.0;
/// At or below this stamina the value is quartered
pub const WEAK_STAMINA: f32 = 40.0;
/// At or below this stamina the value is halved
pub const TIRED_STAMINA: f32 = 60.0;

/// Growth stage of an individual
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    #[default]
    Immature,
    Juvenile,
    Adult,
}

impl GrowthStage {
    pub fn value_multiplier(&self) -> f64 {
        match self {
            Self::Immature => 1.0,
            Self::Juvenile => 1.5,
            Self::Adult => 2.0,
        }
    }
}

/// A fish as seen by the market: genotype plus lifecycle and condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genotype: Genotype,
    #[serde(default)]
    pub stage: GrowthStage,
    /// Stamina (0 - 100)
    #[serde(default = "full_stamina")]
    pub stamina: f32,
    /// Currently afflicted by an illness
    #[serde(default)]
    pub sick: bool,
}

fn full_stamina() -> f32 {
    100.0
}

impl Individual {
    /// Healthy individual at full stamina
    pub fn new(genotype: Genotype, stage: GrowthStage) -> Self {
        Self {
            genotype,
            stage,
            stamina: full_stamina(),
            sick: false,
        }
    }
}

/// Each additive term of a valuation, before stage and condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationBreakdown {
    pub base: f64,
    pub phenotype: f64,
    pub carried_genes: f64,
    pub lightness: f64,
    pub spot_count: f64,
    pub spot_colors: f64,
    pub stage_multiplier: f64,
    pub condition_multiplier: f64,
}

impl ValuationBreakdown {
    pub fn subtotal(&self) -> f64 {
        self.base
            + self.phenotype
            + self.carried_genes
            + self.lightness
            + self.spot_count
            + self.spot_colors
    }

    /// Final value, floored
    pub fn total(&self) -> u64 {
        let value = self.subtotal() * self.stage_multiplier * self.condition_multiplier;
        value.max(0.0).floor() as u64
    }
}

/// Multiplier applied for the individual's condition (0.0 for worthless fish)
pub fn condition_multiplier(stamina: f32, sick: bool) -> f64 {
    if sick || stamina <= WORTHLESS_STAMINA || stamina.is_nan() {
        0.0
    } else if stamina <= WEAK_STAMINA {
        0.25
    } else if stamina <= TIRED_STAMINA {
        0.5
    } else {
        1.0
    }
}

/// Compute every term of an individual's value
pub fn value_breakdown(individual: &Individual, catalog: &GeneCatalog) -> ValuationBreakdown {
    let genotype = &individual.genotype;
    let rarity = |gene| catalog.rarity(gene) as f64;

    let expressed = genotype.phenotype(catalog);

    let carried_genes: f64 = genotype
        .genome
        .iter()
        .filter(|&&gene| gene != catalog.default_gene())
        .map(|&gene| rarity(gene) * CARRIED_GENE_FACTOR)
        .sum();

    let lightness_offset = (genotype.clamped_lightness() as f64 - 50.0).abs();

    let spots = genotype.spots.len() as f64;
    let spot_colors: f64 = genotype.spots.iter().map(|s| rarity(s.color)).sum();

    ValuationBreakdown {
        base: BASE_VALUE,
        phenotype: rarity(expressed) * PHENOTYPE_FACTOR,
        carried_genes,
        lightness: lightness_offset.powi(2) * LIGHTNESS_FACTOR,
        // n^1.5 via sqrt keeps whole-number counts exact
        spot_count: spots * SPOT_COUNT_FACTOR + spots * spots.sqrt() * SPOT_COUNT_CURVE_FACTOR,
        spot_colors: spot_colors * SPOT_COLOR_FACTOR,
        stage_multiplier: individual.stage.value_multiplier(),
        condition_multiplier: condition_multiplier(individual.stamina, individual.sick),
    }
}

/// Market value of an individual
pub fn valuate(individual: &Individual, catalog: &GeneCatalog) -> u64 {
    value_breakdown(individual, catalog).total()
}

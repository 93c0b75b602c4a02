//! Breeding configuration - serializable mutation and inheritance parameters
//!
//! All fields have defaults, so a RON file only needs to name what it changes:
//!
//! ```ron
//! (substitution_rate: 0.05, genome_ceiling: 16)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GeneticsError, Result};
use crate::generational::AtavismRule;

/// Largest lightness drift that still fits the 0 - 100 lightness scale
pub const MAX_LIGHTNESS_JITTER: f32 = 100.0;

/// Mutation and inheritance parameters for one breeding run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    /// Chance per gamete entry of being replaced by a sampled gene
    pub substitution_rate: f32,
    /// Chance per gamete of gaining one extra sampled gene
    pub expansion_rate: f32,
    /// Chance per gamete of losing one gene (never below one entry)
    pub deletion_rate: f32,

    /// Chance per breeding of force-overwriting one slot of one gamete
    pub special_mutation_rate: f32,
    /// Given a special mutation, chance that the other gamete is hit as well
    pub double_special_rate: f32,

    /// Genome length above which the trailing gene may be pruned
    pub genome_ceiling: usize,
    /// Chance of pruning once the ceiling is exceeded
    pub prune_rate: f32,

    /// Chance of an inherited spot changing color, and of a new spot
    /// getting a freshly sampled color instead of a parental one
    pub spot_color_mutation_rate: f32,

    /// Maximum drift (either direction) applied to the parents' mean lightness
    pub lightness_jitter: f32,

    /// Reversion to a recorded ancestor's spot appearance
    pub atavism: AtavismRule,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            substitution_rate: 0.02,
            expansion_rate: 0.01,
            deletion_rate: 0.01,
            special_mutation_rate: 0.005,
            double_special_rate: 0.1,
            genome_ceiling: 12,
            prune_rate: 0.5,
            spot_color_mutation_rate: 0.05,
            lightness_jitter: 5.0,
            atavism: AtavismRule::default(),
        }
    }
}

impl BreedingConfig {
    /// Config with every random mutation switched off (inheritance only)
    pub fn without_mutation() -> Self {
        Self {
            substitution_rate: 0.0,
            expansion_rate: 0.0,
            deletion_rate: 0.0,
            special_mutation_rate: 0.0,
            double_special_rate: 0.0,
            spot_color_mutation_rate: 0.0,
            lightness_jitter: 0.0,
            ..Self::default()
        }
    }

    /// Parse from RON and validate
    pub fn from_ron(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every probability is in [0, 1] and the remaining values are usable
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("substitution_rate", self.substitution_rate),
            ("expansion_rate", self.expansion_rate),
            ("deletion_rate", self.deletion_rate),
            ("special_mutation_rate", self.special_mutation_rate),
            ("double_special_rate", self.double_special_rate),
            ("prune_rate", self.prune_rate),
            ("spot_color_mutation_rate", self.spot_color_mutation_rate),
            ("atavism.chance", self.atavism.chance),
        ];

        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneticsError::InvalidConfig(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=MAX_LIGHTNESS_JITTER).contains(&self.lightness_jitter) {
            return Err(GeneticsError::InvalidConfig(format!(
                "lightness_jitter must be within 0.0..={}, got {}",
                MAX_LIGHTNESS_JITTER, self.lightness_jitter
            )));
        }

        if self.genome_ceiling == 0 {
            return Err(GeneticsError::InvalidConfig(
                "genome_ceiling must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

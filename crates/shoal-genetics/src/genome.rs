//! Variable-length color genome
//!
//! Unlike a diploid chromosome pair, a fish may carry any number of color gene
//! copies. Expression is decided by multiplicity, so the genome is an ordered
//! list with a frequency view rather than a fixed-arity struct.

use ahash::HashMap;
use serde::{Deserialize, Serialize};
use shoal_catalog::ColorGeneId;

/// Ordered collection of color gene copies owned by one individual
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(Vec<ColorGeneId>);

impl Genome {
    pub fn new(genes: Vec<ColorGeneId>) -> Self {
        Self(genes)
    }

    /// Genome holding a single copy of `gene`
    pub fn single(gene: ColorGeneId) -> Self {
        Self(vec![gene])
    }

    pub fn genes(&self) -> &[ColorGeneId] {
        &self.0
    }

    pub(crate) fn genes_mut(&mut self) -> &mut Vec<ColorGeneId> {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorGeneId> {
        self.0.iter()
    }

    /// Number of copies of each gene present
    pub fn counts(&self) -> HashMap<ColorGeneId, usize> {
        let mut counts = HashMap::default();
        for &gene in &self.0 {
            *counts.entry(gene).or_insert(0) += 1;
        }
        counts
    }

    /// Number of copies of `gene`
    pub fn count_of(&self, gene: ColorGeneId) -> usize {
        self.0.iter().filter(|&&g| g == gene).count()
    }

    pub fn into_inner(self) -> Vec<ColorGeneId> {
        self.0
    }
}

impl From<Vec<ColorGeneId>> for Genome {
    fn from(genes: Vec<ColorGeneId>) -> Self {
        Self(genes)
    }
}

impl FromIterator<ColorGeneId> for Genome {
    fn from_iter<I: IntoIterator<Item = ColorGeneId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

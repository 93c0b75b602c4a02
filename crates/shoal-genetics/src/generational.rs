//! Generation tracking and ancestor snapshots
//!
//! Each breeding records the parents' expressed spot phenotypes on the child so
//! that a later generation can revert to an ancestor's look (atavism).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::genotype::Genotype;
use crate::polygenic::SpotPhenotype;
use crate::rng::GeneticRng;

/// Spot phenotypes of the two parents at breeding time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AncestorTraits {
    pub maternal: Option<SpotPhenotype>,
    pub paternal: Option<SpotPhenotype>,
}

impl AncestorTraits {
    pub fn is_empty(&self) -> bool {
        self.maternal.is_none() && self.paternal.is_none()
    }

    fn recorded(&self) -> Vec<SpotPhenotype> {
        self.maternal.iter().chain(self.paternal.iter()).copied().collect()
    }
}

/// Lineage data carried by every genotype
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationalData {
    /// 0 for seeded fish, parents' maximum + 1 for bred ones
    pub generation: u32,
    #[serde(default)]
    pub ancestors: AncestorTraits,
}

/// Derive a child's lineage data from its parents.
///
/// Ancestor snapshots are taken only from parents that carry polygenic traits.
pub fn derive_generational_data(
    maternal: &Genotype,
    paternal: &Genotype,
) -> Result<GenerationalData> {
    let generation = maternal
        .generational
        .generation
        .max(paternal.generational.generation)
        .saturating_add(1);

    Ok(GenerationalData {
        generation,
        ancestors: AncestorTraits {
            maternal: maternal.spot_phenotype()?,
            paternal: paternal.spot_phenotype()?,
        },
    })
}

/// Chance that a fish shows a recorded ancestor's spot appearance instead of its own.
///
/// Defaults to 0.0, so reversion never happens unless a caller opts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtavismRule {
    pub chance: f32,
}

impl AtavismRule {
    pub fn new(chance: f32) -> Self {
        Self { chance }
    }
}

/// Possibly replace an expressed phenotype with an ancestor snapshot.
///
/// With probability `rule.chance`, and only when at least one ancestor was
/// recorded, a uniformly chosen ancestor's phenotype is returned.
pub fn apply_atavism<R: Rng + ?Sized>(
    rng: &mut R,
    own: SpotPhenotype,
    lineage: &GenerationalData,
    rule: &AtavismRule,
) -> SpotPhenotype {
    let ancestors = lineage.ancestors.recorded();
    if ancestors.is_empty() || !rng.check_probability(rule.chance) {
        return own;
    }

    let ancestor = ancestors[rng.gen_range(0..ancestors.len())];
    log::debug!(
        "Atavism: generation {} reverts to an ancestor's spot phenotype",
        lineage.generation
    );
    ancestor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygenic::PolygenicTraits;
    use crate::rng::seeded;
    use shoal_catalog::ColorGeneId;

    fn genotype_with_traits(generation: u32, seed: u64) -> Genotype {
        let mut rng = seeded(seed);
        let mut genotype = Genotype::seed(ColorGeneId::Red);
        genotype.polygenic = Some(PolygenicTraits::random(&mut rng));
        genotype.generational.generation = generation;
        genotype
    }

    #[test]
    fn test_generation_is_max_plus_one() {
        let a = genotype_with_traits(3, 1);
        let b = genotype_with_traits(7, 2);
        let data = derive_generational_data(&a, &b).unwrap();
        assert_eq!(data.generation, 8);
    }

    #[test]
    fn test_generation_saturates_at_max() {
        let a = genotype_with_traits(u32::MAX, 1);
        let b = genotype_with_traits(4, 2);
        let data = derive_generational_data(&a, &b).unwrap();
        assert_eq!(data.generation, u32::MAX);
    }

    #[test]
    fn test_snapshots_are_parent_phenotypes() {
        let a = genotype_with_traits(0, 1);
        let b = genotype_with_traits(0, 2);
        let data = derive_generational_data(&a, &b).unwrap();
        assert_eq!(data.ancestors.maternal, a.spot_phenotype().unwrap());
        assert_eq!(data.ancestors.paternal, b.spot_phenotype().unwrap());
        assert_eq!(data.generation, 1);
    }

    #[test]
    fn test_parent_without_traits_leaves_slot_empty() {
        let a = genotype_with_traits(0, 1);
        let b = Genotype::seed(ColorGeneId::Cream);
        let data = derive_generational_data(&a, &b).unwrap();
        assert!(data.ancestors.maternal.is_some());
        assert!(data.ancestors.paternal.is_none());
    }

    #[test]
    fn test_atavism_disabled_by_default() {
        let a = genotype_with_traits(0, 1);
        let b = genotype_with_traits(0, 2);
        let lineage = derive_generational_data(&a, &b).unwrap();
        let own = genotype_with_traits(0, 3).spot_phenotype().unwrap().unwrap();

        let mut rng = seeded(4);
        for _ in 0..100 {
            let shown = apply_atavism(&mut rng, own, &lineage, &AtavismRule::default());
            assert_eq!(shown, own);
        }
    }

    #[test]
    fn test_atavism_always_reverts_when_certain() {
        let a = genotype_with_traits(0, 1);
        let b = genotype_with_traits(0, 2);
        let lineage = derive_generational_data(&a, &b).unwrap();
        let own = genotype_with_traits(0, 3).spot_phenotype().unwrap().unwrap();

        let mut rng = seeded(4);
        for _ in 0..100 {
            let shown = apply_atavism(&mut rng, own, &lineage, &AtavismRule::new(1.0));
            assert!(Some(shown) == lineage.ancestors.maternal || Some(shown) == lineage.ancestors.paternal);
        }
    }

    #[test]
    fn test_atavism_without_ancestors_keeps_own() {
        let own = genotype_with_traits(0, 3).spot_phenotype().unwrap().unwrap();
        let mut rng = seeded(4);
        let shown = apply_atavism(&mut rng, own, &GenerationalData::default(), &AtavismRule::new(1.0));
        assert_eq!(shown, own);
    }
}

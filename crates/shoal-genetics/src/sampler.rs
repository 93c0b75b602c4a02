//! Weighted trait sampling
//!
//! Mutations and new spot colors are drawn with probability proportional to the
//! inverse of each gene's rarity weight, so rare genes stay rare.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use shoal_catalog::{ColorGeneId, GeneCatalog};

/// Pick one candidate with probability proportional to `weight`.
///
/// Returns `None` for an empty candidate set or when no candidate has a
/// positive, finite weight.
pub fn pick_weighted<T, R, F>(rng: &mut R, candidates: &[T], weight: F) -> Option<T>
where
    T: Copy,
    R: Rng + ?Sized,
    F: Fn(&T) -> f32,
{
    let weights: Vec<f32> = candidates
        .iter()
        .map(|c| {
            let w = weight(c);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                0.0
            }
        })
        .collect();

    let index = WeightedIndex::new(&weights).ok()?;
    candidates.get(index.sample(rng)).copied()
}

/// Draw a mutation color from the recessive genes, weighted by inverse rarity
pub fn sample_color<R: Rng + ?Sized>(rng: &mut R, catalog: &GeneCatalog) -> ColorGeneId {
    let candidates = catalog.recessive_genes();
    pick_weighted(rng, &candidates, |&gene| 1.0 / catalog.rarity(gene))
        .unwrap_or_else(|| catalog.default_gene())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use std::collections::HashMap;

    #[test]
    fn test_pick_weighted_empty() {
        let mut rng = seeded(1);
        let empty: [u8; 0] = [];
        assert_eq!(pick_weighted(&mut rng, &empty, |_| 1.0), None);
    }

    #[test]
    fn test_pick_weighted_all_zero() {
        let mut rng = seeded(1);
        assert_eq!(pick_weighted(&mut rng, &[1, 2, 3], |_| 0.0), None);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weight() {
        let mut rng = seeded(7);
        for _ in 0..200 {
            let pick = pick_weighted(&mut rng, &[1, 2, 3], |&v| if v == 2 { 0.0 } else { 1.0 });
            assert_ne!(pick, Some(2));
        }
    }

    #[test]
    fn test_sample_color_never_default() {
        let catalog = GeneCatalog::new();
        let mut rng = seeded(99);
        for _ in 0..500 {
            assert_ne!(sample_color(&mut rng, &catalog), ColorGeneId::Cream);
        }
    }

    #[test]
    fn test_sample_color_favors_common_genes() {
        let catalog = GeneCatalog::new();
        let mut rng = seeded(2024);
        let mut counts: HashMap<ColorGeneId, usize> = HashMap::new();

        for _ in 0..5000 {
            *counts.entry(sample_color(&mut rng, &catalog)).or_default() += 1;
        }

        // White (rarity 2) is five times as likely as Platinum (rarity 10)
        let white = counts.get(&ColorGeneId::White).copied().unwrap_or(0);
        let platinum = counts.get(&ColorGeneId::Platinum).copied().unwrap_or(0);
        assert!(
            white > platinum * 2,
            "white={} platinum={}",
            white,
            platinum
        );
    }
}

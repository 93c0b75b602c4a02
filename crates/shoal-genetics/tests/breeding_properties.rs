//! Integration tests for breeding, phenotype resolution and valuation
//!
//! These exercise the public API end to end with seeded generators.

use rand::seq::SliceRandom;
use shoal_genetics::{
    breed_with,
    gamete::{gamete, gamete_size},
    phenotype::resolve_phenotype,
    rng::seeded,
    valuation::valuate,
    BreedingConfig, Breeder, ColorGeneId, GeneCatalog, Genome, Genotype, GrowthStage, Individual,
};

use ColorGeneId::*;

// ============================================================================
// Phenotype Resolution
// ============================================================================

#[test]
fn test_phenotype_is_permutation_invariant() {
    let catalog = GeneCatalog::new();
    let mut rng = seeded(11);
    let genes = vec![Blue, Red, Blue, Cream, Red, Platinum, Cream, White];
    let expected = resolve_phenotype(&Genome::new(genes.clone()), &catalog);
    assert_eq!(expected, Red);

    for _ in 0..50 {
        let mut shuffled = genes.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(resolve_phenotype(&Genome::new(shuffled), &catalog), expected);
    }
}

#[test]
fn test_phenotype_is_always_a_catalog_gene() {
    let catalog = GeneCatalog::new();
    let mut breeder = Breeder::seeded(12);
    for _ in 0..100 {
        let genotype = breeder.random_genotype();
        let expressed = genotype.phenotype(&catalog);
        assert!(ColorGeneId::ALL.contains(&expressed));
    }
}

// ============================================================================
// Gametes and Genomes
// ============================================================================

#[test]
fn test_gamete_length_bounds() {
    let catalog = GeneCatalog::new();
    let config = BreedingConfig::default();
    let mut rng = seeded(21);

    for len in 0..16 {
        let genome: Genome = ColorGeneId::ALL.iter().cycle().take(len).copied().collect();
        for _ in 0..20 {
            let (formed, _) = gamete(&mut rng, &genome, &config, &catalog);
            assert!(!formed.is_empty());
            assert!(formed.len() <= gamete_size(len) + 1);
        }
    }
}

#[test]
fn test_single_gene_gamete_without_mutation() {
    let catalog = GeneCatalog::new();
    let config = BreedingConfig::without_mutation();
    let mut rng = seeded(22);

    let (formed, mutations) = gamete(&mut rng, &Genome::single(Orange), &config, &catalog);
    assert_eq!(formed.genes(), &[Orange]);
    assert!(mutations.is_empty());
}

#[test]
fn test_breeding_never_yields_empty_genome() {
    let catalog = GeneCatalog::new();
    let mut config = BreedingConfig::default();
    config.deletion_rate = 1.0;
    config.substitution_rate = 0.5;
    let mut rng = seeded(23);

    let mut a = Genotype::seed(Red);
    a.genome = Genome::new(Vec::new());
    let b = Genotype::seed(Cream);

    for _ in 0..200 {
        let child = breed_with(&mut rng, &a, &b, &config, &catalog)
            .expect("Failed to breed")
            .genotype;
        assert!(!child.genome.is_empty());
    }
}

#[test]
fn test_pure_lines_breed_true() {
    let catalog = GeneCatalog::new();
    let config = BreedingConfig::without_mutation();
    let mut rng = seeded(24);

    for gene in [Cream, Black] {
        let parent = Genotype::seed(gene);
        let child = breed_with(&mut rng, &parent, &parent, &config, &catalog)
            .expect("Failed to breed")
            .genotype;
        assert_eq!(child.genome.genes(), &[gene, gene]);
        assert_eq!(child.phenotype(&catalog), gene);
    }
}

#[test]
fn test_genome_length_stays_bounded() {
    let catalog = GeneCatalog::new();
    let mut config = BreedingConfig::default();
    config.expansion_rate = 1.0;
    config.deletion_rate = 0.0;
    config.prune_rate = 1.0;
    let mut rng = seeded(25);

    let mut lineage = Genotype::seed(Blue);
    for _ in 0..60 {
        lineage = breed_with(&mut rng, &lineage, &lineage, &config, &catalog)
            .expect("Failed to breed")
            .genotype;
        assert!(lineage.genome.len() <= config.genome_ceiling + 1);
    }
}

// ============================================================================
// Spots
// ============================================================================

#[test]
fn test_spotless_parents_gain_at_most_one_spot() {
    let mut breeder = Breeder::seeded(30);
    let a = Genotype::seed(Yellow);
    let b = Genotype::seed(Blue);

    for outcome in breeder.breed_litter(&a, &b, 50).expect("Failed to breed") {
        assert!(outcome.genotype.spots.len() <= 1);
    }
}

#[test]
fn test_offspring_spots_stay_in_bounds() {
    let mut breeder = Breeder::seeded(31);
    let a = breeder.random_genotype();
    let b = breeder.random_genotype();

    for outcome in breeder.breed_litter(&a, &b, 50).expect("Failed to breed") {
        for spot in &outcome.genotype.spots {
            assert!((0.0..=100.0).contains(&spot.x));
            assert!((0.0..=100.0).contains(&spot.y));
            assert!((4.0..=30.0).contains(&spot.size));
            assert!(spot.shape.is_some());
        }
    }
}

// ============================================================================
// Lineage and Determinism
// ============================================================================

#[test]
fn test_generation_increments_over_lineage() {
    let mut breeder = Breeder::seeded(41);
    let founder = breeder.random_genotype();
    let mut current = founder.clone();

    for expected in 1..=5 {
        current = breeder.breed(&current, &founder).expect("Failed to breed").genotype;
        assert_eq!(current.generational.generation, expected);
        assert!(current.generational.ancestors.maternal.is_some());
        assert!(current.generational.ancestors.paternal.is_some());
    }
}

#[test]
fn test_breeding_oldest_lineage_does_not_overflow() {
    let catalog = GeneCatalog::new();
    let config = BreedingConfig::default();
    let mut rng = seeded(40);
    let mut elder = Genotype::seed(Orange);
    elder.generational.generation = u32::MAX;

    let child = breed_with(&mut rng, &elder, &elder, &config, &catalog)
        .expect("Failed to breed")
        .genotype;
    assert_eq!(child.generational.generation, u32::MAX);
}

#[test]
fn test_breeding_leaves_parents_untouched() {
    let mut breeder = Breeder::seeded(42);
    let a = breeder.random_genotype();
    let b = breeder.random_genotype();
    let snapshot = (a.clone(), b.clone());

    breeder.breed_litter(&a, &b, 10).expect("Failed to breed");
    assert_eq!((a, b), snapshot);
}

#[test]
fn test_same_seed_same_offspring() {
    let a = Genotype::seed(Platinum);
    let b = Genotype::seed(Red);

    let first = Breeder::seeded(43).breed(&a, &b).expect("Failed to breed");
    let second = Breeder::seeded(43).breed(&a, &b).expect("Failed to breed");
    assert_eq!(first, second);
}

// ============================================================================
// Valuation
// ============================================================================

#[test]
fn test_worthless_when_exhausted_or_sick() {
    let catalog = GeneCatalog::new();
    let mut breeder = Breeder::seeded(51);

    for _ in 0..20 {
        let mut fish = Individual::new(breeder.random_genotype(), GrowthStage::Adult);
        fish.stamina = 10.0;
        assert_eq!(valuate(&fish, &catalog), 0);

        fish.stamina = 100.0;
        fish.sick = true;
        assert_eq!(valuate(&fish, &catalog), 0);
    }
}

#[test]
fn test_rarest_adult_value() {
    let catalog = GeneCatalog::new();
    let rarest = catalog.rarest();
    let rarity = catalog.rarity(rarest) as f64;
    let fish = Individual::new(Genotype::seed(rarest), GrowthStage::Adult);

    let expected = ((100.0 + rarity * 50.0 + 2.0 * rarity * 5.0) * 2.0).floor() as u64;
    assert_eq!(valuate(&fish, &catalog), expected);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_ron_round_trip_preserves_phenotype_and_value() {
    let catalog = GeneCatalog::new();
    let mut breeder = Breeder::seeded(61);
    let a = breeder.random_genotype();
    let b = breeder.random_genotype();
    let child = breeder.breed(&a, &b).expect("Failed to breed").genotype;

    let text = child.to_ron().expect("Failed to serialize");
    let restored = Genotype::from_ron(&text).expect("Failed to deserialize");

    assert_eq!(restored.phenotype(&catalog), child.phenotype(&catalog));
    assert_eq!(
        valuate(&Individual::new(restored, GrowthStage::Juvenile), &catalog),
        valuate(&Individual::new(child, GrowthStage::Juvenile), &catalog)
    );
}

#[test]
fn test_bincode_round_trip_preserves_genotype() {
    let mut breeder = Breeder::seeded(62);
    let a = breeder.random_genotype();
    let b = breeder.random_genotype();
    let child = breeder.breed(&a, &b).expect("Failed to breed").genotype;

    let serialized = bincode_next::serde::encode_to_vec(&child, bincode_next::config::standard())
        .expect("Failed to serialize");
    let (restored, _): (Genotype, usize) =
        bincode_next::serde::decode_from_slice(&serialized, bincode_next::config::standard())
            .expect("Failed to deserialize");

    assert_eq!(restored, child);
}

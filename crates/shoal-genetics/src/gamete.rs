//! Gamete formation and color gene mutation
//!
//! Each parent contributes a shuffled half of its genome. Entries may then be
//! substituted, the gamete may grow or shrink by one gene, and rarely a special
//! mutation overwrites a slot outright. Every change is reported back as a
//! `Mutation` so callers can surface it.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shoal_catalog::{ColorGeneId, GeneCatalog};

use crate::config::BreedingConfig;
use crate::genome::Genome;
use crate::rng::GeneticRng;
use crate::sampler::sample_color;

/// How a gene came to differ from what the parents carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// A gamete entry was replaced by a sampled gene
    Substitution,
    /// A sampled gene was appended to a gamete
    Expansion,
    /// A gene was dropped from a gamete
    Deletion,
    /// A gamete slot was force-overwritten
    Special,
}

/// A single observable mutation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub kind: MutationKind,
    /// The gene introduced (or, for deletions, removed)
    pub gene: ColorGeneId,
}

impl Mutation {
    fn new(kind: MutationKind, gene: ColorGeneId) -> Self {
        Self { kind, gene }
    }
}

/// Number of genes a parent of the given genome length contributes
pub fn gamete_size(genome_len: usize) -> usize {
    (genome_len / 2).max(1)
}

/// Form a gamete from a parent genome.
///
/// The result holds `max(1, len / 2)` shuffled genes, plus at most one from an
/// expansion mutation. It is never empty.
pub fn gamete<R: Rng + ?Sized>(
    rng: &mut R,
    genome: &Genome,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> (Genome, Vec<Mutation>) {
    let mut genes = genome.genes().to_vec();
    if genes.is_empty() {
        log::warn!("Forming gamete from empty genome, using default gene");
        genes.push(catalog.default_gene());
    }

    genes.shuffle(rng);
    genes.truncate(gamete_size(genes.len()));

    let mut mutations = Vec::new();

    for slot in genes.iter_mut() {
        if rng.check_probability(config.substitution_rate) {
            let gene = sample_color(rng, catalog);
            log::trace!("Substitution: {} -> {}", slot, gene);
            *slot = gene;
            mutations.push(Mutation::new(MutationKind::Substitution, gene));
        }
    }

    if rng.check_probability(config.expansion_rate) {
        let gene = sample_color(rng, catalog);
        log::trace!("Expansion: +{}", gene);
        genes.push(gene);
        mutations.push(Mutation::new(MutationKind::Expansion, gene));
    } else if genes.len() > 1 && rng.check_probability(config.deletion_rate) {
        let index = rng.gen_range(0..genes.len());
        let gene = genes.remove(index);
        log::trace!("Deletion: -{}", gene);
        mutations.push(Mutation::new(MutationKind::Deletion, gene));
    }

    (Genome::new(genes), mutations)
}

/// Rare forced mutation across a gamete pair.
///
/// With `special_mutation_rate`, one random slot of one gamete is overwritten
/// with a sampled gene; with `double_special_rate` on top, the other gamete is
/// hit as well.
pub fn special_mutation<R: Rng + ?Sized>(
    rng: &mut R,
    first: &mut Genome,
    second: &mut Genome,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Vec<Mutation> {
    let mut mutations = Vec::new();
    if !rng.check_probability(config.special_mutation_rate) {
        return mutations;
    }

    let both = rng.check_probability(config.double_special_rate);
    let (primary, secondary) = if rng.coin_flip() {
        (first, second)
    } else {
        (second, first)
    };

    mutations.extend(overwrite_slot(rng, primary, catalog));
    if both {
        mutations.extend(overwrite_slot(rng, secondary, catalog));
    }

    mutations
}

fn overwrite_slot<R: Rng + ?Sized>(
    rng: &mut R,
    gamete: &mut Genome,
    catalog: &GeneCatalog,
) -> Option<Mutation> {
    let genes = gamete.genes_mut();
    if genes.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..genes.len());
    let gene = sample_color(rng, catalog);
    log::debug!("Special mutation: slot {} {} -> {}", index, genes[index], gene);
    genes[index] = gene;
    Some(Mutation::new(MutationKind::Special, gene))
}

/// Join two gametes into an offspring genome.
///
/// Above `genome_ceiling` the trailing gene is dropped with `prune_rate`, which
/// keeps genome length bounded over many generations. An empty result becomes
/// a single default gene.
pub fn combine_gametes<R: Rng + ?Sized>(
    rng: &mut R,
    first: &Genome,
    second: &Genome,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Genome {
    let mut genes: Vec<ColorGeneId> = first.iter().chain(second.iter()).copied().collect();

    if genes.len() > config.genome_ceiling && rng.check_probability(config.prune_rate) {
        if let Some(pruned) = genes.pop() {
            log::trace!("Pruned trailing {} (length {})", pruned, genes.len() + 1);
        }
    }

    if genes.is_empty() {
        log::warn!("Combined genome is empty, injecting default gene");
        genes.push(catalog.default_gene());
    }

    Genome::new(genes)
}

/// Breed two genomes: gametes, special mutation, combination
pub fn breed_genomes<R: Rng + ?Sized>(
    rng: &mut R,
    a: &Genome,
    b: &Genome,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> (Genome, Vec<Mutation>) {
    let (mut gamete_a, mut mutations) = gamete(rng, a, config, catalog);
    let (mut gamete_b, mutations_b) = gamete(rng, b, config, catalog);
    mutations.extend(mutations_b);

    mutations.extend(special_mutation(
        rng,
        &mut gamete_a,
        &mut gamete_b,
        config,
        catalog,
    ));

    let genome = combine_gametes(rng, &gamete_a, &gamete_b, config, catalog);
    (genome, mutations)
}

//! Phenotype resolution: which color a genome actually shows

use shoal_catalog::{ColorGeneId, GeneCatalog};

use crate::genome::Genome;

/// Copies of a gene needed before it can be expressed
pub const EXPRESSION_THRESHOLD: usize = 2;

/// Resolve a genome to its single expressed color.
///
/// A gene is a candidate once it reaches `EXPRESSION_THRESHOLD` copies. With no
/// candidate the catalog's default gene is expressed; with several, the one
/// earliest in the dominance order wins regardless of copy count.
pub fn resolve_phenotype(genome: &Genome, catalog: &GeneCatalog) -> ColorGeneId {
    genome
        .counts()
        .into_iter()
        .filter(|&(_, count)| count >= EXPRESSION_THRESHOLD)
        .map(|(gene, _)| gene)
        // Equal ranks only happen for genes the catalog leaves unordered;
        // the id breaks those ties so the result is independent of input order
        .min_by_key(|&gene| (catalog.dominance_rank(gene), gene))
        .unwrap_or_else(|| catalog.default_gene())
}

/// Whether the genome legally expresses `gene`
pub fn is_expressed(genome: &Genome, gene: ColorGeneId, catalog: &GeneCatalog) -> bool {
    resolve_phenotype(genome, catalog) == gene
}

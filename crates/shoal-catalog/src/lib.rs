//! Color gene catalog for Shoal
//!
//! This crate provides the static tables the genetics engine and the renderer share:
//! - Color gene identifiers and their rarity weights (ColorGeneId, GeneCatalog)
//! - The dominance order used to break expression ties
//! - Display colors per gene and the lightness-aware color mapper

mod catalog;
pub mod display;

pub use catalog::{ColorGeneId, GeneCatalog, GeneDef, Hsl};
pub use display::{display_color, to_hex};

/// Errors raised while loading a custom catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse gene catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("gene {gene} has invalid rarity weight {weight} (must be finite and > 0)")]
    InvalidRarity { gene: ColorGeneId, weight: f32 },
}

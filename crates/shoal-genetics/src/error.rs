//! Error types for the genetics engine
//!
//! Biological variance (empty genomes, out-of-range lightness or spot sizes) is
//! normalized silently. Only structural problems a caller introduced surface here.

use crate::polygenic::DominanceMode;

#[derive(Debug, thiserror::Error)]
pub enum GeneticsError {
    #[error("dominance mode {0:?} has no expression rule")]
    UnsupportedDominance(DominanceMode),

    #[error("polygenic locus must carry exactly 2 alleles, found {found}")]
    MalformedLocus { found: usize },

    #[error("invalid breeding config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize: {0}")]
    Serialize(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;

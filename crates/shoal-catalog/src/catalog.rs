//! Color gene definitions and registry

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Discrete color gene carried in a fish genome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorGeneId {
    /// Base/neutral color, expressed when nothing else reaches threshold
    Cream,
    White,
    Black,
    Orange,
    Red,
    Yellow,
    Blue,
    Platinum,
}

impl ColorGeneId {
    /// Every gene id, in declaration order
    pub const ALL: [ColorGeneId; 8] = [
        ColorGeneId::Cream,
        ColorGeneId::White,
        ColorGeneId::Black,
        ColorGeneId::Orange,
        ColorGeneId::Red,
        ColorGeneId::Yellow,
        ColorGeneId::Blue,
        ColorGeneId::Platinum,
    ];

    /// Upper-case name as used in saved genotypes
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cream => "CREAM",
            Self::White => "WHITE",
            Self::Black => "BLACK",
            Self::Orange => "ORANGE",
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
            Self::Platinum => "PLATINUM",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ColorGeneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Color in HSL space (hue in degrees, saturation and lightness in 0.0 - 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }
}

/// Definition of a single color gene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneDef {
    pub id: ColorGeneId,

    /// Larger weight = rarer gene. Used inversely when sampling mutations
    /// and directly when pricing a fish.
    pub rarity: f32,

    /// Base display color before lightness is applied
    pub color: Hsl,
}

/// Serialized shape of a catalog override file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    genes: Vec<GeneDef>,
    #[serde(default)]
    dominance: Option<Vec<ColorGeneId>>,
}

/// Registry of all color genes: rarity weights, dominance order and colors
#[derive(Clone, Debug, PartialEq)]
pub struct GeneCatalog {
    genes: Vec<GeneDef>,
    dominance: Vec<ColorGeneId>,
}

impl GeneCatalog {
    /// The gene expressed when no other gene reaches the expression threshold
    pub const DEFAULT_GENE: ColorGeneId = ColorGeneId::Cream;

    /// Create the built-in catalog
    pub fn new() -> Self {
        let mut catalog = Self {
            genes: Vec::with_capacity(ColorGeneId::ALL.len()),
            dominance: vec![
                ColorGeneId::Black,
                ColorGeneId::Red,
                ColorGeneId::Orange,
                ColorGeneId::Yellow,
                ColorGeneId::Blue,
                ColorGeneId::Platinum,
                ColorGeneId::White,
                ColorGeneId::Cream,
            ],
        };
        catalog.register_builtin();
        catalog
    }

    /// Load a catalog from RON, layering the given definitions over the built-in ones.
    ///
    /// Genes not mentioned keep their built-in definition. A `dominance` list, when
    /// present, replaces the built-in order entirely; genes it omits rank last.
    pub fn from_ron(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = ron::from_str(source)?;
        let mut catalog = Self::new();

        for def in file.genes {
            if !def.rarity.is_finite() || def.rarity <= 0.0 {
                return Err(CatalogError::InvalidRarity {
                    gene: def.id,
                    weight: def.rarity,
                });
            }
            catalog.register(def);
        }

        if let Some(dominance) = file.dominance {
            catalog.dominance = dominance;
        }

        log::debug!(
            "Loaded gene catalog with dominance order {:?}",
            catalog.dominance
        );
        Ok(catalog)
    }

    fn register_builtin(&mut self) {
        // Cream - common base color
        self.register(GeneDef {
            id: ColorGeneId::Cream,
            rarity: 1.0,
            color: Hsl::new(45.0, 0.55, 0.85),
        });

        self.register(GeneDef {
            id: ColorGeneId::White,
            rarity: 2.0,
            color: Hsl::new(0.0, 0.0, 0.95),
        });

        // Sumi
        self.register(GeneDef {
            id: ColorGeneId::Black,
            rarity: 3.0,
            color: Hsl::new(220.0, 0.10, 0.12),
        });

        self.register(GeneDef {
            id: ColorGeneId::Orange,
            rarity: 3.0,
            color: Hsl::new(28.0, 0.95, 0.55),
        });

        // Hi
        self.register(GeneDef {
            id: ColorGeneId::Red,
            rarity: 4.0,
            color: Hsl::new(2.0, 0.85, 0.45),
        });

        self.register(GeneDef {
            id: ColorGeneId::Yellow,
            rarity: 5.0,
            color: Hsl::new(52.0, 0.95, 0.55),
        });

        // Asagi
        self.register(GeneDef {
            id: ColorGeneId::Blue,
            rarity: 7.0,
            color: Hsl::new(205.0, 0.55, 0.50),
        });

        // Ogon - rarest
        self.register(GeneDef {
            id: ColorGeneId::Platinum,
            rarity: 10.0,
            color: Hsl::new(200.0, 0.08, 0.82),
        });
    }

    fn register(&mut self, def: GeneDef) {
        let index = def.id.index();

        if let Some(slot) = self.genes.iter_mut().find(|g| g.id == def.id) {
            *slot = def;
            return;
        }

        // Keep genes ordered by id
        let position = self
            .genes
            .iter()
            .position(|g| g.id.index() > index)
            .unwrap_or(self.genes.len());
        self.genes.insert(position, def);
    }

    /// Get gene definition by ID
    pub fn get(&self, id: ColorGeneId) -> &GeneDef {
        self.genes
            .iter()
            .find(|g| g.id == id)
            .unwrap_or(&self.genes[0])
    }

    /// All gene definitions, ordered by id
    pub fn genes(&self) -> &[GeneDef] {
        &self.genes
    }

    /// Rarity weight for a gene (larger = rarer)
    pub fn rarity(&self, id: ColorGeneId) -> f32 {
        self.get(id).rarity
    }

    /// Base display color for a gene
    pub fn base_color(&self, id: ColorGeneId) -> Hsl {
        self.get(id).color
    }

    /// Dominance order, most dominant first
    pub fn dominance_order(&self) -> &[ColorGeneId] {
        &self.dominance
    }

    /// Position in the dominance order (0 = most dominant).
    ///
    /// Genes missing from the order rank after every listed gene.
    pub fn dominance_rank(&self, id: ColorGeneId) -> usize {
        self.dominance
            .iter()
            .position(|&g| g == id)
            .unwrap_or(self.dominance.len())
    }

    pub fn default_gene(&self) -> ColorGeneId {
        Self::DEFAULT_GENE
    }

    /// Genes eligible for mutation sampling: everything except the default gene
    pub fn recessive_genes(&self) -> Vec<ColorGeneId> {
        self.genes
            .iter()
            .map(|g| g.id)
            .filter(|&id| id != Self::DEFAULT_GENE)
            .collect()
    }

    /// The gene with the highest rarity weight
    pub fn rarest(&self) -> ColorGeneId {
        self.genes
            .iter()
            .max_by(|a, b| a.rarity.total_cmp(&b.rarity))
            .map(|g| g.id)
            .unwrap_or(Self::DEFAULT_GENE)
    }
}

impl Default for GeneCatalog {
    fn default() -> Self {
        Self::new()
    }
}

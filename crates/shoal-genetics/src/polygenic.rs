//! Polygenic spot traits
//!
//! Ten quantitative loci, each a diploid allele pair, control how spots are
//! drawn (opacity, size, blur, hue...). A locus expresses according to its
//! dominance mode; the ten expressed values map linearly onto `SpotPhenotype`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GeneticsError, Result};

/// Which parent an allele came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlleleOrigin {
    Maternal,
    Paternal,
}

/// One parent's contribution to a locus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allele {
    /// Allele value (0.0 - 1.0)
    pub value: f32,
    pub origin: AlleleOrigin,
}

impl Allele {
    pub fn new(value: f32, origin: AlleleOrigin) -> Self {
        Self {
            value: clamp_unit(value),
            origin,
        }
    }
}

/// How the two alleles of a locus combine into one expressed value.
///
/// Only `Incomplete` has an expression rule. `Complete` exists so saved data
/// using it stays loadable, but expressing it is an error rather than a guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominanceMode {
    /// Blend: the expressed value is the mean of both alleles
    #[default]
    Incomplete,
    /// Reserved; no expression rule defined
    Complete,
}

/// Serialized form of a locus (alleles as a list, validated on load)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocusRecord {
    alleles: Vec<Allele>,
    #[serde(default)]
    dominance: DominanceMode,
}

/// A diploid quantitative locus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocusRecord", into = "LocusRecord")]
pub struct PolygenicLocus {
    pub alleles: [Allele; 2],
    pub dominance: DominanceMode,
}

impl TryFrom<LocusRecord> for PolygenicLocus {
    type Error = GeneticsError;

    fn try_from(record: LocusRecord) -> Result<Self> {
        match record.alleles.as_slice() {
            &[first, second] => Ok(Self {
                alleles: [
                    Allele::new(first.value, first.origin),
                    Allele::new(second.value, second.origin),
                ],
                dominance: record.dominance,
            }),
            other => Err(GeneticsError::MalformedLocus { found: other.len() }),
        }
    }
}

impl From<PolygenicLocus> for LocusRecord {
    fn from(locus: PolygenicLocus) -> Self {
        Self {
            alleles: locus.alleles.to_vec(),
            dominance: locus.dominance,
        }
    }
}

impl PolygenicLocus {
    /// Locus with incomplete dominance from two allele values
    pub fn new(maternal: f32, paternal: f32) -> Self {
        Self {
            alleles: [
                Allele::new(maternal, AlleleOrigin::Maternal),
                Allele::new(paternal, AlleleOrigin::Paternal),
            ],
            dominance: DominanceMode::Incomplete,
        }
    }
}

/// Create a locus with two uniformly random alleles
pub fn random_locus<R: Rng + ?Sized>(rng: &mut R) -> PolygenicLocus {
    PolygenicLocus::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0))
}

/// Child locus: one allele drawn from each parent.
///
/// The dominance mode follows the maternal parent.
pub fn breed_locus<R: Rng + ?Sized>(
    rng: &mut R,
    maternal: &PolygenicLocus,
    paternal: &PolygenicLocus,
) -> PolygenicLocus {
    let from_mother = maternal.alleles[rng.gen_range(0..2)];
    let from_father = paternal.alleles[rng.gen_range(0..2)];
    PolygenicLocus {
        alleles: [
            Allele::new(from_mother.value, AlleleOrigin::Maternal),
            Allele::new(from_father.value, AlleleOrigin::Paternal),
        ],
        dominance: maternal.dominance,
    }
}

/// Expressed value of a locus (0.0 - 1.0)
pub fn express(locus: &PolygenicLocus) -> Result<f32> {
    match locus.dominance {
        DominanceMode::Incomplete => {
            Ok((locus.alleles[0].value + locus.alleles[1].value) / 2.0)
        }
        mode @ DominanceMode::Complete => Err(GeneticsError::UnsupportedDominance(mode)),
    }
}

/// The ten polygenic loci
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocusName {
    Opacity,
    Size,
    EdgeBlur,
    Density,
    Hue,
    Saturation,
    Roundness,
    Clustering,
    Contrast,
    Symmetry,
}

impl LocusName {
    pub const ALL: [LocusName; 10] = [
        LocusName::Opacity,
        LocusName::Size,
        LocusName::EdgeBlur,
        LocusName::Density,
        LocusName::Hue,
        LocusName::Saturation,
        LocusName::Roundness,
        LocusName::Clustering,
        LocusName::Contrast,
        LocusName::Symmetry,
    ];

    /// Phenotype range the expressed value (0 - 1) is mapped onto
    pub fn phenotype_range(&self) -> (f32, f32) {
        match self {
            Self::Opacity => (0.4, 1.0),
            Self::Size => (0.6, 1.4),
            // Pixels of blur at the spot edge
            Self::EdgeBlur => (0.0, 4.0),
            Self::Density => (0.2, 1.0),
            // Degrees
            Self::Hue => (-30.0, 30.0),
            Self::Saturation => (-0.3, 0.3),
            Self::Roundness => (0.0, 1.0),
            Self::Clustering => (0.0, 1.0),
            Self::Contrast => (0.5, 1.5),
            Self::Symmetry => (0.0, 1.0),
        }
    }

    /// Map an expressed value onto this locus's phenotype range
    pub fn map_expressed(&self, expressed: f32) -> f32 {
        let (low, high) = self.phenotype_range();
        low + (high - low) * clamp_unit(expressed)
    }
}

/// Full set of ten loci carried by one fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygenicTraits {
    pub opacity: PolygenicLocus,
    pub size: PolygenicLocus,
    pub edge_blur: PolygenicLocus,
    pub density: PolygenicLocus,
    pub hue: PolygenicLocus,
    pub saturation: PolygenicLocus,
    pub roundness: PolygenicLocus,
    pub clustering: PolygenicLocus,
    pub contrast: PolygenicLocus,
    pub symmetry: PolygenicLocus,
}

impl PolygenicTraits {
    /// Build a trait set locus by locus
    pub fn from_fn<F>(mut locus: F) -> Self
    where
        F: FnMut(LocusName) -> PolygenicLocus,
    {
        Self {
            opacity: locus(LocusName::Opacity),
            size: locus(LocusName::Size),
            edge_blur: locus(LocusName::EdgeBlur),
            density: locus(LocusName::Density),
            hue: locus(LocusName::Hue),
            saturation: locus(LocusName::Saturation),
            roundness: locus(LocusName::Roundness),
            clustering: locus(LocusName::Clustering),
            contrast: locus(LocusName::Contrast),
            symmetry: locus(LocusName::Symmetry),
        }
    }

    /// Ten random loci
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_fn(|_| random_locus(rng))
    }

    pub fn get(&self, name: LocusName) -> &PolygenicLocus {
        match name {
            LocusName::Opacity => &self.opacity,
            LocusName::Size => &self.size,
            LocusName::EdgeBlur => &self.edge_blur,
            LocusName::Density => &self.density,
            LocusName::Hue => &self.hue,
            LocusName::Saturation => &self.saturation,
            LocusName::Roundness => &self.roundness,
            LocusName::Clustering => &self.clustering,
            LocusName::Contrast => &self.contrast,
            LocusName::Symmetry => &self.symmetry,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocusName, &PolygenicLocus)> {
        LocusName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }

    /// Express all ten loci into spot rendering parameters
    pub fn express(&self) -> Result<SpotPhenotype> {
        let value = |name: LocusName| -> Result<f32> {
            Ok(name.map_expressed(express(self.get(name))?))
        };

        Ok(SpotPhenotype {
            opacity_base: value(LocusName::Opacity)?,
            size_multiplier_base: value(LocusName::Size)?,
            edge_blur: value(LocusName::EdgeBlur)?,
            density: value(LocusName::Density)?,
            hue_shift: value(LocusName::Hue)?,
            saturation_shift: value(LocusName::Saturation)?,
            roundness: value(LocusName::Roundness)?,
            clustering: value(LocusName::Clustering)?,
            contrast: value(LocusName::Contrast)?,
            symmetry: value(LocusName::Symmetry)?,
        })
    }
}

/// Breed two trait sets.
///
/// A parent without the trait system passes nothing on: the child copies the
/// other parent's set unchanged, or gets a random set when neither has one.
pub fn breed_traits<R: Rng + ?Sized>(
    rng: &mut R,
    maternal: Option<&PolygenicTraits>,
    paternal: Option<&PolygenicTraits>,
) -> PolygenicTraits {
    match (maternal, paternal) {
        (Some(a), Some(b)) => {
            PolygenicTraits::from_fn(|name| breed_locus(rng, a.get(name), b.get(name)))
        }
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => PolygenicTraits::random(rng),
    }
}

/// Spot rendering parameters derived from the ten loci
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotPhenotype {
    pub opacity_base: f32,
    pub size_multiplier_base: f32,
    pub edge_blur: f32,
    pub density: f32,
    pub hue_shift: f32,
    pub saturation_shift: f32,
    pub roundness: f32,
    pub clustering: f32,
    pub contrast: f32,
    pub symmetry: f32,
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.5;
    }
    value.clamp(0.0, 1.0)
}

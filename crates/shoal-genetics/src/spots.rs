//! Spot patches and their inheritance
//!
//! A child's spot count is drawn around its parents' counts and then nudged by a
//! self-stabilizing add/delete/keep step. Only as many spots as a single parent
//! carried can be inherited; anything beyond that is new growth.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shoal_catalog::{ColorGeneId, GeneCatalog};

use crate::config::BreedingConfig;
use crate::rng::GeneticRng;
use crate::sampler::sample_color;

/// Smallest spot size (percent of body)
pub const MIN_SPOT_SIZE: f32 = 4.0;
/// Largest spot size (percent of body)
pub const MAX_SPOT_SIZE: f32 = 30.0;
/// Size drift applied to an inherited spot, either direction
pub const SPOT_SIZE_JITTER: f32 = 3.0;
/// Size range for freshly grown spots
pub const NEW_SPOT_SIZE: std::ops::RangeInclusive<f32> = 8.0..=20.0;

/// Outline of a spot patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotShape {
    Circle,
    Oval,
    Blob,
    /// Kept for saved fish; never generated for new spots
    VerticalOval,
}

impl SpotShape {
    /// Shapes a new or shapeless spot can receive
    pub const GENERATED: [SpotShape; 3] = [SpotShape::Circle, SpotShape::Oval, SpotShape::Blob];

    /// Random shape, excluding `VerticalOval`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::GENERATED[rng.gen_range(0..Self::GENERATED.len())]
    }
}

/// A single colored patch on the body.
///
/// Loading clamps position and size, so out-of-range saved data never reaches
/// breeding or rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpotRecord", into = "SpotRecord")]
pub struct Spot {
    /// Horizontal position, percent of body length (0 - 100)
    pub x: f32,
    /// Vertical position, percent of body height (0 - 100)
    pub y: f32,
    /// Size in percent, within MIN_SPOT_SIZE..=MAX_SPOT_SIZE
    pub size: f32,
    pub color: ColorGeneId,
    pub shape: Option<SpotShape>,
}

/// Serialized form of a spot (unchecked)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpotRecord {
    x: f32,
    y: f32,
    size: f32,
    color: ColorGeneId,
    #[serde(default)]
    shape: Option<SpotShape>,
}

impl From<SpotRecord> for Spot {
    fn from(record: SpotRecord) -> Self {
        Self {
            x: clamp_position(record.x),
            y: clamp_position(record.y),
            size: clamp_size(record.size),
            color: record.color,
            shape: record.shape,
        }
    }
}

impl From<Spot> for SpotRecord {
    fn from(spot: Spot) -> Self {
        Self {
            x: spot.x,
            y: spot.y,
            size: spot.size,
            color: spot.color,
            shape: spot.shape,
        }
    }
}

impl Spot {
    pub fn new(x: f32, y: f32, size: f32, color: ColorGeneId, shape: SpotShape) -> Self {
        Self {
            x: clamp_position(x),
            y: clamp_position(y),
            size: clamp_size(size),
            color,
            shape: Some(shape),
        }
    }

    /// Spot with random position, size and shape and a sampled color
    pub fn random<R: Rng + ?Sized>(rng: &mut R, catalog: &GeneCatalog) -> Self {
        let color = sample_color(rng, catalog);
        Self::grown(rng, color)
    }

    /// Fresh spot of the given color
    fn grown<R: Rng + ?Sized>(rng: &mut R, color: ColorGeneId) -> Self {
        Self {
            x: rng.gen_range(0.0..=100.0),
            y: rng.gen_range(0.0..=100.0),
            size: rng.gen_range(NEW_SPOT_SIZE),
            color,
            shape: Some(SpotShape::random(rng)),
        }
    }
}

fn clamp_position(value: f32) -> f32 {
    if value.is_nan() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_SPOT_SIZE;
    }
    size.clamp(MIN_SPOT_SIZE, MAX_SPOT_SIZE)
}

/// Count step chosen after the base spot count is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAdjustment {
    Add,
    Delete,
    Keep,
}

/// Unnormalized weights for the add/delete/keep step at a given count.
///
/// Low counts favor adding, high counts favor deleting, so spot counts settle
/// instead of drifting without bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCountWeights {
    pub add: f32,
    pub delete: f32,
    pub keep: f32,
}

impl SpotCountWeights {
    pub fn for_count(count: usize) -> Self {
        let n = count as f32;
        let decay = (-n / 10.0).exp();
        Self {
            add: decay,
            delete: 1.0 - decay,
            keep: (-n / 20.0).exp(),
        }
    }

    pub fn total(&self) -> f32 {
        self.add + self.delete + self.keep
    }

    /// Map a uniform roll in [0, 1) onto an adjustment.
    ///
    /// An outcome with zero weight is never returned.
    pub fn choose(&self, roll: f32) -> CountAdjustment {
        let r = roll * self.total();
        if r < self.add {
            CountAdjustment::Add
        } else if r < self.add + self.delete {
            CountAdjustment::Delete
        } else {
            CountAdjustment::Keep
        }
    }
}

/// Base count before adjustment: the larger parent count or the blended mean, 50/50
pub fn base_spot_count<R: Rng + ?Sized>(rng: &mut R, a_len: usize, b_len: usize) -> usize {
    let max_n = a_len.max(b_len);
    let min_n = a_len.min(b_len);
    if rng.coin_flip() {
        max_n
    } else {
        (max_n + min_n) / 2
    }
}

/// Apply the stochastic add/delete/keep step to a base count
pub fn adjust_spot_count<R: Rng + ?Sized>(rng: &mut R, count: usize) -> usize {
    match SpotCountWeights::for_count(count).choose(rng.gen_f32()) {
        CountAdjustment::Add => count + 1,
        CountAdjustment::Delete => count.saturating_sub(1),
        CountAdjustment::Keep => count,
    }
}

/// Breed the spot lists of two parents into a child's spot list
pub fn breed_spots<R: Rng + ?Sized>(
    rng: &mut R,
    a: &[Spot],
    b: &[Spot],
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Vec<Spot> {
    let max_n = a.len().max(b.len());
    let base = base_spot_count(rng, a.len(), b.len());
    let target = adjust_spot_count(rng, base);

    let mut pool: Vec<&Spot> = a.iter().chain(b.iter()).collect();
    pool.shuffle(rng);

    // Never inherit more spots than either parent had on its own
    let inherited = target.min(max_n);
    let mut child: Vec<Spot> = pool
        .into_iter()
        .take(inherited)
        .map(|spot| inherit_spot(rng, spot, config, catalog))
        .collect();

    let palette: Vec<ColorGeneId> = a
        .iter()
        .chain(b.iter())
        .map(|s| s.color)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    while child.len() < target {
        let keep_parent_color =
            !palette.is_empty() && !rng.check_probability(config.spot_color_mutation_rate);
        let color = if keep_parent_color {
            palette[rng.gen_range(0..palette.len())]
        } else {
            sample_color(rng, catalog)
        };
        child.push(Spot::grown(rng, color));
    }

    log::trace!(
        "Spots: parents {}+{}, base {}, target {}, inherited {}",
        a.len(),
        b.len(),
        base,
        target,
        inherited
    );

    child
}

fn inherit_spot<R: Rng + ?Sized>(
    rng: &mut R,
    spot: &Spot,
    config: &BreedingConfig,
    catalog: &GeneCatalog,
) -> Spot {
    let size = clamp_size(spot.size + rng.gen_range(-SPOT_SIZE_JITTER..=SPOT_SIZE_JITTER));
    let color = if rng.check_probability(config.spot_color_mutation_rate) {
        sample_color(rng, catalog)
    } else {
        spot.color
    };
    let shape = spot.shape.unwrap_or_else(|| SpotShape::random(rng));

    Spot {
        x: rng.gen_range(0.0..=100.0),
        y: rng.gen_range(0.0..=100.0),
        size,
        color,
        shape: Some(shape),
    }
}

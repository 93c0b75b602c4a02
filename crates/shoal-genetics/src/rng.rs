//! RNG abstraction for breeding
//!
//! Every random draw in the engine goes through a caller-supplied `rand::Rng`:
//! - `rand::thread_rng()` for the convenience entry points
//! - A seeded `Xoshiro256StarStar` when outcomes must be reproducible

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Seedable generator used by `Breeder`
pub type SeededRng = Xoshiro256StarStar;

/// Create a generator that reproduces the same sequence for the same seed
pub fn seeded(seed: u64) -> SeededRng {
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// Create a generator seeded from the operating system
pub fn from_entropy() -> SeededRng {
    Xoshiro256StarStar::from_entropy()
}

/// Random helpers used throughout the genetics engine
pub trait GeneticRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate random boolean with 50% probability
    fn coin_flip(&mut self) -> bool {
        self.gen_f32() < 0.5
    }

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> GeneticRng for T {
    fn gen_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_flip_is_balanced_and_reproducible() {
        let mut rng = seeded(12345);
        let heads = (0..10_000).filter(|_| rng.coin_flip()).count();
        assert!((4_500..=5_500).contains(&heads), "heads={}", heads);

        let mut first = seeded(42);
        let mut second = seeded(42);
        let flips_1: Vec<bool> = (0..64).map(|_| first.coin_flip()).collect();
        let flips_2: Vec<bool> = (0..64).map(|_| second.coin_flip()).collect();
        assert_eq!(flips_1, flips_2);
    }
}

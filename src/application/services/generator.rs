//! Randomized tree generation

use chrono::Datelike;
use rand::Rng;
use tracing::debug;

use crate::config::GenerateConfig;
use crate::domain::{Tree, TreeSpecies};

/// Generates random trees within the configured ranges.
///
/// The RNG is caller-supplied so sessions can use the thread RNG while tests
/// drive generation with a seeded `StdRng`.
pub struct TreeGenerator {
    cfg: GenerateConfig,
}

impl TreeGenerator {
    pub fn new(cfg: GenerateConfig) -> Self {
        Self { cfg }
    }

    /// Generate one tree: uniform species, planting year within the last
    /// `year_offset_max` years, height and growth rate from the configured
    /// bands.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Tree {
        let species = TreeSpecies::ALL[rng.gen_range(0..TreeSpecies::ALL.len())];
        let planting_year = current_year() - rng.gen_range(0..self.cfg.year_offset_max);
        let height = rng.gen_range(self.cfg.height_min..self.cfg.height_max);
        let growth_rate = rng.gen_range(self.cfg.growth_rate_min..self.cfg.growth_rate_max);

        let tree = Tree::new(species, planting_year, height, growth_rate);
        debug!("generated tree: {}", tree);
        tree
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_trees_respect_configured_ranges() {
        let cfg = GenerateConfig::default();
        let generator = TreeGenerator::new(cfg.clone());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let tree = generator.generate(&mut rng);
            assert!(tree.height() >= cfg.height_min && tree.height() < cfg.height_max);
            assert!(
                tree.growth_rate() >= cfg.growth_rate_min
                    && tree.growth_rate() < cfg.growth_rate_max
            );
            let year = current_year();
            assert!(tree.planting_year() > year - cfg.year_offset_max);
            assert!(tree.planting_year() <= year);
        }
    }
}

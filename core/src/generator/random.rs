use super::*;

/// Uniform placement without replacement: shuffle every position and keep the first `mines`.
///
/// Always terminates, no matter how dense the board is.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Picks a fresh seed from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::SliceRandom;

        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cells: Vec<Coord2> = positions(config.size()).collect();
        cells.shuffle(&mut rng);
        cells.truncate(config.mines().into());

        log::debug!(
            "Generated {:?} layout with {} mines from seed {}",
            config.size(),
            config.mines(),
            self.seed
        );
        MineLayout::from_mine_coords(config.size(), &cells)
    }
}

use crate::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// The placing side. Drops a 2-tile (9 in 10) or a 4-tile (1 in 10)
/// on a uniformly random empty cell.
///
/// Options: `name`, `seed`.
pub struct Environment {
    config: Config,
    rng: SmallRng,
}

impl Environment {
    pub fn new(options: &str) -> anyhow::Result<Self> {
        let config = Config::with_defaults("name=random role=environment", options)?;
        let rng = match config.seed() {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Ok(Self { config, rng })
    }
}

impl Agent for Environment {
    fn config(&self) -> &Config {
        &self.config
    }
    fn take_action(&mut self, board: &Board) -> Action {
        match board.empties().choose(&mut self.rng) {
            Some(&position) => {
                let tile = if self.rng.random_ratio(9, 10) { 1 } else { 2 };
                Action::place(position, tile)
            }
            None => Action::Null,
        }
    }
}

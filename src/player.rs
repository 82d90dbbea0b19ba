use crate::*;
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Default learning rate when `alpha` is not configured.
pub const ALPHA: f32 = 0.025;

/// How a player turns a board into features of its weight tables.
///
/// The player owns the tables; a strategy only knows their shape and how
/// to read and nudge them. Swap in another implementation to change the
/// feature scheme without touching the learning loop.
pub trait Strategy {
    /// Length of each table this strategy indexes into.
    fn shape(&self) -> Vec<usize>;
    /// Estimated value of an after-state.
    fn estimate(&self, network: &Network, board: &Board) -> f32;
    /// Move the estimate of `board` by `delta`.
    fn update(&self, network: &mut Network, board: &Board, delta: f32);

    /// Zeroed tables matching [`Strategy::shape`].
    fn tables(&self) -> Network {
        Network::from(self.shape().into_iter().map(Weight::new).collect::<Vec<_>>())
    }
    /// True if `network` has exactly the tables this strategy expects.
    fn accepts(&self, network: &Network) -> bool {
        network.tables().iter().map(Weight::len).eq(self.shape())
    }
}

/// The sliding side. Learns after-state values by temporal difference.
///
/// Without weight tables it slides uniformly at random among legal
/// moves. With tables it slides greedily on reward plus estimated
/// after-state value, and updates the tables at the end of each episode.
///
/// Options: `name`, `seed`, `alpha`, `init` (allocate tables),
/// `load=path` and `save=path` (weight files).
pub struct Player {
    config: Config,
    rng: SmallRng,
    alpha: f32,
    network: Network,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(options: &str) -> anyhow::Result<Self> {
        Self::with_strategy(options, Box::new(LineTuple))
    }
    pub fn with_strategy(options: &str, strategy: Box<dyn Strategy>) -> anyhow::Result<Self> {
        let config = Config::with_defaults("name=dummy role=player", options)?;
        let rng = match config.seed() {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let network = match (config.load(), config.init()) {
            (Some(path), _) => Network::load_from(path)?,
            (None, Some(_)) => strategy.tables(),
            (None, None) => Network::default(),
        };
        if !network.is_empty() && !strategy.accepts(&network) {
            anyhow::bail!("weight tables do not match the feature shape {:?}", strategy.shape());
        }
        Ok(Self {
            alpha: config.alpha().unwrap_or(ALPHA),
            config,
            rng,
            network,
            strategy,
        })
    }
    pub fn network(&self) -> &Network {
        &self.network
    }
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Every legal slide with its after-state and reward.
    fn legal(board: &Board) -> Vec<(Direction, Board, Reward)> {
        Direction::all()
            .into_iter()
            .filter_map(|d| {
                let mut after = *board;
                after.slide(d).map(|r| (d, after, r))
            })
            .collect()
    }
    fn value(&self, after: &Board, reward: Reward) -> f32 {
        reward as f32 + self.strategy.estimate(&self.network, after)
    }

    /// Backward TD(0) over the after-states of the player's slides.
    fn learn(&mut self, moves: &[Move]) {
        let mut target = 0.;
        for slide in moves.iter().skip(1).step_by(2).rev() {
            let error = target - self.strategy.estimate(&self.network, &slide.state);
            self.strategy
                .update(&mut self.network, &slide.state, self.alpha * error);
            target = self.value(&slide.state, slide.reward);
        }
    }
}

impl Agent for Player {
    fn config(&self) -> &Config {
        &self.config
    }
    fn take_action(&mut self, board: &Board) -> Action {
        let legal = Self::legal(board);
        let choice = if self.network.is_empty() {
            legal.choose(&mut self.rng).map(|(d, _, _)| *d)
        } else {
            legal
                .iter()
                .map(|(d, after, r)| (*d, self.value(after, *r)))
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(d, _)| d)
        };
        choice.map(Action::slide).unwrap_or_default()
    }
    fn close_episode(&mut self, moves: &[Move], _: &str) {
        if !self.network.is_empty() {
            self.learn(moves);
        }
    }
    fn teardown(&mut self) -> anyhow::Result<()> {
        match self.config.save() {
            Some(path) => self
                .network
                .save_to(path)
                .with_context(|| format!("persist weights of {}", self.config.name())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One table, one slot, every board maps to it.
    struct Constant;
    impl Strategy for Constant {
        fn shape(&self) -> Vec<usize> {
            vec![1]
        }
        fn estimate(&self, network: &Network, _: &Board) -> f32 {
            network[0][0]
        }
        fn update(&self, network: &mut Network, _: &Board, delta: f32) {
            network[0][0] += delta;
        }
    }

    #[test]
    fn defaults_from_options() {
        let player = Player::new("seed=1").unwrap();
        assert_eq!(player.name(), "dummy");
        assert_eq!(player.role(), "player");
        assert_eq!(player.alpha(), ALPHA);
        assert!(player.network().is_empty());
        let player = Player::new("name=td alpha=0.5 init").unwrap();
        assert_eq!(player.name(), "td");
        assert_eq!(player.alpha(), 0.5);
        assert_eq!(player.network().tables().len(), 2);
    }

    #[test]
    fn random_player_only_picks_legal_slides() {
        let mut player = Player::new("seed=3").unwrap();
        let mut board = Board::empty();
        board.place(0, 1);
        for _ in 0..32 {
            let action = player.take_action(&board);
            assert!(matches!(
                action.direction(),
                Some(Direction::Right) | Some(Direction::Down)
            ));
        }
    }

    #[test]
    fn concedes_without_legal_slides() {
        let mut player = Player::new("seed=3 init").unwrap();
        let board = Board::from([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
        assert_eq!(player.take_action(&board), Action::Null);
    }

    #[test]
    fn greedy_player_prefers_reward() {
        let mut player = Player::with_strategy("init", Box::new(Constant)).unwrap();
        let board = Board::from([1, 1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let action = player.take_action(&board);
        assert!(matches!(
            action.direction(),
            Some(Direction::Left) | Some(Direction::Right)
        ));
    }

    #[test]
    fn learns_toward_final_rewards() {
        let mut player = Player::with_strategy("init alpha=0.5", Box::new(Constant)).unwrap();
        let episode = "a@0|01#R01#R[4]|b@0".parse::<Episode>().unwrap();
        player.close_episode(episode.moves(), "b");
        // last slide pulls toward 0, first toward 4 + v
        assert!(player.network()[0][0] > 0.);
    }

    #[test]
    fn rejects_mismatched_tables() {
        let path = std::env::temp_dir().join(format!("mismatch-{}.bin", std::process::id()));
        Network::from(vec![Weight::new(3)]).save_to(&path).unwrap();
        let options = format!("load={}", path.display());
        assert!(Player::new(&options).is_err());
        assert!(Player::with_strategy(&format!("load={}", path.display()), Box::new(Constant)).is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn saves_on_teardown() {
        let path = std::env::temp_dir().join(format!("teardown-{}.bin", std::process::id()));
        let options = format!("init save={}", path.display());
        let mut player = Player::with_strategy(&options, Box::new(Constant)).unwrap();
        player.teardown().unwrap();
        let options = format!("load={}", path.display());
        let player = Player::with_strategy(&options, Box::new(Constant)).unwrap();
        assert_eq!(player.network().tables().len(), 1);
        std::fs::remove_file(&path).unwrap();
    }
}

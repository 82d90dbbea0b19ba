use crate::*;

/// Drives a player and an environment through the episodes of a [`Statistic`].
pub struct Arena<P, E> {
    play: P,
    evil: E,
}

impl<P, E> Arena<P, E>
where
    P: Agent,
    E: Agent,
{
    pub fn new(play: P, evil: E) -> Self {
        Self { play, evil }
    }
    pub fn play(&self) -> &P {
        &self.play
    }
    pub fn evil(&self) -> &E {
        &self.evil
    }

    /// Play one episode to the end and record it in `stat`.
    /// Returns the name of the side that made the last move.
    pub fn episode(&mut self, stat: &mut Statistic) -> String {
        let play = self.play.name().to_string();
        let evil = self.evil.name().to_string();
        self.play.open_episode(&format!("~:{}", evil));
        self.evil.open_episode(&format!("{}:~", play));
        let game = stat.open_episode(&format!("{}:{}", play, evil));
        loop {
            let who = game.take_turns(&mut self.play, &mut self.evil);
            let action = who.take_action(game.board());
            if !game.apply_action(action) || who.check_for_win(game.board()) {
                break;
            }
        }
        let winner = game
            .last_turns(&mut self.play, &mut self.evil)
            .name()
            .to_string();
        stat.close_episode(&winner);
        let moves = stat.back().map(Episode::moves).unwrap_or_default();
        self.play.close_episode(moves, &winner);
        self.evil.close_episode(moves, &winner);
        winner
    }

    /// Play until `stat` has seen its total number of episodes.
    pub fn run(&mut self, stat: &mut Statistic) {
        while !stat.is_finished() {
            self.episode(stat);
        }
    }

    /// Tear both agents down, surfacing the first failure.
    pub fn finish(mut self) -> anyhow::Result<()> {
        let play = self.play.teardown();
        let evil = self.evil.teardown();
        play.and(evil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(options: &str) -> Arena<Player, Environment> {
        Arena::new(
            Player::new(options).unwrap(),
            Environment::new("seed=2").unwrap(),
        )
    }

    #[test]
    fn episodes_alternate_and_end_on_illegal_move() {
        let mut arena = arena("seed=1");
        let mut stat = Statistic::new(1, 0, 0);
        arena.episode(&mut stat);
        let game = stat.back().unwrap();
        assert!(game.is_closed());
        assert!(game.step() > 2);
        assert_eq!(game.open().tag, "dummy:random");
        assert!(game.moves().iter().step_by(2).all(|m| m.action.is_place()));
        assert!(game.moves().iter().skip(1).step_by(2).all(|m| m.action.is_slide()));
        assert_eq!(game.score(), game.moves().iter().map(|m| Score::from(m.reward)).sum::<Score>());
    }

    #[test]
    fn winner_made_the_last_move() {
        let mut arena = arena("seed=4");
        let mut stat = Statistic::new(1, 0, 0);
        let winner = arena.episode(&mut stat);
        let game = stat.back().unwrap();
        let last = Role::of(game.step() - 1);
        let expected = match last {
            Role::Player => "dummy",
            Role::Environment => "random",
        };
        assert_eq!(winner, expected);
        assert_eq!(game.close().tag, expected);
    }

    #[test]
    fn runs_until_total() {
        let mut arena = arena("seed=9");
        let mut stat = Statistic::new(5, 2, 3);
        arena.run(&mut stat);
        assert_eq!(stat.count(), 5);
        assert_eq!(stat.len(), 3);
        assert!(stat.is_finished());
        let mut loaded = Statistic::new(0, 0, 0);
        loaded.load(&stat.to_string()).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(loaded
            .episodes()
            .zip(stat.episodes())
            .all(|(a, b)| a.score() == b.score() && a.step() == b.step()));
        arena.finish().unwrap();
    }

    #[test]
    fn learning_player_updates_weights() {
        let mut arena = arena("seed=3 init alpha=0.1");
        let mut stat = Statistic::new(3, 0, 0);
        arena.run(&mut stat);
        assert!(arena
            .play()
            .network()
            .tables()
            .iter()
            .any(|t| t.values().iter().any(|&v| v != 0.)));
    }
}

use crate::*;

/// Which side of the alternation a move belongs to.
///
/// The environment places tiles and always moves first; the player
/// slides on every odd move.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Role {
    Player,
    Environment,
}

impl Role {
    /// The role responsible for the move at `index` in an episode.
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 {
            Role::Environment
        } else {
            Role::Player
        }
    }
}

/// Anything that can take a turn in an [`Episode`].
///
/// Construction is setup; [`Agent::teardown`] runs once after the last
/// episode so that agents can persist what they learned.
pub trait Agent {
    fn config(&self) -> &Config;
    /// Choose an action for `board`. [`Action::Null`] concedes.
    fn take_action(&mut self, board: &Board) -> Action;

    fn name(&self) -> &str {
        self.config().name()
    }
    fn role(&self) -> &str {
        self.config().role()
    }
    fn open_episode(&mut self, tag: &str) {
        let _ = tag;
    }
    fn close_episode(&mut self, moves: &[Move], tag: &str) {
        let _ = moves;
        let _ = tag;
    }
    fn check_for_win(&self, board: &Board) -> bool {
        let _ = board;
        false
    }
    fn teardown(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_moves_on_even_indices() {
        assert_eq!(Role::of(0), Role::Environment);
        assert_eq!(Role::of(1), Role::Player);
        assert_eq!(Role::of(2), Role::Environment);
        assert_eq!(Role::of(7), Role::Player);
    }
}

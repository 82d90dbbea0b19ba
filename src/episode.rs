use crate::*;

/// A tag and the wall-clock time it was stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub tag: String,
    pub time: Millis,
}

impl Default for Flag {
    fn default() -> Self {
        Self {
            tag: String::from("N/A"),
            time: 0,
        }
    }
}

impl Flag {
    fn now(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            time: millis(),
        }
    }
}

impl TryFrom<&str> for Flag {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (tag, time) = s.rsplit_once('@').ok_or(ParseError::Delimiter('@'))?;
        let time = time
            .parse()
            .map_err(|_| ParseError::Timestamp(time.to_string()))?;
        Ok(Self {
            tag: tag.to_string(),
            time,
        })
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.tag, self.time)
    }
}

/// One applied action: the board it produced, what it earned, how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub state: Board,
    pub action: Action,
    pub reward: Reward,
    pub time: Millis,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.action)?;
        if self.reward != 0 {
            write!(f, "[{}]", self.reward)?;
        }
        if self.time != 0 {
            write!(f, "({})", self.time)?;
        }
        Ok(())
    }
}

/// One game, from open to close.
///
/// Owns the live board and the chronological move records. Whose turn it
/// is follows purely from how many moves have been recorded: the
/// environment makes move 0 and the two sides strictly alternate after
/// that, so every even record is a placement and every odd one a slide.
#[derive(Debug, Clone, Default)]
pub struct Episode {
    board: Board,
    score: Score,
    turn: Millis,
    moves: Vec<Move>,
    open: Flag,
    close: Flag,
    closed: bool,
}

impl Episode {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn score(&self) -> Score {
        self.score
    }
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
    pub fn open(&self) -> &Flag {
        &self.open
    }
    pub fn close(&self) -> &Flag {
        &self.close
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Start over from an empty board, discarding any previous game.
    pub fn open_episode(&mut self, tag: &str) {
        self.clear();
        self.open = Flag::now(tag);
        self.turn = self.open.time;
        log::debug!("open  {}", self.open);
    }
    pub fn close_episode(&mut self, tag: &str) {
        self.close = Flag::now(tag);
        self.closed = true;
        log::debug!("close {} score {} moves {}", self.close, self.score, self.moves.len());
    }

    /// The role due to make the next move.
    pub fn turn(&self) -> Role {
        Role::of(self.moves.len())
    }
    /// Pick the agent due to move and start its clock.
    pub fn take_turns<'a>(
        &mut self,
        play: &'a mut dyn Agent,
        evil: &'a mut dyn Agent,
    ) -> &'a mut dyn Agent {
        self.turn = millis();
        match self.turn() {
            Role::Player => play,
            Role::Environment => evil,
        }
    }
    /// The agent that made the last recorded move.
    pub fn last_turns<'a>(
        &mut self,
        play: &'a mut dyn Agent,
        evil: &'a mut dyn Agent,
    ) -> &'a mut dyn Agent {
        self.take_turns(evil, play)
    }

    /// Apply `action` to the board and record it.
    /// Returns false, leaving the episode untouched, if the action is illegal.
    pub fn apply_action(&mut self, action: Action) -> bool {
        if self.closed {
            return false;
        }
        let mut state = self.board;
        match action.apply(&mut state) {
            None => false,
            Some(reward) => {
                let time = millis().saturating_sub(self.turn);
                log::trace!("{} [{}] ({})", action, reward, time);
                self.record(state, action, reward, time);
                true
            }
        }
    }
    fn record(&mut self, state: Board, action: Action, reward: Reward, time: Millis) {
        self.board = state;
        self.score += Score::from(reward);
        self.moves.push(Move {
            state,
            action,
            reward,
            time,
        });
    }

    //
    /// Moves made by everyone.
    pub fn step(&self) -> usize {
        self.moves.len()
    }
    /// Moves made by `role`.
    pub fn step_by(&self, role: Role) -> usize {
        let n = self.moves.len();
        match role {
            Role::Player => n / 2,
            Role::Environment => n - n / 2,
        }
    }
    /// Wall-clock span of the whole episode.
    pub fn time(&self) -> Millis {
        self.close.time.saturating_sub(self.open.time)
    }
    /// Thinking time spent by `role`.
    pub fn time_by(&self, role: Role) -> Millis {
        self.by(role).map(|m| m.time).sum()
    }
    pub fn actions(&self) -> Vec<Action> {
        self.moves.iter().map(|m| m.action).collect()
    }
    pub fn actions_by(&self, role: Role) -> Vec<Action> {
        self.by(role).map(|m| m.action).collect()
    }
    fn by(&self, role: Role) -> impl Iterator<Item = &Move> {
        let skip = match role {
            Role::Environment => 0,
            Role::Player => 1,
        };
        self.moves.iter().skip(skip).step_by(2)
    }

    //
    /// Replace this episode with the one serialized in `line`.
    /// On failure the episode is left cleared.
    pub fn load(&mut self, line: &str) -> Result<(), ParseError> {
        self.clear();
        let result = self.decode(line.trim_end_matches(['\r', '\n']));
        if result.is_err() {
            self.clear();
        }
        result
    }
    fn decode(&mut self, line: &str) -> Result<(), ParseError> {
        let (open, rest) = line.split_once('|').ok_or(ParseError::Delimiter('|'))?;
        let (moves, close) = rest.split_once('|').ok_or(ParseError::Delimiter('|'))?;
        self.open = Flag::try_from(open)?;
        self.close = Flag::try_from(close)?;
        let ref mut cursor = Cursor::from(moves);
        while !cursor.is_empty() {
            let at = cursor.position();
            let action = Action::parse(cursor);
            if action.is_null() {
                return Err(ParseError::Token(at));
            }
            let mut state = self.board;
            let reward = action
                .apply(&mut state)
                .ok_or_else(|| ParseError::Illegal(at, action.to_string()))?;
            let mark = cursor.position();
            match Self::optional::<Reward>(cursor, '[', ']')? {
                0 => {}
                r if r == reward => {}
                _ => return Err(ParseError::Value('[', mark)),
            }
            let time = Self::optional(cursor, '(', ')')?;
            self.record(state, action, reward, time);
        }
        self.closed = true;
        Ok(())
    }
    /// Read a `<open>value<close>` segment if present, or zero if absent.
    fn optional<T>(cursor: &mut Cursor, open: char, close: char) -> Result<T, ParseError>
    where
        T: std::str::FromStr + Default,
    {
        let at = cursor.position();
        let Some(body) = cursor.rest().strip_prefix(open) else {
            return Ok(T::default());
        };
        let end = body.find(close).ok_or(ParseError::Value(open, at))?;
        let value = body[..end]
            .parse()
            .map_err(|_| ParseError::Value(open, at))?;
        cursor.advance(end + 2);
        Ok(value)
    }
}

impl std::str::FromStr for Episode {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut episode = Self::new();
        episode.load(s)?;
        Ok(episode)
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}|", self.open)?;
        for m in self.moves.iter() {
            write!(f, "{}", m)?;
        }
        write!(f, "|{}", self.close)
    }
}

use crate::*;

/// Position and tile digits, indexed by value. Anything past the end renders as `?`.
const ALPHABET: &[u8; RANKS] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Slide tokens, indexed by opcode.
const SLIDES: [&str; 4] = ["#U", "#R", "#D", "#L"];

/// Something an agent does to the board on its turn.
///
/// `Slide` carries a raw opcode rather than a [`Direction`] so that a
/// recorded action with an unknown direction survives a round trip as
/// `#?` instead of being lost.
///
/// # Serialization
///
/// Every action is exactly two characters: `#U #R #D #L` for slides,
/// position digit + rank digit for placements, and `??` for [`Action::Null`].
#[derive(Debug, Default, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Action {
    Slide(u8),
    Place { position: u8, tile: Rank },
    #[default]
    Null,
}

impl Action {
    pub fn slide(direction: Direction) -> Self {
        Action::Slide(u8::from(direction))
    }
    pub fn place(position: usize, tile: Rank) -> Self {
        Action::Place {
            position: position as u8,
            tile,
        }
    }
    pub fn is_slide(&self) -> bool {
        matches!(self, Action::Slide(_))
    }
    pub fn is_place(&self) -> bool {
        matches!(self, Action::Place { .. })
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Action::Null)
    }
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            Action::Slide(code) => Direction::try_from(code).ok(),
            _ => None,
        }
    }

    /// Apply to `board`. `None` means the move was illegal and nothing changed.
    pub fn apply(&self, board: &mut Board) -> Option<Reward> {
        match *self {
            Action::Slide(code) => board.slide(Direction::try_from(code).ok()?),
            Action::Place { position, tile } => board.place(position as usize, tile),
            Action::Null => None,
        }
    }
}

/// Decoders, tried in order. Each sees the same two-character token.
const DECODERS: [fn(&str) -> Option<Action>; 2] = [Action::decode_slide, Action::decode_place];

impl Action {
    /// Decode the token under `cursor`.
    ///
    /// A recognized token is consumed and returned. Otherwise exactly two
    /// characters (or whatever is left) are consumed and [`Action::Null`]
    /// comes back; callers must check for it.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let mark = cursor.position();
        if let Some(token) = cursor.take(2) {
            if let Some(action) = DECODERS.iter().find_map(|decode| decode(token)) {
                return action;
            }
        }
        cursor.rewind(mark);
        cursor.advance(2);
        Action::Null
    }
    fn decode_slide(token: &str) -> Option<Action> {
        SLIDES
            .iter()
            .position(|s| *s == token)
            .map(|code| Action::Slide(code as u8))
    }
    fn decode_place(token: &str) -> Option<Action> {
        let mut chars = token.chars();
        let position = chars.next().and_then(Self::digit)?;
        let tile = chars.next().and_then(Self::digit)?;
        if position < CELLS && tile > 0 && tile < RANKS {
            Some(Action::place(position, tile as Rank))
        } else {
            None
        }
    }
    fn digit(c: char) -> Option<usize> {
        ALPHABET.iter().position(|&d| d as char == c)
    }
    fn symbol(n: usize) -> char {
        ALPHABET.get(n).map(|&d| d as char).unwrap_or('?')
    }
}

impl TryFrom<&str> for Action {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let ref mut cursor = Cursor::from(s);
        match Action::parse(cursor) {
            Action::Null => Err("invalid action token"),
            _ if !cursor.is_empty() => Err("trailing characters after action token"),
            action => Ok(action),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Action::Slide(code) => write!(f, "{}", SLIDES.get(code as usize).unwrap_or(&"#?")),
            Action::Place { position, tile } => write!(
                f,
                "{}{}",
                Self::symbol(position as usize),
                Self::symbol(tile as usize)
            ),
            Action::Null => write!(f, "??"),
        }
    }
}

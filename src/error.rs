/// Why a serialized episode line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `|` or `@` separator is missing.
    Delimiter(char),
    /// An open/close timestamp is not an integer.
    Timestamp(String),
    /// A `[reward]` or `(time)` segment is unterminated or not an integer.
    Value(char, usize),
    /// An action token was not recognized.
    Token(usize),
    /// A recognized action could not be replayed on the board.
    Illegal(usize, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseError::Delimiter(c) => write!(f, "missing delimiter '{}'", c),
            ParseError::Timestamp(s) => write!(f, "invalid timestamp: {}", s),
            ParseError::Value(c, at) => write!(f, "invalid '{}' segment at {}", c, at),
            ParseError::Token(at) => write!(f, "unknown action token at {}", at),
            ParseError::Illegal(at, a) => write!(f, "illegal action {} at {}", a, at),
        }
    }
}

impl std::error::Error for ParseError {}

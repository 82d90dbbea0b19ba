use crate::*;

/// One of the four sliding directions, in opcode order.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
    }
}

/// u8 opcode isomorphism, partial in the u8 -> Direction direction.
impl TryFrom<u8> for Direction {
    type Error = u8;
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            x => Err(x),
        }
    }
}
impl From<Direction> for u8 {
    fn from(d: Direction) -> u8 {
        d as u8
    }
}

/// The 4x4 grid of tile ranks, row-major.
///
/// Every transition mutates in place. All four slides are expressed as
/// a transform, a left slide, and the inverse transform, so the merge
/// rule lives in exactly one place.
#[derive(Debug, Default, Clone, Copy, Eq, Hash, PartialEq)]
pub struct Board([Rank; CELLS]);

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn cells(&self) -> &[Rank; CELLS] {
        &self.0
    }
    pub fn max_rank(&self) -> Rank {
        self.0.iter().copied().max().unwrap_or_default()
    }
    pub fn empties(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Seed a 2-tile (rank 1) or 4-tile (rank 2) at `position`.
    /// Returns a zero reward, or `None` for an invalid position or tile.
    pub fn place(&mut self, position: usize, tile: Rank) -> Option<Reward> {
        if position >= CELLS {
            return None;
        }
        if tile != 1 && tile != 2 {
            return None;
        }
        self.0[position] = tile;
        Some(0)
    }

    /// Slide every tile toward `direction`, merging equal neighbours once.
    /// Returns the merge reward, or `None` if nothing moved.
    pub fn slide(&mut self, direction: Direction) -> Option<Reward> {
        match direction {
            Direction::Up => self.slide_up(),
            Direction::Right => self.slide_right(),
            Direction::Down => self.slide_down(),
            Direction::Left => self.slide_left(),
        }
    }

    fn slide_left(&mut self) -> Option<Reward> {
        let mut next = [0; CELLS];
        let mut score = 0;
        for (src, dst) in self.0.chunks(SIDE).zip(next.chunks_mut(SIDE)) {
            score += Self::merge(src, dst);
        }
        if next == self.0 {
            None
        } else {
            self.0 = next;
            Some(score)
        }
    }
    fn slide_right(&mut self) -> Option<Reward> {
        self.reflect_horizontal();
        let score = self.slide_left();
        self.reflect_horizontal();
        score
    }
    fn slide_up(&mut self) -> Option<Reward> {
        self.transpose();
        let score = self.slide_left();
        self.transpose();
        score
    }
    fn slide_down(&mut self) -> Option<Reward> {
        self.transpose();
        let score = self.slide_right();
        self.transpose();
        score
    }

    /// Collapse one line toward its front. Each tile merges at most once.
    fn merge(src: &[Rank], dst: &mut [Rank]) -> Reward {
        let mut score = 0;
        let mut tiles = src.iter().copied().filter(|&r| r != 0).peekable();
        let mut slot = dst.iter_mut();
        while let Some(tile) = tiles.next() {
            let rank = match tiles.peek() {
                Some(&next) if next == tile => {
                    tiles.next();
                    score += 1 << (tile + 1);
                    tile + 1
                }
                _ => tile,
            };
            if let Some(cell) = slot.next() {
                *cell = rank;
            }
        }
        slot.for_each(|cell| *cell = 0);
        score
    }

    //
    pub fn transpose(&mut self) {
        let src = self.0;
        for r in 0..SIDE {
            for c in 0..SIDE {
                self.0[r * SIDE + c] = src[c * SIDE + r];
            }
        }
    }
    pub fn reflect_horizontal(&mut self) {
        self.0.chunks_mut(SIDE).for_each(|row| row.reverse());
    }
    pub fn reflect_vertical(&mut self) {
        let src = self.0;
        for (r, row) in self.0.chunks_mut(SIDE).enumerate() {
            row.copy_from_slice(&src[(SIDE - 1 - r) * SIDE..][..SIDE]);
        }
    }
    /// Rotate clockwise by `rot` quarter turns; negative turns go counterclockwise.
    pub fn rotate(&mut self, rot: i32) {
        match rot.rem_euclid(4) {
            1 => self.rotate_right(),
            2 => self.reverse(),
            3 => self.rotate_left(),
            _ => {}
        }
    }
    pub fn rotate_right(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }
    pub fn rotate_left(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }
    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }
}

impl From<[Rank; CELLS]> for Board {
    fn from(cells: [Rank; CELLS]) -> Self {
        Self(cells)
    }
}
impl From<Board> for [Rank; CELLS] {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl std::ops::Index<usize> for Board {
    type Output = Rank;
    fn index(&self, position: usize) -> &Rank {
        &self.0[position]
    }
}
impl std::ops::IndexMut<usize> for Board {
    fn index_mut(&mut self, position: usize) -> &mut Rank {
        &mut self.0[position]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "+{}+", "-".repeat(24))?;
        for row in self.0.chunks(SIDE) {
            write!(f, "|")?;
            for &rank in row {
                write!(f, "{:>6}", value(rank))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16])
    }

    #[test]
    fn merges_first_pair_only() {
        let mut board = Board::from([1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.slide(Direction::Left), Some(4));
        assert_eq!(&board.cells()[..4], &[2, 1, 0, 0]);
    }

    #[test]
    fn merges_two_pairs_once_each() {
        let mut board = Board::from([2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.slide(Direction::Left), Some(16));
        assert_eq!(&board.cells()[..4], &[3, 3, 0, 0]);
    }

    #[test]
    fn slides_right_toward_edge() {
        let mut board = Board::from([1, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.slide(Direction::Right), Some(4));
        assert_eq!(&board.cells()[..4], &[0, 0, 2, 2]);
    }

    #[test]
    fn slides_up_and_down_by_column() {
        let mut board = Board::empty();
        board[12] = 1;
        board[4] = 1;
        let mut up = board;
        assert_eq!(up.slide(Direction::Up), Some(4));
        assert_eq!(up[0], 2);
        assert_eq!(up.cells().iter().filter(|&&r| r != 0).count(), 1);
        let mut down = board;
        assert_eq!(down.slide(Direction::Down), Some(4));
        assert_eq!(down[12], 2);
    }

    #[test]
    fn illegal_slide_is_terminal() {
        for direction in Direction::all() {
            let mut board = sample();
            let before = board;
            assert_eq!(board.slide(direction), None);
            assert_eq!(board, before);
            assert_eq!(board.slide(direction), None);
        }
    }

    #[test]
    fn place_then_blocked_slide() {
        let mut board = Board::empty();
        assert_eq!(board.place(0, 1), Some(0));
        assert_eq!(board[0], 1);
        assert_eq!(value(board[0]), 2);
        assert_eq!(board.slide(Direction::Left), None);
        assert_eq!(board.slide(Direction::Up), None);
        assert_eq!(board.slide(Direction::Right), Some(0));
        assert_eq!(board[3], 1);
    }

    #[test]
    fn place_rejects_bad_arguments() {
        let mut board = Board::empty();
        assert_eq!(board.place(16, 1), None);
        assert_eq!(board.place(3, 0), None);
        assert_eq!(board.place(3, 3), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn rotations_compose_to_identity() {
        for r in 0..4 {
            let mut board = sample();
            board.rotate(r);
            board.rotate((4 - r) % 4);
            assert_eq!(board, sample());
        }
        let mut board = sample();
        (0..4).for_each(|_| board.rotate_right());
        assert_eq!(board, sample());
        board.rotate(-1);
        board.rotate(1);
        assert_eq!(board, sample());
    }

    #[test]
    fn reflections_are_involutions() {
        let mut board = sample();
        board.transpose();
        assert_eq!(board[1], 5);
        board.transpose();
        board.reflect_horizontal();
        assert_eq!(board[0], 4);
        board.reflect_horizontal();
        board.reflect_vertical();
        assert_eq!(board[0], 13);
        board.reflect_vertical();
        assert_eq!(board, sample());
    }

    #[test]
    fn rotate_right_is_clockwise() {
        let mut board = sample();
        board.rotate_right();
        assert_eq!(&board.cells()[..4], &[13, 9, 5, 1]);
    }

    #[test]
    fn renders_empty_as_zero() {
        let mut board = Board::empty();
        board.place(5, 2);
        let text = board.to_string();
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().nth(2).is_some_and(|l| l.contains("     4")));
        assert!(text.lines().nth(1).is_some_and(|l| l == "|     0     0     0     0|"));
    }
}

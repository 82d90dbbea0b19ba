use crate::*;

/// Rows of the board used as 4-tuples, one table each.
const ROWS: [usize; 2] = [0, 1];
/// Ranks above this share the top slot of a tuple digit.
const SATURATE: Rank = 15;

/// Line 4-tuple features over all eight board symmetries.
///
/// Rows 0 and 1 each index their own table of 16^4 slots, with one
/// base-16 digit per cell. A board's value is the sum over the four
/// rotations of the board and of its transpose.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineTuple;

impl LineTuple {
    fn index(board: &Board, row: usize) -> usize {
        board.cells()[row * SIDE..][..SIDE]
            .iter()
            .fold(0, |index, &rank| index * 16 + rank.min(SATURATE) as usize)
    }
    fn isomorphisms(board: &Board) -> impl Iterator<Item = Board> + '_ {
        (0..8).map(move |i| {
            let mut b = *board;
            if i >= 4 {
                b.transpose();
            }
            b.rotate(i);
            b
        })
    }
    fn features(board: &Board) -> impl Iterator<Item = (usize, usize)> + '_ {
        Self::isomorphisms(board).flat_map(|b| {
            ROWS.iter()
                .enumerate()
                .map(move |(table, &row)| (table, Self::index(&b, row)))
        })
    }
}

impl Strategy for LineTuple {
    fn shape(&self) -> Vec<usize> {
        vec![1 << (4 * SIDE); ROWS.len()]
    }
    fn estimate(&self, network: &Network, board: &Board) -> f32 {
        Self::features(board)
            .map(|(table, index)| network[table][index])
            .sum()
    }
    fn update(&self, network: &mut Network, board: &Board, delta: f32) {
        for (table, index) in Self::features(board) {
            network[table][index] += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_row_digits() {
        let board = Board::from([1, 2, 3, 4, 0, 0, 0, 15, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(LineTuple::index(&board, 0), 0x1234);
        assert_eq!(LineTuple::index(&board, 1), 0x000F);
    }

    #[test]
    fn saturates_large_ranks() {
        let board = Board::from([17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(LineTuple::index(&board, 0), 0xF000);
    }

    #[test]
    fn symmetric_boards_share_values() {
        let strategy = LineTuple;
        let mut network = strategy.tables();
        let board = Board::from([1, 2, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]);
        strategy.update(&mut network, &board, 0.5);
        let mut turned = board;
        turned.rotate_right();
        let mut flipped = board;
        flipped.transpose();
        let value = strategy.estimate(&network, &board);
        assert!(value > 0.);
        assert_eq!(strategy.estimate(&network, &turned), value);
        assert_eq!(strategy.estimate(&network, &flipped), value);
    }

    #[test]
    fn update_moves_estimate_by_feature_count() {
        let strategy = LineTuple;
        let mut network = strategy.tables();
        let board = Board::from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 1]);
        strategy.update(&mut network, &board, 1.);
        assert_eq!(strategy.estimate(&network, &board), 16.);
    }
}

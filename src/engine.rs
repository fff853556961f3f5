//! Board representation for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Board`: an immutable N×N configuration of labeled tiles plus one blank, with the
//!   reachability test, the two distance measures and move generation.
//! - `Slide`: the four directions the blank can travel, in generation order.
//! - `Neighbors`: the finite iterator over boards one slide away.
//! - `BoardError`: the ways a value sequence can fail to describe a board.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::iter::FusedIterator;
use thiserror::Error;

/// A tile label. `BLANK` marks the empty cell.
pub type Tile = u32;

/// The value used for the empty cell.
pub const BLANK: Tile = 0;

/// Errors raised while building a `Board` from a value sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("a board needs at least one cell")]
    Empty,

    #[error("{0} values cannot form a square board")]
    NotSquare(usize),

    #[error("values are not a permutation of 0..{0}")]
    NotPermutation(usize),
}

/// Result type for board construction
pub type BoardResult<T> = Result<T, BoardError>;

/// Direction in which the blank travels during one slide.
///
/// The declaration order is the generation order used by [`Board::neighbors`]:
/// down, up, right, left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slide {
    Down,
    Up,
    Right,
    Left,
}

impl Slide {
    /// All slides, in generation order.
    pub const ALL: [Slide; 4] = [Slide::Down, Slide::Up, Slide::Right, Slide::Left];

    /// Returns the (row, column) offset applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Slide::Down => (1, 0),
            Slide::Up => (-1, 0),
            Slide::Right => (0, 1),
            Slide::Left => (0, -1),
        }
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Slide::Down => "Down",
            Slide::Up => "Up",
            Slide::Right => "Right",
            Slide::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// One configuration of the puzzle.
///
/// `values` holds the tiles in row-major order and is always a permutation of
/// `0..size²`, where `0` is the blank. A `Board` is never mutated once built: every
/// slide produces a new `Board`. Equality and hashing are structural over `values`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    values: Vec<Tile>,
    size: usize,
}

impl Board {
    /// Creates a board from its row-major values.
    ///
    /// # Arguments
    /// * `values`: the tiles, row by row, with `0` for the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` when `values` has a perfect-square length and is a permutation of
    ///   `0..values.len()`.
    /// * `Err(BoardError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert!(Board::new(vec![1, 2, 0]).is_err());
    /// ```
    pub fn new(values: Vec<Tile>) -> BoardResult<Self> {
        let len = values.len();
        if len == 0 {
            return Err(BoardError::Empty);
        }
        let size = integer_sqrt(len).ok_or(BoardError::NotSquare(len))?;

        let mut seen = vec![false; len];
        for &value in &values {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(BoardError::NotPermutation(len))?;
            if *slot {
                return Err(BoardError::NotPermutation(len));
            }
            *slot = true;
        }

        Ok(Board { values, size })
    }

    /// Builds the canonical solved board: tiles `1..size²` in row-major order, then the blank.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn standard(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        let cells = size * size;
        let values = (1..cells as Tile).chain(std::iter::once(BLANK)).collect();
        Board { values, size }
    }

    /// Creates a board by walking the blank `slides` random steps away from the canonical
    /// solved board.
    ///
    /// The generator is a `SmallRng` seeded with `seed`, so the same arguments always give
    /// the same board. The result is at most `slides` moves away from `Board::standard(size)`.
    pub fn scrambled(size: usize, slides: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::standard(size);
        for _ in 0..slides {
            let options: Vec<Board> = board.neighbors().collect();
            match options.choose(&mut rng) {
                Some(next) => board = next.clone(),
                None => break,
            }
        }
        board
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The tiles in row-major order.
    pub fn values(&self) -> &[Tile] {
        &self.values
    }

    /// Flattened index of the blank.
    pub fn blank_index(&self) -> usize {
        self.values
            .iter()
            .position(|&v| v == BLANK)
            .expect("a constructed board always holds a blank")
    }

    /// Translates a flattened index into `(row, column)` coordinates.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Counts pairs `(i, j)` with `i < j`, both non-blank, where `values[i] > values[j]`.
    pub fn inversions(&self) -> usize {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                self.values[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Reports whether `other` can be reached from this board by sliding tiles.
    ///
    /// Only inversion parity is compared. That is the complete criterion for odd sizes.
    /// For even sizes the blank's row is ignored, so some pairs are misclassified.
    pub fn can_reach(&self, other: &Board) -> bool {
        self.inversions() % 2 == other.inversions() % 2
    }

    /// Number of cells whose values differ between the two boards.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let target = Board::standard(3);
    /// let board = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    /// assert_eq!(board.hamming(&target), 2);
    /// ```
    pub fn hamming(&self, other: &Board) -> u32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Sum over every value, blank included, of the row and column distance between its
    /// cell on this board and its cell on `other`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let target = Board::standard(3);
    /// let board = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    /// assert_eq!(board.manhattan(&target), 2);
    /// ```
    pub fn manhattan(&self, other: &Board) -> u32 {
        let mut other_index = vec![0usize; other.values.len()];
        for (i, &val) in other.values.iter().enumerate() {
            other_index[val as usize] = i;
        }

        let mut distance = 0;
        for (i, &val) in self.values.iter().enumerate() {
            let (cur_r, cur_c) = self.position(i);
            let target = other_index.get(val as usize).copied().unwrap_or(i);
            let (other_r, other_c) = other.position(target);
            distance += cur_r.abs_diff(other_r) + cur_c.abs_diff(other_c);
        }
        distance as u32
    }

    /// Boards one slide away, generated lazily in the order down, up, right, left.
    ///
    /// Only slides that keep the blank on the grid yield a board, so a corner blank has
    /// two neighbors, an edge blank three and an interior blank four.
    pub fn neighbors(&self) -> Neighbors<'_> {
        let blank = self.blank_index();
        Neighbors {
            board: self,
            blank,
            next_slide: 0,
        }
    }

    /// Applies a single slide, returning `None` when the blank would leave the grid.
    pub fn slide(&self, slide: Slide) -> Option<Board> {
        self.slide_from(self.blank_index(), slide)
    }

    fn slide_from(&self, blank: usize, slide: Slide) -> Option<Board> {
        let (row, col) = self.position(blank);
        let (dr, dc) = slide.as_offset();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;

        let mut values = self.values.clone();
        values.swap(blank, new_row * self.size + new_col);
        Some(Board {
            values,
            size: self.size,
        })
    }
}

impl fmt::Display for Board {
    /// Rows of space-separated values with the blank shown as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.values.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == BLANK {
                        "-".to_string()
                    } else {
                        v.to_string()
                    }
                })
                .collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Iterator over the boards one slide away from a given board.
///
/// Created by [`Board::neighbors`]. It is finite and cannot be restarted.
#[derive(Debug)]
pub struct Neighbors<'a> {
    board: &'a Board,
    blank: usize,
    next_slide: usize,
}

impl Iterator for Neighbors<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        while let Some(&slide) = Slide::ALL.get(self.next_slide) {
            self.next_slide += 1;
            if let Some(board) = self.board.slide_from(self.blank, slide) {
                return Some(board);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(Slide::ALL.len() - self.next_slide.min(Slide::ALL.len())))
    }
}

impl FusedIterator for Neighbors<'_> {}

/// Exact integer square root, if `n` is a perfect square.
pub(crate) fn integer_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    (root * root == n).then_some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(values: &[Tile]) -> Board {
        Board::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_board_new_valid() {
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(b.size(), 3);
        assert_eq!(b.values(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(b, Board::standard(3));
    }

    #[test]
    fn test_board_new_rejects_bad_input() {
        assert_eq!(Board::new(vec![]), Err(BoardError::Empty));
        assert_eq!(Board::new(vec![0, 1, 2]), Err(BoardError::NotSquare(3)));
        assert_eq!(Board::new(vec![0, 1, 1, 3]), Err(BoardError::NotPermutation(4)));
        assert_eq!(Board::new(vec![0, 1, 2, 4]), Err(BoardError::NotPermutation(4)));
    }

    #[test]
    fn test_board_single_cell() {
        let b = board(&[0]);
        assert_eq!(b.size(), 1);
        assert_eq!(b, Board::standard(1));
        assert_eq!(b.neighbors().count(), 0);
    }

    #[test]
    fn test_standard_board() {
        assert_eq!(Board::standard(2).values(), &[1, 2, 3, 0]);
        assert_eq!(
            Board::standard(4).values(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]
        );
    }

    #[test]
    fn test_inversions_ignore_blank() {
        assert_eq!(Board::standard(3).inversions(), 0);
        // 0 before everything must not count.
        assert_eq!(board(&[0, 1, 2, 3, 4, 5, 6, 7, 8]).inversions(), 0);
        assert_eq!(board(&[2, 1, 3, 4, 5, 6, 7, 8, 0]).inversions(), 1);
        assert_eq!(board(&[8, 7, 6, 5, 4, 3, 2, 1, 0]).inversions(), 28);
    }

    #[test]
    fn test_can_reach_parity() {
        let target = Board::standard(3);
        let swapped = board(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!swapped.can_reach(&target));
        assert!(target.can_reach(&target));
        assert!(board(&[1, 2, 3, 4, 5, 6, 0, 7, 8]).can_reach(&target));
    }

    #[test]
    fn test_distances_to_self_are_zero() {
        for seed in 0..10 {
            let b = Board::scrambled(3, 30, seed);
            assert_eq!(b.hamming(&b), 0);
            assert_eq!(b.manhattan(&b), 0);
        }
        let b4 = Board::scrambled(4, 40, 7);
        assert_eq!(b4.hamming(&b4), 0);
        assert_eq!(b4.manhattan(&b4), 0);
    }

    #[test]
    fn test_manhattan_counts_blank() {
        let target = Board::standard(3);
        // Blank and 8 swapped: each moved one column.
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(b.manhattan(&target), 2);
        assert_eq!(b.hamming(&target), 2);

        // Blank in the opposite corner; tiles shifted.
        let b = board(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        // Every tile v sits at index v but belongs at v-1; blank travels 4.
        let expected: u32 = (1..9u32)
            .map(|v| {
                let (r, c) = ((v / 3) as i32, (v % 3) as i32);
                let (tr, tc) = (((v - 1) / 3) as i32, ((v - 1) % 3) as i32);
                ((r - tr).abs() + (c - tc).abs()) as u32
            })
            .sum::<u32>()
            + 4;
        assert_eq!(b.manhattan(&target), expected);
    }

    #[test]
    fn test_neighbors_order_interior() {
        let b = board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let neighbors: Vec<Board> = b.neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                board(&[1, 2, 3, 4, 7, 5, 6, 0, 8]), // down
                board(&[1, 0, 3, 4, 2, 5, 6, 7, 8]), // up
                board(&[1, 2, 3, 4, 5, 0, 6, 7, 8]), // right
                board(&[1, 2, 3, 0, 4, 5, 6, 7, 8]), // left
            ]
        );
    }

    #[test]
    fn test_neighbors_count_by_blank_position() {
        // Blank at every cell of a 3x3 board.
        let expected = [2, 3, 2, 3, 4, 3, 2, 3, 2];
        for (blank, &count) in expected.iter().enumerate() {
            let mut values: Vec<Tile> = (1..9).collect();
            values.insert(blank, 0);
            let b = board(&values);
            assert_eq!(
                b.neighbors().count(),
                count,
                "Wrong neighbor count with blank at index {}",
                blank
            );
        }
    }

    #[test]
    fn test_neighbors_stay_reachable() {
        for seed in 0..20 {
            let b = Board::scrambled(3, 25, seed);
            for n in b.neighbors() {
                assert!(b.can_reach(&n), "Neighbor changed reachability class");
                assert_eq!(b.hamming(&n), 2);
                assert_eq!(b.manhattan(&n), 2);
            }
        }
    }

    #[test]
    fn test_neighbors_leave_source_board_untouched() {
        let b = Board::standard(3);
        let before = b.clone();
        let _all: Vec<Board> = b.neighbors().collect();
        assert_eq!(b, before);
    }

    #[test]
    fn test_neighbors_is_fused() {
        let b = Board::standard(2);
        let mut it = b.neighbors();
        assert_eq!(it.next(), Some(board(&[1, 0, 3, 2]))); // up
        assert_eq!(it.next(), Some(board(&[1, 2, 0, 3]))); // left
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_slide_out_of_bounds() {
        let b = Board::standard(3); // blank bottom-right
        assert!(b.slide(Slide::Down).is_none());
        assert!(b.slide(Slide::Right).is_none());
        assert_eq!(b.slide(Slide::Up), Some(board(&[1, 2, 3, 4, 5, 0, 7, 8, 6])));
        assert_eq!(b.slide(Slide::Left), Some(board(&[1, 2, 3, 4, 5, 6, 7, 0, 8])));
    }

    #[test]
    fn test_scrambled_is_deterministic_and_reachable() {
        let a = Board::scrambled(3, 50, 514514);
        let b = Board::scrambled(3, 50, 514514);
        assert_eq!(a, b);
        assert!(a.can_reach(&Board::standard(3)));
        assert_eq!(Board::scrambled(4, 50, 514514), Board::scrambled(4, 50, 514514));
        assert_eq!(Board::scrambled(3, 0, 1), Board::standard(3));
    }

    #[test]
    fn test_display() {
        let b = board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(b.to_string(), "1 2 3\n4 - 5\n6 7 8");
        let wide = board(&[10, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 12, 13, 14, 15]);
        assert_eq!(wide.to_string(), "10 - 1 2\n3 4 5 6\n7 8 9 11\n12 13 14 15");
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(0), Some(0));
        assert_eq!(integer_sqrt(9), Some(3));
        assert_eq!(integer_sqrt(10), None);
        assert_eq!(integer_sqrt(16), Some(4));
    }
}

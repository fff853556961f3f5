use crate::engine::Board;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Estimates how many slides separate a board from a target.
///
/// The solver only requires that the estimate is zero when both boards are equal; it
/// returns shortest paths when the estimate never exceeds the true distance.
///
/// Any `Fn(&Board, &Board) -> u32` is a heuristic, so custom estimates can be passed as
/// closures:
///
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Heuristic;
///
/// let zero = |_: &Board, _: &Board| 0u32;
/// let board = Board::standard(3);
/// assert_eq!(zero.estimate(&board, &board), 0);
/// ```
pub trait Heuristic {
    /// Returns the estimated number of slides from `board` to `target`.
    fn estimate(&self, board: &Board, target: &Board) -> u32;
}

impl<F> Heuristic for F
where
    F: Fn(&Board, &Board) -> u32,
{
    fn estimate(&self, board: &Board, target: &Board) -> u32 {
        self(board, target)
    }
}

/// The built-in distance measures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Distance {
    /// Number of cells holding a different value.
    Hamming,
    /// Sum of per-value row and column offsets, blank included.
    #[default]
    Manhattan,
}

impl Distance {
    /// Every built-in distance, in a fixed order.
    pub const ALL: [Distance; 2] = [Distance::Hamming, Distance::Manhattan];

    /// The name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Distance::Hamming => "hamming",
            Distance::Manhattan => "manhattan",
        }
    }
}

impl Heuristic for Distance {
    fn estimate(&self, board: &Board, target: &Board) -> u32 {
        match self {
            Distance::Hamming => board.hamming(target),
            Distance::Manhattan => board.manhattan(target),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(Distance::Hamming),
            "manhattan" => Ok(Distance::Manhattan),
            other => Err(format!(
                "Unknown distance '{}'; expected 'hamming' or 'manhattan'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_manhattan() {
        assert_eq!(Distance::default(), Distance::Manhattan);
    }

    #[test]
    fn test_distance_matches_board_methods() {
        let target = Board::standard(3);
        let board = Board::new(vec![4, 1, 3, 0, 2, 6, 7, 5, 8]).unwrap();
        assert_eq!(
            Distance::Hamming.estimate(&board, &target),
            board.hamming(&target)
        );
        assert_eq!(
            Distance::Manhattan.estimate(&board, &target),
            board.manhattan(&target)
        );
    }

    #[test]
    fn test_builtin_distances_are_zero_on_equal_boards() {
        for distance in Distance::ALL {
            for seed in 0..5 {
                let board = Board::scrambled(3, 20, seed);
                assert_eq!(distance.estimate(&board, &board), 0, "{} not zero", distance);
            }
        }
    }

    #[test]
    fn test_closure_is_a_heuristic() {
        let constant = |_: &Board, _: &Board| 7u32;
        let board = Board::standard(2);
        assert_eq!(constant.estimate(&board, &board), 7);
        assert_eq!(Heuristic::estimate(&Board::hamming, &board, &board), 0);
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("hamming".parse::<Distance>(), Ok(Distance::Hamming));
        assert_eq!(" Manhattan ".parse::<Distance>(), Ok(Distance::Manhattan));
        assert!("euclid".parse::<Distance>().unwrap_err().contains("euclid"));
        for distance in Distance::ALL {
            assert_eq!(distance.to_string().parse::<Distance>(), Ok(distance));
        }
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            <Distance as ValueEnum>::from_str("hamming", false),
            Ok(Distance::Hamming)
        );
        assert!(<Distance as ValueEnum>::from_str("chebyshev", false).is_err());
    }
}

use crate::engine::{integer_sqrt, Board, BoardError, Tile};
use crate::solver::Solution;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Delimiter written between the rendered path and the summary record.
pub const SEPARATOR: &str = "---";

/// Errors raised while reading boards or writing solutions.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid token '{0}'; expected a non-negative integer, '-' or '.'")]
    InvalidToken(String),

    #[error("the board has {0} cells, which is not a square")]
    NotSquare(usize),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("failed to encode the summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for reading and writing puzzle files
pub type InputResult<T> = Result<T, InputError>;

/// Parses a board from whitespace-separated integers.
///
/// The blank may be written as `0`, `-` or `.`. Line breaks carry no meaning; only the
/// token count matters, and it must be a perfect square.
///
/// # Arguments
/// * `s`: the text to parse.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(InputError)` if a token is not an integer, the token count is not a square, or
///   the values are not a permutation of `0..count`.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
/// use npuzzle_solver::engine::Board;
///
/// let board = board_from_str("1 2 3\n4 5 6\n7 8 -").unwrap();
/// assert_eq!(board, Board::standard(3));
///
/// assert!(board_from_str("1 2 3").is_err());
/// assert!(board_from_str("1 2 x 0").is_err());
/// ```
pub fn board_from_str(s: &str) -> InputResult<Board> {
    let normalized = s.replace(['-', '.'], "0");
    let values = normalized
        .split_whitespace()
        .map(|token| {
            token
                .parse::<Tile>()
                .map_err(|_| InputError::InvalidToken(token.to_string()))
        })
        .collect::<InputResult<Vec<Tile>>>()?;

    if values.is_empty() || integer_sqrt(values.len()).is_none() {
        return Err(InputError::NotSquare(values.len()));
    }
    Ok(Board::new(values)?)
}

/// Reads and parses a board file.
pub fn read_board_file(path: &Path) -> InputResult<Board> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    board_from_str(&content)
}

/// Renders a solution as text.
///
/// Each board of the path is printed as rows of values with the blank shown as `-`,
/// boards are separated by a blank line, then comes the `---` delimiter and a one-line
/// JSON record with `reachable` and `moves`.
pub fn render_solution(solution: &Solution) -> InputResult<String> {
    let boards: Vec<String> = solution.path.iter().map(|b| b.to_string()).collect();
    let summary = serde_json::to_string(&solution.summary())?;
    Ok(format!("{}\n{}\n{}\n", boards.join("\n\n"), SEPARATOR, summary))
}

/// Writes the rendered solution to `path`, replacing any existing file.
pub fn write_solution(path: &Path, solution: &Solution) -> InputResult<()> {
    let rendered = render_solution(solution)?;
    fs::write(path, rendered).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

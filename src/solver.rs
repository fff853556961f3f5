//! Informed search for the shortest slide sequence between two boards.
//!
//! The search is a priority-first (A*-style) exploration bounded by a move ceiling.
//! Nodes live in an arena and point at their predecessor by index; the frontier is a
//! min-ordered `BinaryHeap` and a best-cost table keyed by board prunes revisits that
//! cannot improve on a known path.

use crate::engine::Board;
use crate::heuristics::{Distance, Heuristic};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Nodes whose move count reaches this ceiling are discarded without expansion.
pub const MAX_MOVES: u32 = 36;

/// Move count reported when the frontier empties without reaching the target.
pub const UNREACHABLE_MOVES: u32 = 200_000;

/// Errors raised by the consistency check that runs before every search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("sizes of start ({start}) and target ({target}) boards are not consistent")]
    SizeMismatch { start: usize, target: usize },

    #[error("heuristic gives {0} for the target compared with itself; it must give 0")]
    InconsistentHeuristic(u32),
}

/// Result type for solver operations
pub type SolveResult<T> = Result<T, SolveError>;

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Move ceiling; nodes with this many moves or more are never expanded.
    pub max_moves: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_moves: MAX_MOVES,
        }
    }
}

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Whether the target was reached within the move ceiling.
    pub reachable: bool,
    /// Number of slides on the path, `0` when the parity test rejects the target, or
    /// `UNREACHABLE_MOVES` when the search ran out of nodes.
    pub moves: u32,
    /// Boards from start to target on success; only the start board otherwise.
    pub path: Vec<Board>,
}

impl Solution {
    fn unreachable(start: &Board, moves: u32) -> Self {
        Solution {
            reachable: false,
            moves,
            path: vec![start.clone()],
        }
    }

    /// The record written after the rendered path.
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            reachable: self.reachable,
            moves: self.moves,
        }
    }
}

/// `Solution` without its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SolutionSummary {
    pub reachable: bool,
    pub moves: u32,
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Nodes pushed onto the frontier, root included.
    pub generated: usize,
    /// Neighbors skipped because a cheaper path was already known.
    pub pruned: usize,
    /// Nodes dropped for reaching the move ceiling.
    pub discarded: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

#[derive(Debug)]
struct SearchNode {
    board: Board,
    cost: u32,
    predecessor: Option<usize>,
    priority: u32,
}

/// Arena owning every node created by one search.
#[derive(Debug, Default)]
struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    fn push(&mut self, node: SearchNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn node(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    /// Boards from the root to the node at `index`, in that order.
    fn reconstruct_path(&self, index: usize) -> Vec<Board> {
        let mut boards = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let node = self.node(i);
            boards.push(node.board.clone());
            current = node.predecessor;
        }
        boards.reverse();
        boards
    }
}

/// Frontier entry: priority first, then insertion sequence so equal priorities pop
/// in the order they were pushed.
type FrontierEntry = Reverse<(u32, u64, usize)>;

/// Finds a shortest slide sequence from a start board to a target board.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Distance;
/// use npuzzle_solver::solver::Solver;
///
/// let start = Board::new(vec![1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
/// let solution = Solver::new(start, None, Distance::Manhattan).solve().unwrap();
/// assert!(solution.reachable);
/// assert_eq!(solution.moves, 2);
/// assert_eq!(solution.path.len(), 3);
/// ```
pub struct Solver<H = Distance> {
    start: Board,
    target: Board,
    heuristic: H,
    config: SolverConfig,
}

impl<H: Heuristic> Solver<H> {
    /// Creates a solver. Without an explicit target the canonical solved board of the
    /// start board's size is used.
    pub fn new(start: Board, target: Option<Board>, heuristic: H) -> Self {
        let target = target.unwrap_or_else(|| Board::standard(start.size()));
        Self {
            start,
            target,
            heuristic,
            config: SolverConfig::default(),
        }
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn target(&self) -> &Board {
        &self.target
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Checks that the boards have the same size and that the heuristic gives zero
    /// for the target compared with itself.
    pub fn check_consistency(&self) -> SolveResult<()> {
        if self.start.size() != self.target.size() {
            return Err(SolveError::SizeMismatch {
                start: self.start.size(),
                target: self.target.size(),
            });
        }
        let self_distance = self.heuristic.estimate(&self.target, &self.target);
        if self_distance != 0 {
            return Err(SolveError::InconsistentHeuristic(self_distance));
        }
        Ok(())
    }

    /// Runs the search.
    pub fn solve(&self) -> SolveResult<Solution> {
        self.solve_with_stats().map(|(solution, _)| solution)
    }

    /// Runs the search and also returns its counters.
    pub fn solve_with_stats(&self) -> SolveResult<(Solution, SearchStats)> {
        self.check_consistency()?;

        let mut stats = SearchStats::default();

        if !self.start.can_reach(&self.target) {
            debug!("target has a different inversion parity; skipping search");
            return Ok((Solution::unreachable(&self.start, 0), stats));
        }

        let root_priority = self.heuristic.estimate(&self.start, &self.target);
        info!(
            size = self.start.size(),
            estimate = root_priority,
            max_moves = self.config.max_moves,
            "starting search"
        );

        let mut tree = SearchTree::default();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut sequence: u64 = 0;

        let root = tree.push(SearchNode {
            board: self.start.clone(),
            cost: 0,
            predecessor: None,
            priority: root_priority,
        });
        frontier.push(Reverse((root_priority, sequence, root)));
        stats.generated += 1;
        stats.max_frontier = 1;

        // Lowest known move count for each board reached so far.
        let mut best_cost: FxHashMap<Board, u32> = FxHashMap::default();
        best_cost.insert(self.start.clone(), 0);

        while let Some(Reverse((_, _, index))) = frontier.pop() {
            let node = tree.node(index);
            let cost = node.cost;

            if cost >= self.config.max_moves {
                stats.discarded += 1;
                continue;
            }

            if node.board == self.target {
                let path = tree.reconstruct_path(index);
                info!(
                    moves = cost,
                    expanded = stats.expanded,
                    generated = stats.generated,
                    "target reached"
                );
                return Ok((
                    Solution {
                        reachable: true,
                        moves: cost,
                        path,
                    },
                    stats,
                ));
            }

            trace!(cost, priority = node.priority, board = %node.board, "expanding");
            stats.expanded += 1;

            let candidate_cost = cost + 1;
            let neighbors: Vec<Board> = node.board.neighbors().collect();
            for neighbor in neighbors {
                let known = best_cost.get(&neighbor).copied().unwrap_or(cost + 2);
                if known < candidate_cost {
                    stats.pruned += 1;
                    continue;
                }
                best_cost.insert(neighbor.clone(), candidate_cost);

                let priority = candidate_cost + self.heuristic.estimate(&neighbor, &self.target);
                let child = tree.push(SearchNode {
                    board: neighbor,
                    cost: candidate_cost,
                    predecessor: Some(index),
                    priority,
                });
                sequence += 1;
                frontier.push(Reverse((priority, sequence, child)));
                stats.generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        info!(
            expanded = stats.expanded,
            discarded = stats.discarded,
            "frontier exhausted without reaching the target"
        );
        Ok((Solution::unreachable(&self.start, UNREACHABLE_MOVES), stats))
    }
}

pub mod axis;
pub mod candidates;
pub mod line;

use std::collections::VecDeque;

use crossbeam::channel::{Sender, TrySendError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, SolveError};
use crate::nonogram::{CellState, Clue, HintMatrix};
use axis::{Axis, AxisKind};

pub use candidates::candidates;

// * A solver

/// A solver for nonograms.
///
/// Each row and column is solved on its own.  For a clue, every
/// possible distribution of the runs of filled cells is enumerated,
/// for example for 1 2 in a 6-wide line:
///
/// <pre>
/// X_XX__
/// X__XX_
/// X___XX
/// _X_XX_
/// _X__XX
/// __X_XX
/// </pre>
///
/// Distributions that don't fit what we already know of the line are
/// dropped, and cells that are the same in every remaining one are
/// decided.
///
/// Then, iteratively:
///
///  1. Every column learns what the rows decided, and narrows itself.
///
///  2. Every row learns what the columns decided, and narrows itself.
///
/// until every cell is decided, or a round decides nothing new, in
/// which case the puzzle needs more than line logic and is given up
/// on.
#[derive(Debug)]
pub struct Solver {
    rows: Axis,
    cols: Axis,
    sink: Option<Sender<Notification>>,
    /// Notifications the sink had no room for yet.
    backlog: VecDeque<Notification>,
    rounds: usize,
}

/// A decided cell, as sent to a notification sink.  Coordinates
/// start at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Notification {
    pub row: usize,
    pub col: usize,
    pub filled: bool,
}

impl Solver {
    pub fn new(rows: Vec<Clue>, cols: Vec<Clue>) -> Result<Solver, ConfigError> {
        if rows.is_empty() {
            return Err(ConfigError::NoClues {
                axis: AxisKind::Row,
            });
        }
        if cols.is_empty() {
            return Err(ConfigError::NoClues {
                axis: AxisKind::Column,
            });
        }
        let (width, height) = (cols.len(), rows.len());
        Ok(Solver {
            rows: Axis::new(AxisKind::Row, width, rows)?,
            cols: Axis::new(AxisKind::Column, height, cols)?,
            sink: None,
            backlog: VecDeque::new(),
            rounds: 0,
        })
    }

    /// Build a solver that sends every decided cell to `sink`, once.
    ///
    /// Sending never waits for a reader.  When a bounded `sink` is
    /// full, notifications are held back and retried after the next
    /// round; whatever is still held back when [Solver::solve]
    /// returns is dropped with a warning.
    pub fn with_notifications(
        rows: Vec<Clue>,
        cols: Vec<Clue>,
        sink: Sender<Notification>,
    ) -> Result<Solver, ConfigError> {
        let solver = Solver::new(rows, cols)?;
        Ok(Solver {
            rows: solver.rows.record_changes(),
            sink: Some(sink),
            ..solver
        })
    }

    pub fn width(&self) -> usize {
        self.cols.lines().len()
    }

    pub fn height(&self) -> usize {
        self.rows.lines().len()
    }

    /// The grid as currently known, row by row.
    ///
    /// [Solver::solve] holds the solver mutably until it returns, so
    /// this shows the grid before or after a solve (including a
    /// failed one).  Follow a solve while it runs through the
    /// notification sink.
    pub fn state(&self) -> HintMatrix {
        self.rows.hints()
    }

    /// The grid as known to the column solvers, column by column.
    /// Once a solve succeeds this is the transpose of
    /// [Solver::state].
    pub fn column_state(&self) -> HintMatrix {
        self.cols.hints()
    }

    /// Number of full rounds the last call to [Solver::solve] ran.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Alternate column and row passes until every cell is decided.
    ///
    /// Fails on the first line that contradicts the grid or can't be
    /// filled at all, or with [SolveError::Dubious] as soon as a
    /// round makes no progress.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        let result = self.converge();
        if !self.backlog.is_empty() {
            warn!(
                dropped = self.backlog.len(),
                "notification sink is full, dropping notifications"
            );
            self.backlog.clear();
        }
        result
    }

    fn converge(&mut self) -> Result<(), SolveError> {
        self.rounds = 0;
        let mut undecided = count_undecided(&self.rows.hints());
        while undecided > 0 {
            self.rounds += 1;
            self.cols.work(&transpose(&self.rows.hints()))?;
            self.rows.work(&transpose(&self.cols.hints()))?;
            self.notify();

            let left = count_undecided(&self.rows.hints());
            debug!(round = self.rounds, undecided = left, "round finished");
            if left == undecided {
                warn!(undecided = left, "no progress, giving up");
                return Err(SolveError::Dubious { undecided: left });
            }
            undecided = left;
        }
        // Bring the columns up to date with the final rows.
        self.cols.work(&transpose(&self.rows.hints()))
    }

    fn notify(&mut self) {
        let changes = self.rows.take_changes();
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        self.backlog.extend(changes.into_iter().map(|change| Notification {
            row: change.line + 1,
            col: change.cell + 1,
            filled: change.filled,
        }));

        let mut gone = false;
        while let Some(notification) = self.backlog.pop_front() {
            match sink.try_send(notification) {
                Ok(()) => (),
                Err(TrySendError::Full(notification)) => {
                    self.backlog.push_front(notification);
                    debug!(held = self.backlog.len(), "notification sink is full");
                    break;
                }
                Err(TrySendError::Disconnected(_)) => {
                    gone = true;
                    break;
                }
            }
        }
        if gone {
            debug!("notification receiver is gone, dropping the sink");
            self.sink = None;
            self.backlog.clear();
        }
    }
}

/// Swap rows and columns.
pub fn transpose(grid: &[Vec<CellState>]) -> HintMatrix {
    let width = grid.first().map_or(0, Vec::len);
    (0..width)
        .map(|x| grid.iter().map(|row| row[x]).collect())
        .collect()
}

pub fn count_undecided(grid: &[Vec<CellState>]) -> usize {
    grid.iter()
        .flatten()
        .filter(|cell| !cell.is_decided())
        .count()
}

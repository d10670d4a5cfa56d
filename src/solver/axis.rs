use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use super::line::LineSolver;
use crate::error::{ConfigError, LineError, SolveError};
use crate::nonogram::{CellState, Clue, HintMatrix};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisKind {
    Row,
    Column,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AxisKind::Row => write!(f, "row"),
            AxisKind::Column => write!(f, "column"),
        }
    }
}

/// A cell of an axis that got decided, `line` and `cell` counted from
/// zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub line: usize,
    pub cell: usize,
    pub filled: bool,
}

/// Every row, or every column, of a puzzle.
#[derive(Debug, Clone)]
pub struct Axis {
    kind: AxisKind,
    lines: Vec<LineSolver>,
    /// `None` when nobody listens for changes.
    changes: Option<Vec<Change>>,
}

impl Axis {
    /// Create an axis of `clues.len()` lines, each `depth` cells
    /// long.
    pub fn new(kind: AxisKind, depth: usize, clues: Vec<Clue>) -> Result<Axis, ConfigError> {
        if clues.is_empty() {
            return Err(ConfigError::NoClues { axis: kind });
        }
        let lines = clues
            .into_iter()
            .map(|clue| LineSolver::new(depth, clue))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Axis {
            kind,
            lines,
            changes: None,
        })
    }

    /// Record every decided cell, to be collected with
    /// [Axis::take_changes].
    pub fn record_changes(self) -> Self {
        Axis {
            kind: self.kind,
            lines: self
                .lines
                .into_iter()
                .map(LineSolver::record_changes)
                .collect(),
            changes: Some(vec![]),
        }
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn lines(&self) -> &[LineSolver] {
        &self.lines
    }

    /// What is known of every line of the axis.
    pub fn hints(&self) -> HintMatrix {
        self.lines.iter().map(|l| l.hint().to_vec()).collect()
    }

    /// Take every change forwarded since the last call.
    pub fn take_changes(&mut self) -> Vec<Change> {
        self.changes.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Narrow every line of the axis with its row of `hints`, all
    /// lines at once.
    ///
    /// Every line runs to completion even if another one fails; the
    /// error of the lowest failing line is returned.
    ///
    /// # Panics
    ///
    /// If `hints` doesn't have one entry per line, or one of them
    /// has the wrong length.
    pub fn work(&mut self, hints: &[Vec<CellState>]) -> Result<(), SolveError> {
        assert_eq!(
            hints.len(),
            self.lines.len(),
            "hint count doesn't match the {} count",
            self.kind
        );

        let results: Vec<Result<(), LineError>> = self
            .lines
            .par_iter_mut()
            .zip(hints.par_iter())
            .map(|(line, hint)| line.narrow(hint))
            .collect();

        let failures = results.iter().filter(|r| r.is_err()).count();
        debug!(axis = %self.kind, lines = self.lines.len(), failures, "axis pass");

        let first_failure = results
            .into_iter()
            .enumerate()
            .find_map(|(line, r)| r.err().map(|source| (line, source)));
        if let Some((line, source)) = first_failure {
            return Err(SolveError::Line {
                axis: self.kind,
                line,
                source,
            });
        }

        if let Some(changes) = self.changes.as_mut() {
            for (line, solver) in self.lines.iter_mut().enumerate() {
                changes.extend(
                    solver
                        .take_changes()
                        .into_iter()
                        .map(|(cell, filled)| Change { line, cell, filled }),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::*;

    #[test]
    fn empty_clue_list_is_rejected() {
        assert_eq!(
            Axis::new(AxisKind::Column, 3, vec![]).unwrap_err(),
            ConfigError::NoClues {
                axis: AxisKind::Column
            }
        );
        assert_eq!(
            Axis::new(AxisKind::Row, 0, vec![vec![1]]).unwrap_err(),
            ConfigError::ZeroLength
        );
    }

    #[test]
    fn works_every_line() {
        let mut axis = Axis::new(AxisKind::Row, 4, vec![vec![3]]).unwrap();
        axis.work(&[vec![Empty, Undecided, Undecided, Undecided]]).unwrap();
        assert_eq!(axis.hints(), vec![vec![Empty, Filled, Filled, Filled]]);
    }

    #[test]
    fn first_failing_line_wins_and_others_still_run() {
        let clues = vec![vec![3], vec![4], vec![3], vec![1, 1]];
        let mut axis = Axis::new(AxisKind::Row, 3, clues).unwrap();
        let err = axis
            .work(&[
                vec![Undecided; 3],
                vec![Undecided; 3],
                vec![Undecided; 3],
                vec![Undecided; 3],
            ])
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::Line {
                axis: AxisKind::Row,
                line: 1,
                source: LineError::Unsolvable,
            }
        );
        // Lines after the failure ran anyway.
        assert_eq!(axis.lines()[2].hint(), &[Filled; 3]);
        assert_eq!(axis.lines()[3].hint(), &[Filled, Empty, Filled]);
    }

    #[test]
    fn changes_are_tagged_with_their_line() {
        let mut axis = Axis::new(AxisKind::Column, 2, vec![vec![], vec![2]])
            .unwrap()
            .record_changes();
        axis.work(&[vec![Undecided; 2], vec![Undecided; 2]]).unwrap();
        assert_eq!(
            axis.take_changes(),
            vec![
                Change {
                    line: 0,
                    cell: 0,
                    filled: false,
                },
                Change {
                    line: 0,
                    cell: 1,
                    filled: false,
                },
                Change {
                    line: 1,
                    cell: 0,
                    filled: true,
                },
                Change {
                    line: 1,
                    cell: 1,
                    filled: true,
                },
            ]
        );
        assert!(axis.take_changes().is_empty());
    }

    #[test]
    fn no_changes_unless_recording() {
        let mut axis = Axis::new(AxisKind::Row, 1, vec![vec![1]]).unwrap();
        axis.work(&[vec![Undecided]]).unwrap();
        assert!(axis.take_changes().is_empty());
    }
}

use std::io;

use thiserror::Error;

use crate::nonogram::CellState;
use crate::solver::axis::AxisKind;

/// Invalid arguments when building a line, an axis or a solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("line length must be at least 1")]
    ZeroLength,

    #[error("no {axis} clues given")]
    NoClues { axis: AxisKind },
}

/// Failure of a single line to narrow its hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("cell {cell} is {known:?} but the incoming hint says {hint:?}")]
    Contradiction {
        cell: usize,
        hint: CellState,
        known: CellState,
    },

    #[error("no filling of the clue fits the known cells")]
    Unsolvable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("{axis} {line}: {source}")]
    Line {
        axis: AxisKind,
        line: usize,
        #[source]
        source: LineError,
    },

    /// A full round decided nothing new.  Line logic alone can't
    /// finish this puzzle.
    #[error("dubious puzzle: no progress with {undecided} cells undecided")]
    Dubious { undecided: usize },
}

impl SolveError {
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self,
            SolveError::Line {
                source: LineError::Contradiction { .. },
                ..
            }
        )
    }

    pub fn is_unsolvable(&self) -> bool {
        matches!(
            self,
            SolveError::Line {
                source: LineError::Unsolvable,
                ..
            }
        )
    }

    pub fn is_dubious(&self) -> bool {
        matches!(self, SolveError::Dubious { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("width is missing")]
    MissingWidth,

    #[error("height is missing")]
    MissingHeight,

    #[error("width was already set")]
    WidthAlreadySet,

    #[error("height was already set")]
    HeightAlreadySet,

    #[error("height is {height} but {rows} row clues were given")]
    RowCount { height: usize, rows: usize },

    #[error("width is {width} but {cols} column clues were given")]
    ColumnCount { width: usize, cols: usize },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read puzzle")]
    Io(#[from] io::Error),

    #[error("line {line}: expected a number")]
    Int { line: usize },

    #[error("invalid puzzle")]
    Builder(#[from] BuilderError),
}

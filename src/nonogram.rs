use crossbeam::channel::Sender;
use serde::Serialize;

use crate::error::{BuilderError, ConfigError};
use crate::solver::{Notification, Solver};

// * The Nonogram type

/// A puzzle description: the grid dimensions and a clue for every
/// row and column.  The solution itself lives in a [Solver].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonogram {
    width: usize,
    height: usize,
    rows: Vec<Clue>,
    cols: Vec<Clue>,
}

impl Nonogram {
    pub fn new(width: usize, height: usize, cols: Vec<Clue>, rows: Vec<Clue>) -> Nonogram {
        Nonogram {
            width,
            height,
            rows,
            cols,
        }
    }

    pub fn builder() -> NonogramBuilder {
        NonogramBuilder::new()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Clue] {
        &self.rows
    }

    pub fn cols(&self) -> &[Clue] {
        &self.cols
    }

    pub fn solver(&self) -> Result<Solver, ConfigError> {
        Solver::new(self.rows.clone(), self.cols.clone())
    }

    /// Like [Nonogram::solver], but every decided cell is also sent
    /// to `sink`.
    pub fn solver_with_notifications(
        &self,
        sink: Sender<Notification>,
    ) -> Result<Solver, ConfigError> {
        Solver::with_notifications(self.rows.clone(), self.cols.clone(), sink)
    }
}

/// Run lengths of the filled stretches of a line, in order.
pub type Clue = Vec<usize>;

/// Known state of a whole grid, row by row.
pub type HintMatrix = Vec<Vec<CellState>>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CellState {
    #[default]
    Undecided,
    Empty,
    Filled,
}

impl From<bool> for CellState {
    fn from(b: bool) -> Self {
        match b {
            true => CellState::Filled,
            false => CellState::Empty,
        }
    }
}

impl CellState {
    pub fn is_decided(&self) -> bool {
        *self != CellState::Undecided
    }

    /// Determine if a candidate cell can be laid over self.  This is
    /// true if self is [CellState::Undecided], or if self and the
    /// candidate agree.
    pub fn accepts(&self, filled: bool) -> bool {
        match self {
            CellState::Undecided => true,
            CellState::Empty => !filled,
            CellState::Filled => filled,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            CellState::Undecided => '?',
            CellState::Empty => ' ',
            CellState::Filled => '█',
        }
    }
}

/// Generate a simple representation of a grid using Unicode
/// box-drawing characters.
pub fn as_text(grid: &[Vec<CellState>]) -> String {
    let mut ret = String::new();
    for row in grid {
        ret.extend(row.iter().map(CellState::as_char));
        ret.push('\n')
    }
    ret
}

pub struct NonogramBuilder {
    width: Option<usize>,
    height: Option<usize>,
    rows: Vec<Clue>,
    cols: Vec<Clue>,
}

type BuilderResult<T> = Result<T, BuilderError>;

impl NonogramBuilder {
    pub fn new() -> NonogramBuilder {
        NonogramBuilder {
            width: None,
            height: None,
            rows: vec![],
            cols: vec![],
        }
    }

    pub fn width(&mut self, width: usize) -> BuilderResult<&mut Self> {
        match self.width {
            Some(_) => Err(BuilderError::WidthAlreadySet),
            None => {
                self.width = Some(width);
                Ok(self)
            }
        }
    }

    pub fn height(&mut self, height: usize) -> BuilderResult<&mut Self> {
        match self.height {
            Some(_) => Err(BuilderError::HeightAlreadySet),
            None => {
                self.height = Some(height);
                Ok(self)
            }
        }
    }

    pub fn push_row_clue(&mut self, clue: Clue) -> &mut Self {
        self.rows.push(clue);
        self
    }

    pub fn push_col_clue(&mut self, clue: Clue) -> &mut Self {
        self.cols.push(clue);
        self
    }

    /// Check that both dimensions are known and match the number of
    /// clues.  Returns `(width, height)`.
    pub fn validate(&self) -> BuilderResult<(usize, usize)> {
        let width = self.width.ok_or(BuilderError::MissingWidth)?;
        let height = self.height.ok_or(BuilderError::MissingHeight)?;
        if height != self.rows.len() {
            return Err(BuilderError::RowCount {
                height,
                rows: self.rows.len(),
            });
        }
        if width != self.cols.len() {
            return Err(BuilderError::ColumnCount {
                width,
                cols: self.cols.len(),
            });
        }
        Ok((width, height))
    }

    pub fn build(self) -> BuilderResult<Nonogram> {
        let (width, height) = self.validate()?;
        Ok(Nonogram::new(width, height, self.cols, self.rows))
    }
}

impl Default for NonogramBuilder {
    fn default() -> Self {
        NonogramBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::*;

    #[test]
    fn accepts_only_compatible_cells() {
        assert!(Undecided.accepts(true));
        assert!(Undecided.accepts(false));
        assert!(Filled.accepts(true));
        assert!(!Filled.accepts(false));
        assert!(Empty.accepts(false));
        assert!(!Empty.accepts(true));
    }

    #[test]
    fn renders_grid_as_text() {
        let grid = vec![vec![Filled, Empty, Undecided], vec![Empty, Filled, Filled]];
        assert_eq!(as_text(&grid), "█ ?\n ██\n");
    }

    #[test]
    fn builder_checks_dimensions() {
        let mut builder = Nonogram::builder();
        builder.width(2).unwrap().height(1).unwrap();
        builder.push_row_clue(vec![2]);
        builder.push_col_clue(vec![1]);
        assert_eq!(
            builder.validate(),
            Err(BuilderError::ColumnCount { width: 2, cols: 1 })
        );
        builder.push_col_clue(vec![1]);
        let nono = builder.build().unwrap();
        assert_eq!(nono.width(), 2);
        assert_eq!(nono.height(), 1);
        assert_eq!(nono.rows(), &[vec![2]]);
    }

    #[test]
    fn builder_rejects_second_width() {
        let mut builder = NonogramBuilder::new();
        builder.width(3).unwrap();
        assert!(matches!(
            builder.width(4),
            Err(BuilderError::WidthAlreadySet)
        ));
        assert_eq!(builder.validate(), Err(BuilderError::MissingHeight));

        builder.height(1).unwrap();
        assert!(matches!(
            builder.height(2),
            Err(BuilderError::HeightAlreadySet)
        ));
        builder.push_row_clue(vec![3]);
        for _ in 0..3 {
            builder.push_col_clue(vec![1]);
        }
        // The first width and height stick.
        let nono = builder.build().unwrap();
        assert_eq!((nono.width(), nono.height()), (3, 1));
    }
}

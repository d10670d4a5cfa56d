use tracing::trace;

use super::candidates::candidates;
use crate::error::{ConfigError, LineError};
use crate::nonogram::{CellState, Clue};

/// A cell of a line that went from undecided to decided.
pub type LineChange = (usize, bool);

/// Solves a single row (or column), narrowing what is known of it
/// every time the rest of the grid has something new to say.
#[derive(Debug, Clone)]
pub struct LineSolver {
    clue: Clue,
    hint: Vec<CellState>,
    /// Whether the candidates have been computed at least once.
    primed: bool,
    /// Cells decided since the last drain, when someone listens.
    changes: Option<Vec<LineChange>>,
}

impl LineSolver {
    pub fn new(length: usize, clue: Clue) -> Result<LineSolver, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        Ok(LineSolver {
            clue: clue.into_iter().filter(|&r| r > 0).collect(),
            hint: vec![CellState::Undecided; length],
            primed: false,
            changes: None,
        })
    }

    /// Start recording decided cells, to be collected with
    /// [LineSolver::take_changes].
    pub fn record_changes(mut self) -> Self {
        self.changes = Some(Vec::with_capacity(self.hint.len()));
        self
    }

    pub fn clue(&self) -> &[usize] {
        &self.clue
    }

    pub fn hint(&self) -> &[CellState] {
        &self.hint
    }

    pub fn len(&self) -> usize {
        self.hint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hint.is_empty()
    }

    /// Take every change recorded since the last call, in the order
    /// they happened.
    pub fn take_changes(&mut self) -> Vec<LineChange> {
        self.changes.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Fold `incoming` into the line and decide every cell that is
    /// the same in all the fillings still possible.
    ///
    /// # Panics
    ///
    /// If `incoming` is not exactly as long as the line.
    pub fn narrow(&mut self, incoming: &[CellState]) -> Result<(), LineError> {
        assert_eq!(
            incoming.len(),
            self.hint.len(),
            "incoming hint doesn't match the line length"
        );

        if let Some((cell, (&hint, &known))) = incoming
            .iter()
            .zip(self.hint.iter())
            .enumerate()
            .find(|(_, (h, k))| h.is_decided() && k.is_decided() && h != k)
        {
            return Err(LineError::Contradiction { cell, hint, known });
        }

        let before = self.changes.is_some().then(|| self.hint.clone());
        let mut changed = false;
        for (known, hint) in self.hint.iter_mut().zip(incoming) {
            if hint.is_decided() && !known.is_decided() {
                *known = *hint;
                changed = true;
            }
        }
        if !changed && self.primed {
            return Ok(());
        }
        self.primed = true;

        let mut fits = candidates(self.hint.len(), &self.clue)
            .filter(|cand| self.hint.iter().zip(cand).all(|(h, &c)| h.accepts(c)));
        let pivot = fits.next().ok_or(LineError::Unsolvable)?;
        let mut ambiguous = vec![false; pivot.len()];
        for cand in fits {
            for ((amb, p), c) in ambiguous.iter_mut().zip(&pivot).zip(&cand) {
                *amb |= p != c;
            }
        }

        for ((known, amb), &p) in self.hint.iter_mut().zip(&ambiguous).zip(&pivot) {
            if !amb && !known.is_decided() {
                *known = CellState::from(p);
            }
        }

        if let (Some(changes), Some(before)) = (self.changes.as_mut(), before) {
            changes.extend(
                before
                    .iter()
                    .zip(&self.hint)
                    .enumerate()
                    .filter(|(_, (old, new))| !old.is_decided() && new.is_decided())
                    .map(|(cell, (_, new))| (cell, *new == CellState::Filled)),
            );
        }

        trace!(
            clue = ?self.clue,
            undecided = self.hint.iter().filter(|c| !c.is_decided()).count(),
            "line narrowed"
        );
        Ok(())
    }
}

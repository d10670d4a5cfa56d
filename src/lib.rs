pub mod error;
pub mod nonogram;
pub mod parser;
pub mod solver;

pub use error::{BuilderError, ConfigError, LineError, ParseError, SolveError};
pub use nonogram::{as_text, CellState, Clue, HintMatrix, Nonogram, NonogramBuilder};
pub use parser::Parser;
pub use solver::{Notification, Solver};

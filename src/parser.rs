use std::io::Read;

use tracing::debug;

use crate::error::ParseError;
use crate::{Clue, Nonogram, NonogramBuilder};

#[derive(Default)]
pub struct Parser {
    builder: NonogramBuilder,
    line: usize,
    mode: ParserMode,
}

#[derive(Default)]
enum ParserMode {
    #[default]
    Main,
    Cols,
    Rows,
}

impl Parser {
    pub fn new() -> Parser {
        Parser::default()
    }

    /// Parse a nonogram using the format of
    /// <https://github.com/mikix/nonogram-db/>
    pub fn parse(mut self, f: &mut impl Read) -> Result<Nonogram, ParseError> {
        let mut source = String::new();
        f.read_to_string(&mut source)?;

        for line in source.lines() {
            self.line += 1;
            match self.mode {
                ParserMode::Main => self.parse_header_line(line)?,
                ParserMode::Cols | ParserMode::Rows => self.parse_clue_line(line)?,
            }
        }

        Ok(self.builder.build()?)
    }

    /// Parse a puzzle held in a string.
    pub fn parse_str(self, source: &str) -> Result<Nonogram, ParseError> {
        self.parse(&mut source.as_bytes())
    }

    fn parse_header_line(&mut self, line: &str) -> Result<(), ParseError> {
        let line = line.trim();
        let (command, args) = line.split_at(line.find(' ').unwrap_or(line.len()));
        match command {
            "columns" => self.mode = ParserMode::Cols,
            "rows" => self.mode = ParserMode::Rows,
            "height" => {
                let height = self.number(args)?;
                self.builder.height(height)?;
            }
            "width" => {
                let width = self.number(args)?;
                self.builder.width(width)?;
            }
            "" => (),
            _ => debug!(line = self.line, command, "skipping header"),
        }
        Ok(())
    }

    fn parse_clue_line(&mut self, line: &str) -> Result<(), ParseError> {
        let line = line.trim();
        if line.is_empty() {
            self.mode = ParserMode::Main;
            return Ok(());
        }
        let parsed = line
            .split(',')
            .map(str::trim)
            .map(str::parse::<usize>)
            .collect::<Result<Clue, _>>();

        let Ok(clue) = parsed else {
            // There may not be a blank line after the last column or
            // row.
            self.mode = ParserMode::Main;
            return self.parse_header_line(line);
        };
        match self.mode {
            ParserMode::Rows => self.builder.push_row_clue(clue),
            ParserMode::Cols => self.builder.push_col_clue(clue),
            ParserMode::Main => return self.parse_header_line(line),
        };
        Ok(())
    }

    fn number(&self, args: &str) -> Result<usize, ParseError> {
        args.trim()
            .parse::<usize>()
            .map_err(|_| ParseError::Int { line: self.line })
    }
}

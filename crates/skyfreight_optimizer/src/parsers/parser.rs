use std::{fmt::Display, path::Path};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn invalid_line(line: usize, reason: impl Display) -> Self {
        ParseError::InvalidLine {
            line,
            reason: reason.to_string(),
        }
    }
}

/// A line-oriented input file turned into a list of records.
pub trait DatasetParser {
    type Record;

    /// Parses one non-blank line. `line` is 1-based.
    fn parse_line(&self, line: usize, content: &str) -> Result<Self::Record, ParseError>;

    /// Number of leading lines that are not records.
    fn header_lines(&self) -> usize {
        0
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Self::Record>, ParseError> {
        content
            .lines()
            .enumerate()
            .skip(self.header_lines())
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(index, text)| self.parse_line(index + 1, text.trim()))
            .collect()
    }

    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<Vec<Self::Record>, ParseError> {
        let content = std::fs::read_to_string(file)?;
        self.parse_str(&content)
    }
}

/// Parses `value` as a number, naming `field` in the error.
pub(crate) fn parse_field<T>(line: usize, field: &str, value: &str) -> Result<T, ParseError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|error| ParseError::invalid_line(line, format!("invalid {field} `{value}`: {error}")))
}

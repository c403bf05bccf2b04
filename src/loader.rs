//! Builds a [`ProfileTree`] from the plain-text database format.
//!
//! The format is line based up front and token based afterwards:
//!
//! 1. the first unknown sequence on its own line,
//! 2. the second unknown sequence on its own line,
//! 3. the number of people on its own line,
//! 4. for each person, whitespace separated: first name, last name, the
//!    number of STRs, then that many `unit count` pairs.
//!
//! People are stored under `"Last, First"`.
//!
//! # Examples
//!
//! ```
//! use forensic::loader;
//!
//! let input = "AGGT\nCCTT\n2\nJane Doe 1 GGT 1\nBob Ames 2 GGT 2 TT 2\n";
//! let tree = loader::load_str(input)?;
//!
//! assert_eq!(tree.sequence_a(), "AGGT");
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.find("Ames, Bob").map(|p| p.strs().len()), Some(2));
//! # Ok::<(), loader::LoadError>(())
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::profile::{Profile, StrRecord};
use crate::tree::ProfileTree;

/// Everything that can go wrong while loading a database.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input couldn't be read.
    #[error("failed to read database: {0}")]
    Io(#[from] io::Error),

    /// The input ended before one of the leading lines.
    #[error("missing line: expected {expected}")]
    MissingLine {
        /// What the line should have held.
        expected: &'static str,
    },

    /// The input ended in the middle of the people records.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEnd {
        /// The token that was expected next.
        expected: &'static str,
    },

    /// A count couldn't be parsed.
    #[error("invalid {field}: {value:?} is not a number")]
    InvalidNumber {
        /// Which count was being read.
        field: &'static str,
        /// The offending token.
        value: String,
    },
}

/// Loads a database from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<ProfileTree, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading database");

    load_reader(File::open(path)?)
}

/// Loads a database from anything readable. The whole input is read up front.
pub fn load_reader(mut reader: impl Read) -> Result<ProfileTree, LoadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    load_str(&input)
}

/// Loads a database from a string.
pub fn load_str(input: &str) -> Result<ProfileTree, LoadError> {
    let mut cursor = Cursor::new(input);

    let sequence_a = cursor.line("first unknown sequence")?;
    let sequence_b = cursor.line("second unknown sequence")?;
    let people: usize = parse(cursor.line("number of people")?.trim(), "number of people")?;

    let mut tree = ProfileTree::with_sequences(sequence_a, sequence_b);
    for _ in 0..people {
        let first = cursor.token("first name")?;
        let last = cursor.token("last name")?;
        let strs = read_strs(&mut cursor)?;
        tree.insert(format!("{}, {}", last, first), Profile::new(strs));
    }

    info!(people, "loaded database");
    Ok(tree)
}

fn read_strs(cursor: &mut Cursor<'_>) -> Result<Vec<StrRecord>, LoadError> {
    let count: usize = parse(cursor.token("STR count")?, "STR count")?;

    (0..count)
        .map(|_| -> Result<StrRecord, LoadError> {
            let unit = cursor.token("STR unit")?;
            let occurrences = parse(cursor.token("STR occurrences")?, "STR occurrences")?;
            Ok(StrRecord::new(unit, occurrences))
        })
        .collect()
}

fn parse<T: FromStr>(value: &str, field: &'static str) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Reads whole lines or whitespace separated tokens from the remaining input.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// The next line without its line ending.
    fn line(&mut self, expected: &'static str) -> Result<&'a str, LoadError> {
        if self.rest.is_empty() {
            return Err(LoadError::MissingLine { expected });
        }

        let (line, rest) = match self.rest.find('\n') {
            Some(end) => (&self.rest[..end], &self.rest[end + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;

        Ok(line.strip_suffix('\r').unwrap_or(line))
    }

    fn token(&mut self, expected: &'static str) -> Result<&'a str, LoadError> {
        let trimmed = self.rest.trim_start();
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        if end == 0 {
            return Err(LoadError::UnexpectedEnd { expected });
        }

        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;

        Ok(token)
    }
}

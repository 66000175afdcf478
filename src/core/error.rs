//! Error type for alignment runs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::record::FormatError;

/// Every failure is fatal for the run; nothing is retried.
#[derive(Error, Debug)]
pub enum AlignError {
    /// A qualifying coordinate line has a numeric column that does not parse.
    #[error("line {line_number}: {source}\n  {line}")]
    Format {
        line_number: usize,
        line: String,
        #[source]
        source: FormatError,
    },

    #[error("could not open input file `{}`", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create output file `{}`", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read or write failure while streaming.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AlignError {
    /// Wraps a [`FormatError`] with the position and content of the offending line.
    pub fn format(line_number: usize, line: &str, source: FormatError) -> Self {
        AlignError::Format {
            line_number,
            line: line.trim_end_matches(['\r', '\n']).to_string(),
            source,
        }
    }

    /// Returns `true` for errors caused by the input content rather than by I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(self, AlignError::Format { .. })
    }
}

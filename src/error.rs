use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a plotting run.
#[derive(Error, Debug)]
pub enum PlotError {
    /// No input path was given, or it does not exist.
    #[error("Missing input file: {}", DisplayInput(.0))]
    InputMissing(Option<PathBuf>),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// One or more required columns are absent from the header row.
    #[error("{} is missing required column(s): {}", .path.display(), .missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("failed to write plot to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PlotError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlotError::InputMissing(_) => 2,
            _ => 1,
        }
    }
}

/// A single `timestamp` cell that no accepted format could read.
///
/// Never fatal: the axis resolver turns it into a missing position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised timestamp '{0}'")]
pub struct TimestampParseError(pub String);

struct DisplayInput<'a>(&'a Option<PathBuf>);

impl fmt::Display for DisplayInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "<none>"),
        }
    }
}

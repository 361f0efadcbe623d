//! Errors raised while sampling.
//!
//! Only CPU sampling and the boot-time helper surface these; every other
//! sampler folds its failure into a `valid` flag.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type SampleResult<T> = Result<T, SampleError>;

#[derive(Debug, Error)]
pub enum SampleError {
    /// The source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The first line was not the aggregate `cpu` row.
    #[error("expected aggregate `cpu` row, found `{0}`")]
    UnexpectedLabel(String),
    #[error("aggregate cpu row has {0} counters, at least 5 are required")]
    TooFewCounters(usize),
    /// An OS call reported failure.
    #[error("{call} failed: {source}")]
    Os {
        call: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("helper `{program}` failed: {reason}")]
    Helper { program: String, reason: String },
    #[error("helper `{program}` did not finish within {timeout:?}")]
    HelperTimeout { program: String, timeout: Duration },
}

impl SampleError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub fn helper(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Helper {
            program: program.into(),
            reason: reason.into(),
        }
    }
}

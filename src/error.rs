use std::path::PathBuf;

use thiserror::Error;

/// Record shape errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("{kind} record at line {line} has no line {index}: {record:?}")]
    MissingLine {
        kind: &'static str,
        index: usize,
        line: usize,
        record: String,
    },
    #[error("expected `<component> <pin>` at line {line}, found {found:?}: {record:?}")]
    BadNodeRef {
        line: usize,
        found: String,
        record: String,
    },
}

/// Errors from loading a design
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Errors raised while discovering and parsing definition files.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort a definition parse.
///
/// Malformed lines are not represented here: they are logged and skipped.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The requested mock directory does not exist.
    #[error("directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A directory or file could not be opened.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a file failed part way through (I/O, encoding, or line length).
    #[error("error scanning file {} at line {line}: {source}", .path.display())]
    FileScan {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// None of the attempted directories produced a usable definition.
    #[error("{}", describe_empty(.candidates, .last_error.as_deref()))]
    NoDefinitionsFound {
        candidates: Vec<PathBuf>,
        #[source]
        last_error: Option<Box<DefinitionError>>,
    },
}

impl DefinitionError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn describe_empty(candidates: &[PathBuf], last_error: Option<&DefinitionError>) -> String {
    let dirs = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    match last_error {
        Some(err) => format!("failed to load mock definitions from any of [{dirs}]: {err}"),
        None => format!("no mock definitions found in any of [{dirs}]"),
    }
}

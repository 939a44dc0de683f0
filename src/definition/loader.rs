//! Definition loading with directory fallback.

use std::path::{Path, PathBuf};

use crate::definition::error::DefinitionError;
use crate::definition::parser::{parse_directory, RouteDefinition};

/// Definitions together with the directory they were read from.
#[derive(Debug)]
pub struct LoadedDefinitions {
    pub directory: PathBuf,
    pub definitions: Vec<RouteDefinition>,
}

/// Load definitions from one explicitly chosen directory.
///
/// A directory without any definition is an error, there is nothing to serve.
pub fn load_from(dir: &Path, extension: &str) -> Result<LoadedDefinitions, DefinitionError> {
    tracing::info!(directory = %dir.display(), "Using specified mock directory");
    let definitions = parse_directory(dir, extension)?;
    if definitions.is_empty() {
        return Err(DefinitionError::NoDefinitionsFound {
            candidates: vec![dir.to_path_buf()],
            last_error: None,
        });
    }
    Ok(LoadedDefinitions {
        directory: dir.to_path_buf(),
        definitions,
    })
}

/// Try each candidate directory in order and keep the first one that
/// yields at least one definition.
///
/// Missing, unreadable and empty directories are skipped. When every
/// candidate is rejected the last parse failure, if any, is reported.
pub fn load_first_available<P: AsRef<Path>>(
    candidates: &[P],
    extension: &str,
) -> Result<LoadedDefinitions, DefinitionError> {
    let mut last_error = None;

    for dir in candidates {
        let dir: &Path = dir.as_ref();
        tracing::info!(directory = %dir.display(), "Trying to load mock files");
        match parse_directory(dir, extension) {
            Ok(definitions) if !definitions.is_empty() => {
                tracing::info!(
                    directory = %dir.display(),
                    count = definitions.len(),
                    "Loaded mock files"
                );
                return Ok(LoadedDefinitions {
                    directory: dir.to_path_buf(),
                    definitions,
                });
            }
            Ok(_) => {
                tracing::info!(directory = %dir.display(), "No mock definitions found");
            }
            Err(e) => {
                tracing::warn!(directory = %dir.display(), error = %e, "Failed to load mock files");
                last_error = Some(Box::new(e));
            }
        }
    }

    Err(DefinitionError::NoDefinitionsFound {
        candidates: candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        last_error,
    })
}

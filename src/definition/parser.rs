//! Definition file parsing.
//!
//! # File Format
//! ```text
//! # comment
//! // comment
//! GET users '{name: Alice, age: 30}'
//! POST users/login {token: abc}
//! ```
//!
//! Each definition line is `<METHOD> <PATH> <RESPONSE>`. The first two
//! whitespace runs separate the fields; the response keeps any inner
//! spaces. One layer of matching `'`, `"` or `` ` `` around the response
//! is removed.
//!
//! # Responsibilities
//! - Walk a directory tree and pick files with the definition extension
//! - Scan lines with a hard per-line size bound
//! - Skip blank lines and comments, warn about malformed lines

use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::definition::error::DefinitionError;

/// Maximum accepted length of a single definition line, in bytes.
pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// File extension recognised as a definition file.
pub const DEFAULT_EXTENSION: &str = "api";

const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Where a definition was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One declared mock endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    /// HTTP method, taken verbatim from the file.
    pub method: String,
    /// Path relative to the server root prefix.
    pub path: String,
    /// Response text with one layer of outer quotes removed.
    pub response_template: String,
    pub source: SourceLocation,
}

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Blank line or comment.
    Skip,
    /// A well-formed definition.
    Definition {
        method: &'a str,
        path: &'a str,
        response: &'a str,
    },
    /// Fewer than three fields.
    Invalid,
}

/// Classify one line of a definition file.
///
/// The comment check runs on the raw line, so an indented `#` is not a comment.
pub fn parse_line(line: &str) -> LineOutcome<'_> {
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return LineOutcome::Skip;
    }

    match split_fields(line) {
        Some((method, path, response)) => LineOutcome::Definition {
            method,
            path,
            response: unquote(response),
        },
        None => LineOutcome::Invalid,
    }
}

/// Strip one layer of matching `'`, `"` or `` ` `` from both ends.
///
/// Text without a matching outer pair is returned unchanged.
pub fn unquote(text: &str) -> &str {
    QUOTES
        .iter()
        .find_map(|&q| text.strip_prefix(q).and_then(|inner| inner.strip_suffix(q)))
        .unwrap_or(text)
}

fn split_fields(line: &str) -> Option<(&str, &str, &str)> {
    let (method, rest) = line.trim_start().split_once(char::is_whitespace)?;
    let (path, response) = rest.trim_start().split_once(char::is_whitespace)?;
    let response = response.trim();
    if response.is_empty() {
        return None;
    }
    Some((method, path, response))
}

/// Parse every line read from `reader`, attributing results to `file`.
pub fn parse_reader<R: BufRead>(
    reader: R,
    file: &Path,
) -> Result<Vec<RouteDefinition>, DefinitionError> {
    scan_lines(reader, file, MAX_LINE_BYTES)
}

fn scan_lines<R: BufRead>(
    mut reader: R,
    file: &Path,
    max_line_bytes: usize,
) -> Result<Vec<RouteDefinition>, DefinitionError> {
    let mut definitions = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        line_number += 1;
        let scan_error = |source: io::Error| DefinitionError::FileScan {
            path: file.to_path_buf(),
            line: line_number,
            source,
        };

        buf.clear();
        let read = read_bounded_line(&mut reader, &mut buf, max_line_bytes).map_err(scan_error)?;
        if read == 0 {
            break;
        }

        let line = std::str::from_utf8(&buf)
            .map_err(|e| scan_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        match parse_line(line) {
            LineOutcome::Skip => {}
            LineOutcome::Definition {
                method,
                path,
                response,
            } => definitions.push(RouteDefinition {
                method: method.to_string(),
                path: path.to_string(),
                response_template: response.to_string(),
                source: SourceLocation {
                    file: file.to_path_buf(),
                    line: line_number,
                },
            }),
            LineOutcome::Invalid => {
                tracing::warn!(
                    file = %file.display(),
                    line = line_number,
                    content = %line,
                    "Invalid line format, expected <METHOD> <PATH> <RESPONSE>"
                );
            }
        }
    }

    Ok(definitions)
}

/// Read up to and including the next `\n`, failing if the line content
/// is longer than `max_line_bytes`.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_line_bytes: usize,
) -> io::Result<usize> {
    let limit = max_line_bytes as u64 + 1;
    let read = reader.by_ref().take(limit).read_until(b'\n', buf)?;

    let content = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
    if content.len() > max_line_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line exceeds {max_line_bytes} bytes"),
        ));
    }
    Ok(read)
}

/// Parse a single definition file.
pub fn parse_file(path: &Path) -> Result<Vec<RouteDefinition>, DefinitionError> {
    tracing::info!(file = %path.display(), "Parsing file");
    let file = File::open(path).map_err(|e| DefinitionError::io(path, e))?;
    parse_reader(BufReader::new(file), path)
}

/// Recursively parse every file under `root` whose extension is `extension`.
///
/// `root` may also name a single definition file. Symlinks below the root
/// are not followed.
pub fn parse_directory(
    root: &Path,
    extension: &str,
) -> Result<Vec<RouteDefinition>, DefinitionError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DefinitionError::DirectoryNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(DefinitionError::io(root, e)),
    };

    let mut definitions = Vec::new();
    if metadata.is_dir() {
        walk_dir(root, extension, &mut definitions)?;
    } else if has_extension(root, extension) {
        definitions.extend(parse_file(root)?);
    }
    Ok(definitions)
}

fn walk_dir(
    dir: &Path,
    extension: &str,
    out: &mut Vec<RouteDefinition>,
) -> Result<(), DefinitionError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(|e| DefinitionError::io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| DefinitionError::io(&path, e))?;

        if file_type.is_dir() {
            walk_dir(&path, extension, out)?;
        } else if file_type.is_file() && has_extension(&path, extension) {
            out.extend(parse_file(&path)?);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

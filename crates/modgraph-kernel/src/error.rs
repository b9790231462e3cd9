//! Errors raised while analyzing and checking modules.
//!
//! [`AnalyzeError`] is fatal for a batch. Unresolved imports are collected
//! into [`CheckError::Unresolved`] instead of failing one at a time.

use crate::parser::ParseError;
use modgraph_types::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file could not be turned into a descriptor.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Failed to validate '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to validate '{}': {}", .path.display(), summarize(.errors))]
    Parse {
        path: PathBuf,
        errors: Vec<ParseError>,
    },
}

impl AnalyzeError {
    /// The file that failed.
    pub fn path(&self) -> &Path {
        match self {
            AnalyzeError::Read { path, .. } | AnalyzeError::Parse { path, .. } => path,
        }
    }
}

/// Failure of a batch check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    /// Every unresolved import, in registry order.
    #[error("{} unresolved import(s)", .0.len())]
    Unresolved(Vec<ValidationError>),

    /// An analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(String),
}

impl CheckError {
    /// The collected validation errors, if that is what this is.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            CheckError::Unresolved(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &[ParseError]) -> String {
    match errors {
        [] => "parse error".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(message: &str) -> ParseError {
        ParseError {
            span: (0..1).into(),
            message: message.to_string(),
        }
    }

    #[test]
    fn read_error_names_the_file() {
        let err = AnalyzeError::Read {
            path: PathBuf::from("src/missing.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "Failed to validate 'src/missing.js': no such file");
        assert_eq!(err.path(), Path::new("src/missing.js"));
    }

    #[test]
    fn parse_error_summarizes() {
        let err = AnalyzeError::Parse {
            path: PathBuf::from("bad.js"),
            errors: vec![parse_error("found end of input"), parse_error("other")],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to validate 'bad.js': found end of input"));
        assert!(msg.ends_with("(and 1 more)"));
    }

    #[test]
    fn unresolved_counts() {
        let err = CheckError::Unresolved(vec![ValidationError::UnresolvedModule {
            module: "baz".into(),
            file_path: PathBuf::from("baz.js"),
            from: "notfound".into(),
        }]);
        assert_eq!(err.to_string(), "1 unresolved import(s)");
        assert_eq!(err.validation_errors().map(<[_]>::len), Some(1));
    }
}

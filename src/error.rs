use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while expanding a root file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The root or a transitively included file could not be opened or read.
    #[error("cannot read \"{id}\" at {}", path.display())]
    Missing {
        id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is binary or not valid UTF-8.
    #[error("\"{id}\" at {} is not a UTF-8 text file", path.display())]
    NotText { id: String, path: PathBuf },

    /// Only raised in strict mode.
    #[error("malformed include directive in \"{id}\" line {line}: {text}")]
    MalformedDirective {
        id: String,
        line: usize,
        text: String,
    },
}

impl ResolveError {
    /// Identifier of the file that triggered the error.
    pub fn id(&self) -> &str {
        match self {
            ResolveError::Missing { id, .. }
            | ResolveError::NotText { id, .. }
            | ResolveError::MalformedDirective { id, .. } => id,
        }
    }
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

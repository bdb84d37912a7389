use std::fmt;

use thiserror::Error;

/// What a not-found error was looking for. Only affects the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    File,
    Directory,
    Path,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "File",
            Self::Directory => "Directory",
            Self::Path => "Path",
        })
    }
}

/// Coarse classification of a [`VfsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    NotFound,
    TypeMismatch,
    Io,
}

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("{0}")]
    Usage(String),
    #[error("{target} not found: {path}")]
    NotFound { target: Target, path: String },
    #[error("Not a file: {0}")]
    NotAFile(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl VfsError {
    pub fn not_found(target: Target, path: impl fmt::Display) -> Self {
        Self::NotFound {
            target,
            path: path.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotAFile(_) | Self::NotADirectory(_) => ErrorKind::TypeMismatch,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Machine-readable error code, stable across message wording changes.
    pub fn code(&self) -> &str {
        match self {
            Self::Usage(_) => "SHELL_USAGE",
            Self::NotFound { .. } => "SHELL_NOT_FOUND",
            Self::NotAFile(_) => "SHELL_NOT_FILE",
            Self::NotADirectory(_) => "SHELL_NOT_DIRECTORY",
            Self::Io(_) => "SHELL_IO_ERROR",
        }
    }
}

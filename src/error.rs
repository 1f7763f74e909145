//! Startup error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// Settings file exists but could not be parsed.
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Settings parsed but hold an unusable value.
    InvalidSettings(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::SettingsParse { path, source } => {
                write!(f, "could not parse {}: {}", path.display(), source)
            }
            Error::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::SettingsParse { source, .. } => Some(source),
            Error::InvalidSettings(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::SettingsParse {
            path: PathBuf::new(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

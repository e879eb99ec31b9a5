use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading a parameter table.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("file {} does not exist or is unreadable", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: missing one or more fields in parameter definition", path.display())]
    MissingFields { path: PathBuf, line: usize },

    #[error("{}:{line}: invalid datatype `{dtype}` for parameter `{name}`", path.display())]
    UnknownType {
        path: PathBuf,
        line: usize,
        name: String,
        dtype: String,
    },

    #[error("{}:{line}: invalid array size `{size}` for parameter `{name}`", path.display())]
    InvalidSize {
        path: PathBuf,
        line: usize,
        name: String,
        size: String,
    },
}

impl ParamError {
    /// True when the table was read but its contents are malformed. These
    /// are the failures that leave a sentinel in the output file.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ParamError::Io { .. })
    }
}

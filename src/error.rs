use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load {name}: {reason}")]
    DataSourceLoad { name: String, reason: String },
    #[error("Invalid range {low:?}..={high:?}: the lower bound is greater than the upper bound")]
    InvalidRange { low: char, high: char },
    #[error("Table {name} is used before it is defined")]
    UndefinedTable { name: String },
    #[error("Failed to access {path}: {error}")]
    Io {
        #[source]
        error: io::Error,
        path: PathBuf,
    },
    #[error("Failed to write {path}: {error}")]
    OutputWrite {
        #[source]
        error: io::Error,
        path: PathBuf,
    },
}

impl Error {
    pub fn load(name: impl Into<String>, reason: impl ToString) -> Error {
        Error::DataSourceLoad {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

pub trait ResultExt {
    type Result;

    fn with_path<P: AsRef<Path>>(self, path: P) -> Self::Result;
    fn writing<P: AsRef<Path>>(self, path: P) -> Self::Result;
    fn loading<P: AsRef<Path>>(self, path: P) -> Self::Result;
}

impl<T> ResultExt for Result<T, io::Error> {
    type Result = Result<T, Error>;

    fn with_path<P: AsRef<Path>>(self, path: P) -> Self::Result {
        self.map_err(|error| Error::Io {
            error,
            path: path.as_ref().to_path_buf(),
        })
    }

    fn writing<P: AsRef<Path>>(self, path: P) -> Self::Result {
        self.map_err(|error| Error::OutputWrite {
            error,
            path: path.as_ref().to_path_buf(),
        })
    }

    fn loading<P: AsRef<Path>>(self, path: P) -> Self::Result {
        self.map_err(|error| Error::load(path.as_ref().display().to_string(), error))
    }
}

//! Error handling for the sort engine

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    /// Scratch or key buffers could not be reserved. Raised before the
    /// caller's buffer is touched, so its contents are still the input.
    #[error("Memory allocation failed: could not reserve {requested} elements")]
    AllocationFailure { requested: usize },

    #[error("No sort strategy for element type: {type_name}")]
    UnsupportedType { type_name: String },

    #[error("Thread pool error: {message}")]
    ThreadPool { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::FileNotFound { .. } | SortError::Io(_) => crate::SORT_FAILURE,
            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create an allocation failure error
    pub fn allocation_failure(requested: usize) -> Self {
        SortError::AllocationFailure { requested }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(type_name: &str) -> Self {
        SortError::UnsupportedType {
            type_name: type_name.to_string(),
        }
    }

    pub fn thread_pool(message: &str) -> Self {
        SortError::ThreadPool {
            message: message.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: &str) -> Self {
        SortError::InvalidConfig {
            message: message.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::Parse {
            message: message.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Reserve room for `additional` more elements or report an allocation failure.
pub(crate) fn try_reserve<T>(buf: &mut Vec<T>, additional: usize) -> SortResult<()> {
    buf.try_reserve_exact(additional)
        .map_err(|_| SortError::allocation_failure(additional))
}

/// Context trait for adding file context to I/O errors
pub trait SortContext<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SortError::file_not_found("x").exit_code(), crate::SORT_FAILURE);
        assert_eq!(SortError::allocation_failure(8).exit_code(), crate::EXIT_FAILURE);
        assert_eq!(SortError::unsupported_type("bool").exit_code(), crate::EXIT_FAILURE);
    }

    #[test]
    fn test_file_context_maps_not_found() {
        let err: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        match err.with_file_context("input.txt") {
            Err(SortError::FileNotFound { file }) => assert_eq!(file, "input.txt"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_try_reserve_reports_failure() {
        let mut buf: Vec<u64> = Vec::new();
        assert!(try_reserve(&mut buf, 16).is_ok());
        assert!(buf.capacity() >= 16);

        let mut huge: Vec<u64> = Vec::new();
        match try_reserve(&mut huge, usize::MAX) {
            Err(SortError::AllocationFailure { requested }) => assert_eq!(requested, usize::MAX),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

use std::io;

use thiserror::Error;

/// Errors that can stop a report run, or the reading of a mapping file
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid type descriptor: {0}")]
    InvalidTypeDescriptor(String),

    #[error("invalid method descriptor: {0}")]
    InvalidMethodDescriptor(String),

    #[error("invalid java type name: {0}")]
    InvalidJavaTypeName(String),

    #[error("invalid mapping at line {line_number}: {line}")]
    InvalidMappingLine { line_number: usize, line: String },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type shared by every crate
//! in this workspace.

use std::fmt;
use std::io;
use std::result;

/// `CodecError` enumerates every way an encode or decode operation can fail.
#[derive(Debug)]
pub enum CodecError {
    /// Reading or writing a file failed. The path is recorded for the
    /// message printed at the CLI boundary.
    Io { path: String, source: io::Error },
    /// The input image could not be decoded, or did not carry at least
    /// three color channels once decoded.
    ImageDecode(String),
    /// A symbol lookup during arithmetic decoding produced a cumulative
    /// value outside the model's current range, meaning the compressed
    /// stream is corrupt.
    ArithmeticCorruption,
    /// A stage produced fewer or more bytes than the container header or
    /// caller declared it should.
    SizeMismatch { expected: usize, actual: usize },
    /// Width or height was zero.
    InvalidDimensions { width: u32, height: u32 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io { path, source } => write!(f, "io error on {}: {}", path, source),
            CodecError::ImageDecode(msg) => write!(f, "image decode error: {}", msg),
            CodecError::ArithmeticCorruption => {
                write!(f, "arithmetic stream corrupt: symbol lookup out of range")
            }
            CodecError::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {} bytes, got {}", expected, actual)
            }
            CodecError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, CodecError>;

/// Convenience function to create an I/O error tagged with the path that
/// caused it.
pub fn io_error<T>(path: impl Into<String>, source: io::Error) -> Result<T> {
    Err(CodecError::Io { path: path.into(), source })
}

/// Convenience function to create an image decode error.
pub fn image_decode_error<T>(msg: impl Into<String>) -> Result<T> {
    Err(CodecError::ImageDecode(msg.into()))
}

/// Convenience function to create an arithmetic corruption error.
pub fn arithmetic_corruption_error<T>() -> Result<T> {
    Err(CodecError::ArithmeticCorruption)
}

/// Convenience function to create a size mismatch error.
pub fn size_mismatch_error<T>(expected: usize, actual: usize) -> Result<T> {
    Err(CodecError::SizeMismatch { expected, actual })
}

/// Convenience function to create an invalid dimensions error.
pub fn invalid_dimensions_error<T>(width: u32, height: u32) -> Result<T> {
    Err(CodecError::InvalidDimensions { width, height })
}

// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by the engine and its helpers.
///
/// Note that a conversion itself never fails. Lossy narrowing, signedness changes, and float range
/// overflow are all defined behaviour. Errors only arise at the edges: when a caller describes a
/// buffer or a sample format that does not exist.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A conversion was requested to or from a sample format the engine cannot describe.
    Unsupported(&'static str),
    /// An integer code did not identify a sample format.
    InvalidFormatCode(i64),
    /// A name did not identify a sample format.
    InvalidFormatName,
    /// The buffer length does not agree with its sample format, channel count, and frame count.
    MalformedBuffer(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Unsupported(what) => {
                write!(f, "unsupported conversion: {}", what)
            }
            Error::InvalidFormatCode(code) => {
                write!(f, "invalid sample format code: {}", code)
            }
            Error::InvalidFormatName => {
                write!(f, "invalid sample format name")
            }
            Error::MalformedBuffer(msg) => {
                write!(f, "malformed buffer: {}", msg)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an unsupported conversion error.
pub fn unsupported_error<T>(what: &'static str) -> Result<T> {
    Err(Error::Unsupported(what))
}

/// Convenience function to create an invalid format code error.
pub fn invalid_code_error<T>(code: i64) -> Result<T> {
    Err(Error::InvalidFormatCode(code))
}

/// Convenience function to create a malformed buffer error.
pub fn malformed_buffer_error<T>(msg: &'static str) -> Result<T> {
    Err(Error::MalformedBuffer(msg))
}

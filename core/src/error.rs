// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;
use thiserror::Error;

/// The error type for smallpics operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A string does not match any case of a closed enumeration
    InvalidEnumValue,

    /// A stored composite value (fit, crop, border) does not have the expected shape
    MalformedCompositeValue,

    /// The URL could not be parsed for canonicalization
    MalformedUrl,

    /// Generic input has the wrong type or misses required arguments
    InvalidInput,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid enum value error.
    ///
    /// The message names the offending field, the rejected value and the allowed set.
    pub fn invalid_enum_value(field: &str, value: &str, allowed: &[&str]) -> Self {
        Self::new(
            ErrorKind::InvalidEnumValue,
            format!(
                "\"{value}\" is not a valid value for {field}, expected one of: {}",
                allowed.join(", ")
            ),
        )
    }

    /// Create a malformed composite value error
    pub fn malformed_composite_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedCompositeValue, message)
    }

    /// Create a malformed url error
    pub fn malformed_url(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedUrl, message)
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidEnumValue => write!(f, "invalid enum value"),
            ErrorKind::MalformedCompositeValue => write!(f, "malformed composite value"),
            ErrorKind::MalformedUrl => write!(f, "malformed url"),
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::malformed_url(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Self::config_invalid(format!("invalid hex value: {err}"))
            .with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_enum_value_message() {
        let err = Error::invalid_enum_value("format", "bogus", &["jpg", "png"]);

        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert_eq!(
            err.to_string(),
            "invalid enum value: \"bogus\" is not a valid value for format, expected one of: jpg, png"
        );
    }

    #[test]
    fn test_invalid_uri_maps_to_malformed_url() {
        let err: Error = "http://exa mple.com"
            .parse::<http::Uri>()
            .unwrap_err()
            .into();

        assert_eq!(err.kind(), ErrorKind::MalformedUrl);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_hex_error_maps_to_config_invalid() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// A toast was requested without a title and without a pending operation
    /// that would supply one.
    #[error("toast title must not be empty")]
    MissingTitle,

    /// The manager needs a Tokio runtime to drive its timers.
    #[error("no Tokio runtime available: {0}")]
    NoRuntime(String),

    #[error("unknown toast position: {0}")]
    InvalidPosition(String),

    #[error("unknown toast variant: {0}")]
    InvalidVariant(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn invalid_position_names_the_input() {
        let err = Error::InvalidPosition("middle".into());
        assert_eq!(err.to_string(), "unknown toast position: middle");
    }

    #[test]
    fn toml_parse_error_maps_to_config() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("not = valid = toml");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}

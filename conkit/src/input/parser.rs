//! # Conversion Capabilities
//!
//! A [`Parser`] turns one line of console text into a typed value, or fails
//! with a [`FormatError`] when the text has the wrong shape. Parsers are
//! stateless and meant to be reused across many requests.
//!
//! Three parsers ship with the crate:
//! - [`TextParser`]: the identity conversion, used by [`InputRequest::request`](super::InputRequest::request)
//! - [`CharParser`]: accepts exactly one character
//! - [`FromStrParser`]: adapts any [`FromStr`] type (`i32`, `f64`, `bool`, ...)
//!
//! Any closure `Fn(&str) -> Result<T, FormatError>` is a parser too.
//!
//! ```rust
//! use conkit::input::{CharParser, FormatError, FromStrParser, Parser};
//!
//! assert_eq!(CharParser.parse("y").unwrap(), 'y');
//! assert!(CharParser.parse("yes").is_err());
//!
//! let port = FromStrParser::<u16>::new();
//! assert_eq!(port.parse("8080").unwrap(), 8080);
//!
//! let even = |s: &str| -> Result<u32, FormatError> {
//!     s.parse::<u32>()
//!         .map_err(FormatError::from)
//!         .and_then(|n| if n % 2 == 0 { Ok(n) } else { Err(FormatError::new("odd")) })
//! };
//! assert!(even.parse("3").is_err());
//! ```
use std::{fmt::Display, marker::PhantomData, str::FromStr};

use thiserror::Error;

/// Raised when a piece of text cannot be interpreted as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The value has an invalid format: {reason}")]
pub struct FormatError {
    reason: String,
}

impl FormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Detail about what was wrong with the text.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<std::num::ParseIntError> for FormatError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for FormatError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::new(e.to_string())
    }
}

/// A function capable of converting console text into a `T`.
pub trait Parser<T> {
    /// Converts `input`, failing with a [`FormatError`] if the text is not a valid `T`.
    fn parse(&self, input: &str) -> Result<T, FormatError>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&str) -> Result<T, FormatError>,
{
    fn parse(&self, input: &str) -> Result<T, FormatError> {
        self(input)
    }
}

/// Returns the text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl Parser<String> for TextParser {
    fn parse(&self, input: &str) -> Result<String, FormatError> {
        Ok(input.to_string())
    }
}

/// Accepts text made of exactly one character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharParser;

impl Parser<char> for CharParser {
    fn parse(&self, input: &str) -> Result<char, FormatError> {
        let mut chars = input.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(FormatError::new("passed string must be of length 1")),
        }
    }
}

/// Parser for any type implementing [`FromStr`].
///
/// The parse error of `T` becomes the [`FormatError`] reason.
pub struct FromStrParser<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> FromStrParser<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for FromStrParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromStrParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for FromStrParser<T> {}

impl<T> Parser<T> for FromStrParser<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn parse(&self, input: &str) -> Result<T, FormatError> {
        input.parse::<T>().map_err(|e| FormatError::new(e.to_string()))
    }
}

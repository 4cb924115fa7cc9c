//! # Call-site Prompts
//!
//! [`InputPrompt`] runs the same retry loop as [`InputRequest`](super::InputRequest)
//! but keeps its own settings, parser and condition. Different prompts can use
//! different skip and validation policies without touching shared state.
//!
//! ```rust,no_run
//! use conkit::input::{FromStrParser, InputPrompt, RequestOptions};
//!
//! let port = InputPrompt::new()
//!     .with_options(RequestOptions::new().request_message("Port: "))
//!     .with_parser(FromStrParser::<u16>::new())
//!     .with_condition(|port: &u16| *port >= 1024)
//!     .ask()
//!     .unwrap();
//! ```
use std::io::{self, BufRead, Write};

use super::{InputErrors, Parser, RequestOptions, read_until_valid};

/// A request bound to one call site.
pub struct InputPrompt<'a, T> {
    options: RequestOptions,
    parser: Option<Box<dyn Parser<T> + 'a>>,
    condition: Option<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T> InputPrompt<'a, T> {
    pub fn new() -> Self {
        Self {
            options: RequestOptions::default(),
            parser: None,
            condition: None,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_parser(mut self, parser: impl Parser<T> + 'a) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    pub fn with_condition(mut self, condition: impl Fn(&T) -> bool + 'a) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }

    /// Asks on standard input and output.
    pub fn ask(&self) -> Result<Option<T>, InputErrors> {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut writer = io::stdout().lock();

        self.ask_from(&mut reader, &mut writer)
    }

    /// Asks over the given streams.
    ///
    /// Fails with [`InputErrors::MissingParser`] before writing anything if no
    /// parser was set.
    pub fn ask_from<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<Option<T>, InputErrors>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let parser = self.parser.as_deref().ok_or(InputErrors::MissingParser)?;

        read_until_valid(
            reader,
            writer,
            &self.options,
            parser,
            self.condition.as_deref(),
        )
    }
}

impl<T> Default for InputPrompt<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CharParser, FromStrParser, TextParser};
    use std::io::Cursor;

    #[test]
    fn test_prompt_without_parser() {
        let prompt: InputPrompt<'_, i32> = InputPrompt::new();
        let mut reader = Cursor::new("1\n");
        let mut out = Vec::new();

        let res = prompt.ask_from(&mut reader, &mut out);

        assert!(matches!(res, Err(InputErrors::MissingParser)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_prompt_age_scenario() {
        let prompt = InputPrompt::new()
            .with_options(
                RequestOptions::new()
                    .request_message("Age: ")
                    .error_message("Enter a valid age"),
            )
            .with_parser(FromStrParser::<i32>::new())
            .with_condition(|age: &i32| *age >= 0);
        let mut reader = Cursor::new("abc\n-5\n30\n");
        let mut out = Vec::new();

        let age = prompt.ask_from(&mut reader, &mut out).unwrap();

        assert_eq!(age, Some(30));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Age: Enter a valid age\nAge: Enter a valid age\nAge: "
        );
    }

    #[test]
    fn test_prompts_keep_separate_policies() {
        let optional = InputPrompt::new()
            .with_options(RequestOptions::new().skippable(true))
            .with_parser(TextParser);
        let required = InputPrompt::new().with_parser(CharParser);

        let mut reader = Cursor::new("\n\nq\n");
        let mut out = Vec::new();

        assert_eq!(optional.ask_from(&mut reader, &mut out).unwrap(), None);
        assert_eq!(required.ask_from(&mut reader, &mut out).unwrap(), Some('q'));
        assert_eq!(String::from_utf8(out).unwrap(), "Invalid input!\n");
    }

    #[test]
    fn test_prompt_options_mut() {
        let mut prompt = InputPrompt::new().with_parser(CharParser);
        prompt.options_mut().error_message = Some("One letter please".to_string());

        let mut reader = Cursor::new("abc\nz\n");
        let mut out = Vec::new();

        assert_eq!(prompt.ask_from(&mut reader, &mut out).unwrap(), Some('z'));
        assert_eq!(prompt.options().effective_error_message(), "One letter please");
        assert_eq!(String::from_utf8(out).unwrap(), "One letter please\n");
    }
}

//! # Input Requests
//!
//! Requests a value from the user with the certainty that a returned value is
//! always correct. Each request prints a message, reads one line, converts it
//! with a [`Parser`] and optionally checks it against a condition. Any failure
//! prints the configured error message and the request starts over, as many
//! times as needed.
//!
//! Two flavours share the same loop:
//!
//! - [`InputRequest`]: a controller owning **one** console reader. The
//!   process-wide instance ([`InputRequest::global`]) opens standard input on
//!   its first request and keeps it until [`InputRequest::close`] is called.
//!   After that the controller is permanently unusable.
//! - [`InputPrompt`]: bound at the call site, with its own settings, reading
//!   through a fresh lock on standard input every time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use conkit::input::{FromStrParser, InputRequest};
//!
//! let input = InputRequest::global();
//! input.set_request_message(Some("Age: ".to_string()));
//! input.set_error_message(Some("Enter a valid age".to_string()));
//!
//! let age = input
//!     .request_when(FromStrParser::<i32>::new(), |age: &i32| *age >= 0)
//!     .unwrap();
//! println!("Age: {:?}", age);
//!
//! input.close();
//! ```
//!
//! ## Skipping
//!
//! When the controller is skippable an empty line is a deliberate "no answer":
//! the request returns `Ok(None)` without running the parser or the condition.
//!
//! ## Errors
//!
//! Wrong answers never reach the caller. Only misuse and broken streams do,
//! see [`InputErrors`].
use std::{
    io::{self, BufRead, Write},
    sync::OnceLock,
};

use log::{debug, warn};
use parking_lot::{Mutex, MutexGuard};
use thiserror::Error;

pub mod options;
pub use options::{DEFAULT_ERROR_MESSAGE, RequestOptions};
pub mod parser;
pub use parser::{CharParser, FormatError, FromStrParser, Parser, TextParser};
pub mod prompt;
pub use prompt::InputPrompt;

/// Errors that end a request instead of starting it over.
#[derive(Debug, Error)]
pub enum InputErrors {
    /// The controller was closed with [`InputRequest::close`].
    #[error("This input request has been closed")]
    Closed,
    /// An [`InputPrompt`] was asked without a parser.
    #[error("No parser was provided for this input request")]
    MissingParser,
    /// The input stream ended before a valid answer was read.
    #[error("The input stream ended before a valid answer was given")]
    EndOfInput,
    #[error("Couldn't access the console: {0}")]
    Io(#[from] io::Error),
}

/// Where a request reads its answers from, one line per call.
pub(crate) trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead + ?Sized> LineSource for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Standard input read through its process-wide buffer.
///
/// Nothing is read ahead of the current line, so whatever this reader leaves
/// stays available to every other reader of standard input.
struct StdinLines;

impl LineSource for StdinLines {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

/// Condition checked against every converted answer.
pub type Condition<'a, T> = &'a dyn Fn(&T) -> bool;

/// Runs the request loop until a valid answer, a skip, or a stream failure.
pub(crate) fn read_until_valid<T, R, W>(
    reader: &mut R,
    writer: &mut W,
    options: &RequestOptions,
    parser: &dyn Parser<T>,
    condition: Option<Condition<'_, T>>,
) -> Result<Option<T>, InputErrors>
where
    R: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let mut line = String::new();

    loop {
        if let Some(message) = options.request_message.as_deref() {
            write!(writer, "{}", message)?;
        }
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(InputErrors::EndOfInput);
        }
        let answer = strip_line_ending(&line);

        if options.skippable && answer.is_empty() {
            debug!("request skipped with an empty answer");
            return Ok(None);
        }

        match parser.parse(answer) {
            Ok(value) if condition.is_none_or(|holds| holds(&value)) => return Ok(Some(value)),
            Ok(_) => debug!("answer {:?} rejected by the condition", answer),
            Err(e) => debug!("answer {:?} rejected: {}", answer, e),
        }

        writeln!(writer, "{}", options.effective_error_message())?;
    }
}

/// Removes one trailing `\n` or `\r\n`, nothing else.
fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(l) => l.strip_suffix('\r').unwrap_or(l),
        None => line,
    }
}

fn open_stdin() -> Box<dyn LineSource + Send> {
    Box::new(StdinLines)
}

/// The console resources guarded by an [`InputRequest`].
struct Console {
    reader: Option<Box<dyn LineSource + Send>>,
    writer: Box<dyn Write + Send>,
    open_reader: fn() -> Box<dyn LineSource + Send>,
    closed: bool,
}

/// A request controller owning a single console reader.
///
/// Settings are shared by every request made through the controller. The
/// reader is created on the first request and released by [`close`](Self::close),
/// after which every request fails with [`InputErrors::Closed`].
///
/// Concurrent requests on the same controller are serialized; callers are
/// expected to drive the console from one logical thread.
pub struct InputRequest {
    options: Mutex<RequestOptions>,
    console: Mutex<Console>,
}

static GLOBAL: OnceLock<InputRequest> = OnceLock::new();

impl InputRequest {
    /// Creates a controller over standard input and standard output.
    ///
    /// Standard input is not touched until the first request.
    pub fn new() -> Self {
        Self::opening(open_stdin, Box::new(io::stdout()))
    }

    /// A controller whose reader is opened by `open_reader` on first use.
    fn opening(
        open_reader: fn() -> Box<dyn LineSource + Send>,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            options: Mutex::new(RequestOptions::default()),
            console: Mutex::new(Console {
                reader: None,
                writer,
                open_reader,
                closed: false,
            }),
        }
    }

    /// Creates a controller over the given streams.
    pub fn with_io<R, W>(reader: R, writer: W) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            options: Mutex::new(RequestOptions::default()),
            console: Mutex::new(Console {
                reader: Some(Box::new(reader)),
                writer: Box::new(writer),
                open_reader: open_stdin,
                closed: false,
            }),
        }
    }

    /// The process-wide controller, created on first access.
    pub fn global() -> &'static InputRequest {
        GLOBAL.get_or_init(InputRequest::new)
    }

    /// Sets custom configuration of the [`InputRequest`].
    pub fn with_options(self, options: RequestOptions) -> Self {
        *self.options.lock() = options;
        self
    }

    /// Replaces every setting at once.
    pub fn configure(&self, options: RequestOptions) {
        *self.options.lock() = options;
    }

    /// A snapshot of the current settings.
    pub fn options(&self) -> RequestOptions {
        self.options.lock().clone()
    }

    /// Checks whether requests can be skipped by entering an empty line.
    pub fn is_skippable(&self) -> bool {
        self.options.lock().skippable
    }

    pub fn set_skippable(&self, value: bool) {
        self.options.lock().skippable = value;
    }

    /// The message printed when a line is rejected, if one was set.
    pub fn error_message(&self) -> Option<String> {
        self.options.lock().error_message.clone()
    }

    pub fn set_error_message(&self, message: Option<String>) {
        self.options.lock().error_message = message;
    }

    /// The message printed before each read, if one was set.
    pub fn request_message(&self) -> Option<String> {
        self.options.lock().request_message.clone()
    }

    pub fn set_request_message(&self, message: Option<String>) {
        self.options.lock().request_message = message;
    }

    /// Requests a line with no additional processing.
    ///
    /// Returns `Ok(None)` if the request was skipped.
    pub fn request(&self) -> Result<Option<String>, InputErrors> {
        self.run(&TextParser, None)
    }

    /// Requests a line and converts it with `parser`.
    pub fn request_with<T, P>(&self, parser: P) -> Result<Option<T>, InputErrors>
    where
        P: Parser<T>,
    {
        self.run(&parser, None)
    }

    /// Requests a line, converts it with `parser` and tests it with `condition`.
    ///
    /// A value failing the condition is handled exactly like a conversion failure.
    pub fn request_when<T, P, C>(&self, parser: P, condition: C) -> Result<Option<T>, InputErrors>
    where
        P: Parser<T>,
        C: Fn(&T) -> bool,
    {
        self.run(&parser, Some(&condition))
    }

    fn run<T>(
        &self,
        parser: &dyn Parser<T>,
        condition: Option<Condition<'_, T>>,
    ) -> Result<Option<T>, InputErrors> {
        let options = self.options();
        let mut guard = self.open_console()?;
        let console = &mut *guard;

        let reader = console.reader.get_or_insert_with(console.open_reader);

        read_until_valid(&mut **reader, &mut console.writer, &options, parser, condition)
    }

    fn open_console(&self) -> Result<MutexGuard<'_, Console>, InputErrors> {
        let console = self.console.lock();

        if console.closed {
            warn!("request attempted on a closed input controller");
            return Err(InputErrors::Closed);
        }

        Ok(console)
    }

    /// Releases the console reader and makes every later request fail.
    ///
    /// Safe to call more than once, and before any request was made.
    pub fn close(&self) {
        let mut console = self.console.lock();

        if console.reader.take().is_some() {
            debug!("console reader released");
        }
        console.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.console.lock().closed
    }
}

impl Default for InputRequest {
    fn default() -> Self {
        Self::new()
    }
}

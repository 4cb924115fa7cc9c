//! # conkit
//!
//! Interactive console machinery for command-line programs.
//!
//! ## Features
//!
//! - **Input requests** - Ask the user for a typed value and keep asking until
//!   the answer converts and passes an optional condition
//! - **Loading messages** - Toggle a background animation beside a message
//!   while a long operation runs
//!
//! ("serde" feature)
//! - JSON (de)serialization of [`input::RequestOptions`] and [`loading::LoadingOptions`]
//!
//! ("tokio-dep" feature)
//! - [`loading::AsyncLoadingMessage`], the loading animation as a tokio task
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! conkit = "0.1"
//! conkit = { version = "0.1", features = ["tokio-dep"] }
//! ```
//!
//! ### Asking for a number
//!
//! ```rust,no_run
//! use conkit::input::{FromStrParser, InputRequest, RequestOptions};
//!
//! let input = InputRequest::global();
//! input.configure(
//!     RequestOptions::new()
//!         .request_message("Age: ")
//!         .error_message("Enter a valid age"),
//! );
//!
//! match input.request_when(FromStrParser::<u8>::new(), |age: &u8| *age >= 18) {
//!     Ok(Some(age)) => println!("Welcome, you are {}", age),
//!     Ok(None) => println!("Skipped"),
//!     Err(e) => eprintln!("{}", e),
//! }
//!
//! // Releases standard input; any later request fails.
//! input.close();
//! ```
//!
//! ### Showing progress
//!
//! ```rust,no_run
//! use conkit::loading::{LoadingMessage, LoadingOptions, LoadingStyle};
//!
//! let mut loading = LoadingMessage::new().with_options(LoadingOptions {
//!     message: Some("Compiling".to_string()),
//!     style: LoadingStyle::Lines,
//!     frame_delay_ms: 250,
//! });
//!
//! loading.toggle();
//! // ... long operation ...
//! loading.toggle();
//! ```
//!
//! ## Architecture
//!
//! - **`input`** - Parsers, request options, the shared [`input::InputRequest`]
//!   controller and the call-site [`input::InputPrompt`]
//! - **`loading`** - Animation styles, options and the toggleable loading messages
//!
//! The two modules share no state.
//!
//! ## Error Handling
//!
//! Invalid answers are handled inside the request loop and never returned.
//! Misuse and console failures come back as [`input::InputErrors`]:
//!
//! ```rust,no_run
//! use conkit::input::{InputErrors, InputRequest};
//!
//! match InputRequest::global().request() {
//!     Ok(answer) => println!("{:?}", answer),
//!     Err(InputErrors::Closed) => eprintln!("Input was already closed"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod input;

pub mod loading;

#[cfg(test)]
mod test_support;

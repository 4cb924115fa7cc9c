//! # Loading Messages
//!
//! An animated loading message for operations that take time to complete.
//! The animation runs in the background while the caller does its work, and
//! is started and stopped with the same call, [`LoadingMessage::toggle`].
//!
//! ```rust,no_run
//! use conkit::loading::{LoadingMessage, LoadingStyle};
//!
//! let mut loading = LoadingMessage::new();
//! loading.set_message(Some("Downloading".to_string()));
//! loading.set_style(LoadingStyle::RotaryLine);
//!
//! loading.toggle(); // prints "Downloading " and starts spinning
//! std::thread::sleep(std::time::Duration::from_secs(5));
//! loading.toggle(); // waits for the animation to stop, then breaks the line
//! ```
//!
//! ## Output
//!
//! Frames are erased in place with backspace characters, so nothing else
//! should write to the same console while the animation runs.
//!
//! ## Stopping
//!
//! The background worker checks for a stop request between frames. Stopping
//! takes at most one frame delay and never leaves half a frame on screen. The
//! line break is printed only after the worker is gone.
//!
//! With the `tokio-dep` feature, [`AsyncLoadingMessage`] provides the same
//! behavior as a tokio task.
use std::io::Write;

use log::debug;
use parking_lot::Mutex;

pub mod options;
pub use options::LoadingOptions;
pub mod style;
pub use style::{FrameSteps, LoadingStyle, UnknownStyle};
mod message;
pub use message::LoadingMessage;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        mod async_message;
        pub use async_message::AsyncLoadingMessage;
    }
}

/// Writes `text` in one locked call. Failures only leave the console untouched.
pub(crate) fn write_console<W: Write>(writer: &Mutex<W>, text: &str) {
    let mut out = writer.lock();

    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        debug!("loading message output failed: {}", e);
    }
}

/// The text printed when an animation starts: the message and its separator.
pub(crate) fn header(options: &LoadingOptions) -> String {
    match options.message.as_deref() {
        Some(message) => format!("{}{}", message, options.style.separator(true)),
        None => String::new(),
    }
}

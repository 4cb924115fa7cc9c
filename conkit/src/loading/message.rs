use std::{
    io::{self, Stdout, Write},
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, trace, warn};
use parking_lot::Mutex;

use super::{LoadingOptions, LoadingStyle, header, write_console};

/// An animated loading message running on a background thread.
///
/// The message is idle after construction. [`toggle`](Self::toggle) prints the
/// message and starts the animation; the next call stops it. Dropping a running
/// message stops it the same way.
///
/// Only the owner of the value can toggle it, so no two workers ever exist for
/// one message.
pub struct LoadingMessage<W = Stdout>
where
    W: Write + Send + 'static,
{
    options: LoadingOptions,
    writer: Arc<Mutex<W>>,
    worker: Option<Worker>,
}

/// A running animation thread and the channel used to stop it.
struct Worker {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Signals the thread and waits until it has written its last frame.
    fn stop(self) {
        // A worker that already hung up has stopped on its own.
        self.stop.send(()).ok();

        if self.handle.join().is_err() {
            warn!("loading animation thread panicked");
        }
    }
}

impl LoadingMessage<Stdout> {
    /// Creates an idle loading message printing on standard output.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for LoadingMessage<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> LoadingMessage<W>
where
    W: Write + Send + 'static,
{
    /// Creates an idle loading message printing on `writer`.
    pub fn with_writer(writer: W) -> Self {
        Self {
            options: LoadingOptions::default(),
            writer: Arc::new(Mutex::new(writer)),
            worker: None,
        }
    }

    /// Sets custom configuration of the [`LoadingMessage`].
    pub fn with_options(mut self, options: LoadingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoadingOptions {
        &self.options
    }

    pub fn message(&self) -> Option<&str> {
        self.options.message.as_deref()
    }

    /// Sets the text printed beside the animation. Takes effect on the next start.
    pub fn set_message(&mut self, message: Option<String>) {
        self.options.message = message;
    }

    pub fn style(&self) -> LoadingStyle {
        self.options.style
    }

    /// Sets the animation style. Takes effect on the next start.
    pub fn set_style(&mut self, style: LoadingStyle) {
        self.options.style = style;
    }

    pub fn frame_delay(&self) -> Duration {
        self.options.frame_delay()
    }

    /// Sets the time each frame stays on screen. Takes effect on the next start.
    pub fn set_frame_delay(&mut self, delay: Duration) {
        self.options.frame_delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
    }

    /// Checks whether the animation started by [`toggle`](Self::toggle) is on.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts the animation if it is idle, stops it if it is running.
    ///
    /// Stopping blocks until the background thread has finished, then prints
    /// a line break.
    pub fn toggle(&mut self) {
        match self.worker.take() {
            Some(worker) => self.finish(worker),
            None => self.start(),
        }
    }

    fn start(&mut self) {
        write_console(&self.writer, &header(&self.options));

        let (stop, stopped) = mpsc::channel();
        let writer = Arc::clone(&self.writer);
        let style = self.options.style;
        let delay = self.options.frame_delay();

        let handle = thread::spawn(move || animate(&writer, style, delay, &stopped));

        debug!("loading animation started with style {}", style);
        self.worker = Some(Worker { stop, handle });
    }

    fn finish(&self, worker: Worker) {
        worker.stop();
        write_console(&self.writer, "\n");
        debug!("loading animation stopped");
    }
}

impl<W> Drop for LoadingMessage<W>
where
    W: Write + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.finish(worker);
        }
    }
}

/// Body of the animation thread. Stops at the first frame boundary after a
/// stop request, or when the owner is gone.
fn animate<W: Write>(
    writer: &Mutex<W>,
    style: LoadingStyle,
    delay: Duration,
    stopped: &mpsc::Receiver<()>,
) {
    for step in style.steps() {
        trace!("loading frame {:?}", step);
        write_console(writer, &step);

        match stopped.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SharedBuffer, assert_animation};

    const FAST: Duration = Duration::from_millis(5);

    fn loading(
        message: Option<&str>,
        style: LoadingStyle,
    ) -> (LoadingMessage<SharedBuffer>, SharedBuffer) {
        let out = SharedBuffer::new();
        let loading = LoadingMessage::with_writer(out.clone()).with_options(LoadingOptions {
            message: message.map(str::to_string),
            style,
            frame_delay_ms: FAST.as_millis() as u64,
        });
        (loading, out)
    }

    #[test]
    fn test_toggle_switches_running_state() {
        let (mut loading, out) = loading(Some("Working"), LoadingStyle::Periods);

        assert!(!loading.is_running());
        loading.toggle();
        assert!(loading.is_running());
        thread::sleep(FAST * 4);
        loading.toggle();
        assert!(!loading.is_running());

        let printed = out.contents();
        assert!(printed.starts_with("Working   "));
        assert!(printed.ends_with('\n'));
    }

    #[test]
    fn test_every_style_erases_exactly_the_previous_frame() {
        for style in LoadingStyle::ALL {
            let (mut loading, out) = loading(Some("Loading"), style);

            loading.toggle();
            thread::sleep(FAST * 10);
            loading.toggle();

            let printed = out.contents();
            let prefix = format!("Loading{}", style.separator(true));
            let animation = printed
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix('\n'))
                .unwrap();

            assert_animation(style, animation);
        }
    }

    #[test]
    fn test_no_message_prints_no_separator() {
        let (mut loading, out) = loading(None, LoadingStyle::Lines);

        loading.toggle();
        loading.toggle();

        let printed = out.contents();
        assert!(printed.starts_with("___"));
        assert_animation(LoadingStyle::Lines, printed.strip_suffix('\n').unwrap());
    }

    #[test]
    fn test_stop_waits_for_worker() {
        let (mut loading, out) = loading(None, LoadingStyle::RotaryLine);

        loading.toggle();
        thread::sleep(FAST * 3);
        loading.toggle();

        // Nothing may be written once the stop returned.
        let after_stop = out.contents();
        thread::sleep(FAST * 4);
        assert_eq!(out.contents(), after_stop);
        assert!(after_stop.ends_with('\n'));
    }

    #[test]
    fn test_sessions_can_repeat() {
        let (mut loading, out) = loading(Some("a"), LoadingStyle::Periods);

        for _ in 0..3 {
            loading.toggle();
            assert!(loading.is_running());
            loading.toggle();
            assert!(!loading.is_running());
        }

        assert_eq!(out.contents().matches('\n').count(), 3);
        assert_eq!(out.contents().matches('a').count(), 3);
    }

    #[test]
    fn test_drop_stops_running_animation() {
        let (mut loading, out) = loading(Some("Bye"), LoadingStyle::Lines);

        loading.toggle();
        drop(loading);

        let printed = out.contents();
        assert!(printed.starts_with("Bye ___"));
        assert!(printed.ends_with('\n'));
    }

    #[test]
    fn test_setters_apply_to_next_start() {
        let (mut loading, out) = loading(None, LoadingStyle::Periods);
        loading.set_message(Some("Next".to_string()));
        loading.set_style(LoadingStyle::RotaryLine);
        loading.set_frame_delay(Duration::from_millis(2));

        assert_eq!(loading.message(), Some("Next"));
        assert_eq!(loading.style(), LoadingStyle::RotaryLine);
        assert_eq!(loading.frame_delay(), Duration::from_millis(2));

        loading.toggle();
        loading.toggle();

        assert!(out.contents().starts_with("Next ─"));
    }

    #[test]
    fn test_default_is_idle_with_default_options() {
        let loading = LoadingMessage::default();

        assert!(!loading.is_running());
        assert_eq!(loading.options(), &LoadingOptions::default());
    }
}

use std::{
    io::{self, Stdout, Write},
    sync::Arc,
    time::Duration,
};

use log::{debug, trace, warn};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{LoadingOptions, LoadingStyle, header, write_console};

/// [`LoadingMessage`](super::LoadingMessage) for tokio applications.
///
/// The animation runs as a tokio task and [`toggle`](Self::toggle) is `async`:
/// stopping awaits the task instead of blocking a thread.
///
/// Dropping a running message cancels the task without waiting for it and
/// without printing the final line break.
pub struct AsyncLoadingMessage<W = Stdout>
where
    W: Write + Send + 'static,
{
    options: LoadingOptions,
    writer: Arc<Mutex<W>>,
    worker: Option<(CancellationToken, JoinHandle<()>)>,
}

impl AsyncLoadingMessage<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for AsyncLoadingMessage<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> AsyncLoadingMessage<W>
where
    W: Write + Send + 'static,
{
    pub fn with_writer(writer: W) -> Self {
        Self {
            options: LoadingOptions::default(),
            writer: Arc::new(Mutex::new(writer)),
            worker: None,
        }
    }

    pub fn with_options(mut self, options: LoadingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoadingOptions {
        &self.options
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.options.message = message;
    }

    pub fn set_style(&mut self, style: LoadingStyle) {
        self.options.style = style;
    }

    /// Takes effect on the next start.
    pub fn set_frame_delay(&mut self, delay: Duration) {
        self.options.frame_delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts the animation if it is idle, stops it if it is running.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn toggle(&mut self) {
        match self.worker.take() {
            Some((token, handle)) => {
                token.cancel();
                if let Err(e) = handle.await {
                    warn!("loading animation task failed: {}", e);
                }
                write_console(&self.writer, "\n");
                debug!("loading animation task stopped");
            }
            None => {
                write_console(&self.writer, &header(&self.options));

                let token = CancellationToken::new();
                let handle = tokio::spawn(animate(
                    Arc::clone(&self.writer),
                    self.options.style,
                    self.options.frame_delay(),
                    token.clone(),
                ));

                debug!("loading animation task started");
                self.worker = Some((token, handle));
            }
        }
    }
}

impl<W> Drop for AsyncLoadingMessage<W>
where
    W: Write + Send + 'static,
{
    fn drop(&mut self) {
        if let Some((token, _)) = self.worker.take() {
            token.cancel();
        }
    }
}

async fn animate<W: Write>(
    writer: Arc<Mutex<W>>,
    style: LoadingStyle,
    delay: Duration,
    token: CancellationToken,
) {
    for step in style.steps() {
        trace!("loading frame {:?}", step);
        write_console(&writer, &step);

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

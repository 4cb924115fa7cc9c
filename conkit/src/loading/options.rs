use std::time::Duration;

use super::LoadingStyle;

/// Configuration of a loading animation.
///
/// # Defaults
/// ```rust,ignore
/// LoadingOptions {
///     message: None,
///     style: LoadingStyle::Periods,
///     frame_delay_ms: 1_000,
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadingOptions {
    /// Printed once, right before the animation.
    pub message: Option<String>,
    pub style: LoadingStyle,
    /// Time each frame stays on screen, in milliseconds.
    pub frame_delay_ms: u64,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            message: None,
            style: LoadingStyle::default(),
            frame_delay_ms: 1_000,
        }
    }
}

impl LoadingOptions {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Message printed after an invalid answer when no custom one is configured.
pub const DEFAULT_ERROR_MESSAGE: &str = "Invalid input!";

/// Settings shared by every request made through the same controller.
///
/// # Fields
/// - `skippable`: an empty line is accepted and yields no value instead of an error
/// - `request_message`: printed, without a line break, before each read
/// - `error_message`: printed after each rejected line, falls back to [`DEFAULT_ERROR_MESSAGE`]
///
/// # Defaults
/// ```rust,ignore
/// RequestOptions {
///     skippable: false,
///     request_message: None,
///     error_message: None,
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RequestOptions {
    pub skippable: bool,
    pub request_message: Option<String>,
    pub error_message: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skippable(mut self, value: bool) -> Self {
        self.skippable = value;
        self
    }

    pub fn request_message(mut self, message: impl Into<String>) -> Self {
        self.request_message = Some(message.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// The error text actually printed for a rejected line.
    pub fn effective_error_message(&self) -> &str {
        self.error_message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
    }

    /// Reads options from a JSON document. Missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RequestOptions::default();

        assert!(!options.skippable);
        assert_eq!(options.request_message, None);
        assert_eq!(options.effective_error_message(), "Invalid input!");
    }

    #[test]
    fn test_builder_options() {
        let options = RequestOptions::new()
            .skippable(true)
            .request_message("Age: ")
            .error_message("Enter a valid age");

        assert!(options.skippable);
        assert_eq!(options.request_message.as_deref(), Some("Age: "));
        assert_eq!(options.effective_error_message(), "Enter a valid age");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options =
            RequestOptions::from_json(r#"{ "skippable": true, "request_message": "Nickname: " }"#)
                .unwrap();

        assert!(options.skippable);
        assert_eq!(options.request_message.as_deref(), Some("Nickname: "));
        assert_eq!(options.error_message, None);
        assert!(RequestOptions::from_json("{ not json").is_err());
    }
}

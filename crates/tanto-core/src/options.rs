//! # Parse Options
//!
//! Immutable configuration for one parse.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TantoError};

/// Delimiters used when the caller does not configure any.
pub const DEFAULT_DELIMITERS: &str = " _.&+,|";

/// Configuration for the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Characters the lexer may split on.
    pub allowed_delimiters: String,
    /// Substrings removed from the filename before lexing.
    pub ignored_strings: Vec<String>,
    /// Whether episode numbers are extracted.
    pub parse_episode_number: bool,
    /// Whether episode titles are extracted.
    pub parse_episode_title: bool,
    /// Whether the file extension is stripped and recorded.
    pub parse_file_extension: bool,
    /// Whether release groups are extracted.
    pub parse_release_group: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allowed_delimiters: DEFAULT_DELIMITERS.to_string(),
            ignored_strings: Vec::new(),
            parse_episode_number: true,
            parse_episode_title: true,
            parse_file_extension: true,
            parse_release_group: true,
        }
    }
}

impl Options {
    /// Create a new options set with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the characters the lexer may split on.
    pub fn with_allowed_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.allowed_delimiters = delimiters.into();
        self
    }

    /// Set the substrings removed before lexing.
    pub fn with_ignored_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_strings = strings.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable episode number extraction.
    pub fn with_episode_number(mut self, enabled: bool) -> Self {
        self.parse_episode_number = enabled;
        self
    }

    /// Enable or disable episode title extraction.
    pub fn with_episode_title(mut self, enabled: bool) -> Self {
        self.parse_episode_title = enabled;
        self
    }

    /// Enable or disable file extension handling.
    pub fn with_file_extension(mut self, enabled: bool) -> Self {
        self.parse_file_extension = enabled;
        self
    }

    /// Enable or disable release group extraction.
    pub fn with_release_group(mut self, enabled: bool) -> Self {
        self.parse_release_group = enabled;
        self
    }

    /// Checks that the options can drive a parse.
    ///
    /// # Errors
    ///
    /// Returns `TantoError::InvalidOptions` if a delimiter is alphanumeric.
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = self.allowed_delimiters.chars().find(|c| c.is_alphanumeric()) {
            return Err(TantoError::InvalidOptions(format!(
                "delimiter {c:?} is alphanumeric"
            )));
        }
        Ok(())
    }

    /// Returns `true` if `c` is a configured delimiter.
    #[must_use]
    pub fn is_delimiter(&self, c: char) -> bool {
        !c.is_alphanumeric() && self.allowed_delimiters.contains(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let options = Options::default();
        assert!(options.parse_episode_number);
        assert!(options.parse_episode_title);
        assert!(options.parse_file_extension);
        assert!(options.parse_release_group);
        assert_eq!(options.allowed_delimiters, " _.&+,|");
        assert!(options.ignored_strings.is_empty());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let options = Options::new()
            .with_episode_title(false)
            .with_release_group(false)
            .with_ignored_strings(["[720p]", "_rev"])
            .with_allowed_delimiters(" ");
        assert!(!options.parse_episode_title);
        assert!(!options.parse_release_group);
        assert_eq!(options.ignored_strings, vec!["[720p]", "_rev"]);
        assert!(options.is_delimiter(' '));
        assert!(!options.is_delimiter('_'));
    }

    #[test]
    fn alphanumeric_delimiters_are_rejected() {
        let options = Options::new().with_allowed_delimiters(" a");
        assert!(matches!(
            options.validate(),
            Err(TantoError::InvalidOptions(_))
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let options: Options =
            serde_json::from_str(r#"{"parse_episode_title": false}"#).unwrap();
        assert!(!options.parse_episode_title);
        assert!(options.parse_episode_number);
        assert_eq!(options.allowed_delimiters, DEFAULT_DELIMITERS);
    }
}

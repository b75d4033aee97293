use serde::{Deserialize, Serialize};

use super::element::{ElementKind, Elements};
use crate::token::Token;

/// The primary output of the Tanto parsing engine.
///
/// Holds every extracted element in discovery order together with the final
/// token classification, which is handy when debugging a heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Original input string.
    pub input: String,

    /// Extracted elements, in the order they were discovered.
    pub elements: Elements,

    /// Token sequence as left by the last parser pass.
    pub tokens: Vec<Token>,
}

impl ParseResult {
    /// Creates an empty result for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            elements: Elements::new(),
            tokens: Vec::new(),
        }
    }

    /// First value of `kind`.
    #[must_use]
    pub fn get(&self, kind: ElementKind) -> Option<&str> {
        self.elements.get_first(kind)
    }

    /// All values of `kind`.
    #[must_use]
    pub fn get_all(&self, kind: ElementKind) -> Vec<&str> {
        self.elements.get_all(kind)
    }

    #[must_use]
    pub fn anime_title(&self) -> Option<&str> {
        self.get(ElementKind::AnimeTitle)
    }

    #[must_use]
    pub fn anime_season(&self) -> Option<&str> {
        self.get(ElementKind::AnimeSeason)
    }

    #[must_use]
    pub fn anime_year(&self) -> Option<&str> {
        self.get(ElementKind::AnimeYear)
    }

    #[must_use]
    pub fn episode_number(&self) -> Option<&str> {
        self.get(ElementKind::EpisodeNumber)
    }

    /// Every episode number, including the upper end of a range.
    #[must_use]
    pub fn episode_numbers(&self) -> Vec<&str> {
        self.get_all(ElementKind::EpisodeNumber)
    }

    #[must_use]
    pub fn episode_number_alt(&self) -> Option<&str> {
        self.get(ElementKind::EpisodeNumberAlt)
    }

    #[must_use]
    pub fn episode_title(&self) -> Option<&str> {
        self.get(ElementKind::EpisodeTitle)
    }

    #[must_use]
    pub fn release_group(&self) -> Option<&str> {
        self.get(ElementKind::ReleaseGroup)
    }

    #[must_use]
    pub fn release_version(&self) -> Option<&str> {
        self.get(ElementKind::ReleaseVersion)
    }

    #[must_use]
    pub fn video_resolution(&self) -> Option<&str> {
        self.get(ElementKind::VideoResolution)
    }

    #[must_use]
    pub fn volume_number(&self) -> Option<&str> {
        self.get(ElementKind::VolumeNumber)
    }

    #[must_use]
    pub fn file_checksum(&self) -> Option<&str> {
        self.get(ElementKind::FileChecksum)
    }

    #[must_use]
    pub fn file_extension(&self) -> Option<&str> {
        self.get(ElementKind::FileExtension)
    }

    /// Returns `true` if the result extracted at least a title.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.elements.has(ElementKind::AnimeTitle)
    }
}

impl std::fmt::Display for ParseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseResult(")?;
        let mut first = true;
        for element in &self.elements {
            if matches!(element.kind, ElementKind::FileName) {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", element.kind, element.value)?;
            first = false;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseResult {
        let mut result = ParseResult::new("[Group] Show Name - 05 [1080p].mkv");
        result.elements.insert(ElementKind::FileExtension, "mkv");
        result.elements.insert(ElementKind::FileName, "[Group] Show Name - 05 [1080p]");
        result.elements.insert(ElementKind::VideoResolution, "1080p");
        result.elements.insert(ElementKind::EpisodeNumber, "05");
        result.elements.insert(ElementKind::AnimeTitle, "Show Name");
        result.elements.insert(ElementKind::ReleaseGroup, "Group");
        result
    }

    #[test]
    fn new_parse_result_is_empty() {
        let result = ParseResult::new("test input");
        assert_eq!(result.input, "test input");
        assert!(!result.has_title());
        assert!(result.elements.is_empty());
        assert!(result.tokens.is_empty());
    }

    #[test]
    fn accessors_read_first_value() {
        let result = sample();
        assert_eq!(result.anime_title(), Some("Show Name"));
        assert_eq!(result.release_group(), Some("Group"));
        assert_eq!(result.episode_number(), Some("05"));
        assert_eq!(result.video_resolution(), Some("1080p"));
        assert_eq!(result.file_extension(), Some("mkv"));
        assert_eq!(result.episode_title(), None);
    }

    #[test]
    fn display_skips_file_name() {
        let display = sample().to_string();
        assert!(display.starts_with("ParseResult(file_extension=\"mkv\""));
        assert!(display.contains("anime_title=\"Show Name\""));
        assert!(!display.contains("file_name"));
    }

    #[test]
    fn parse_result_serialization_roundtrip() {
        let result = sample();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let back: ParseResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}

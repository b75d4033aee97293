use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an extracted metadata value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    AnimeSeason,
    AnimeSeasonPrefix,
    AnimeTitle,
    AnimeType,
    AnimeYear,
    AudioTerm,
    DeviceCompatibility,
    EpisodeNumber,
    EpisodeNumberAlt,
    EpisodePrefix,
    EpisodeTitle,
    FileChecksum,
    FileExtension,
    FileName,
    Language,
    Other,
    ReleaseGroup,
    ReleaseInformation,
    ReleaseVersion,
    Source,
    Subtitles,
    VideoResolution,
    VideoTerm,
    VolumeNumber,
    VolumePrefix,
    Unknown,
}

impl ElementKind {
    /// Whether a dictionary hit of this kind takes part in the keyword pass.
    #[must_use]
    pub fn is_searchable(self) -> bool {
        matches!(
            self,
            Self::AnimeSeasonPrefix
                | Self::AnimeType
                | Self::AudioTerm
                | Self::DeviceCompatibility
                | Self::EpisodePrefix
                | Self::FileChecksum
                | Self::Language
                | Self::Other
                | Self::ReleaseGroup
                | Self::ReleaseInformation
                | Self::ReleaseVersion
                | Self::Source
                | Self::Subtitles
                | Self::VideoResolution
                | Self::VideoTerm
                | Self::VolumePrefix
        )
    }

    /// Whether at most one authoritative value is expected per filename.
    ///
    /// Episode numbers and seasons are multi-valued here because ranges
    /// (`01-02`, `S01-S02`) record both ends under the same kind; the parser
    /// guards them with explicit validation instead.
    #[must_use]
    pub fn is_singular(self) -> bool {
        !matches!(
            self,
            Self::AnimeSeason
                | Self::AnimeType
                | Self::AudioTerm
                | Self::DeviceCompatibility
                | Self::EpisodeNumber
                | Self::Language
                | Self::Other
                | Self::ReleaseInformation
                | Self::Source
                | Self::VideoTerm
        )
    }

    /// Stable snake_case name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnimeSeason => "anime_season",
            Self::AnimeSeasonPrefix => "anime_season_prefix",
            Self::AnimeTitle => "anime_title",
            Self::AnimeType => "anime_type",
            Self::AnimeYear => "anime_year",
            Self::AudioTerm => "audio_term",
            Self::DeviceCompatibility => "device_compatibility",
            Self::EpisodeNumber => "episode_number",
            Self::EpisodeNumberAlt => "episode_number_alt",
            Self::EpisodePrefix => "episode_prefix",
            Self::EpisodeTitle => "episode_title",
            Self::FileChecksum => "file_checksum",
            Self::FileExtension => "file_extension",
            Self::FileName => "file_name",
            Self::Language => "language",
            Self::Other => "other",
            Self::ReleaseGroup => "release_group",
            Self::ReleaseInformation => "release_information",
            Self::ReleaseVersion => "release_version",
            Self::Source => "source",
            Self::Subtitles => "subtitles",
            Self::VideoResolution => "video_resolution",
            Self::VideoTerm => "video_term",
            Self::VolumeNumber => "volume_number",
            Self::VolumePrefix => "volume_prefix",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub value: String,
}

/// Insertion-ordered multimap of extracted elements.
///
/// Insertion never replaces earlier values; removal is an explicit action
/// of the validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Elements {
    entries: Vec<Element>,
}

impl Elements {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn insert(&mut self, kind: ElementKind, value: impl Into<String>) {
        self.entries.push(Element {
            kind,
            value: value.into(),
        });
    }

    /// Returns `true` if at least one value of `kind` is stored.
    #[must_use]
    pub fn has(&self, kind: ElementKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// First value of `kind`, in discovery order.
    #[must_use]
    pub fn get_first(&self, kind: ElementKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.value.as_str())
    }

    /// All values of `kind`, in discovery order.
    #[must_use]
    pub fn get_all(&self, kind: ElementKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Number of values of `kind`.
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Removes every value of `kind`.
    pub fn remove(&mut self, kind: ElementKind) {
        self.entries.retain(|e| e.kind != kind);
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Element) -> bool) {
        self.entries.retain(keep);
    }

    /// Mutable access for in-place relabelling.
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Element> {
        self.entries.iter_mut()
    }

    /// Iterates all elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved_per_kind() {
        let mut elements = Elements::new();
        elements.insert(ElementKind::EpisodeNumber, "01");
        elements.insert(ElementKind::AnimeTitle, "Title");
        elements.insert(ElementKind::EpisodeNumber, "02");

        assert_eq!(elements.get_all(ElementKind::EpisodeNumber), vec!["01", "02"]);
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("01"));
        assert_eq!(elements.count(ElementKind::EpisodeNumber), 2);
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn missing_kind_reads_empty() {
        let elements = Elements::new();
        assert!(!elements.has(ElementKind::ReleaseGroup));
        assert_eq!(elements.get_first(ElementKind::ReleaseGroup), None);
        assert!(elements.get_all(ElementKind::ReleaseGroup).is_empty());
        assert!(elements.is_empty());
    }

    #[test]
    fn remove_drops_only_the_kind() {
        let mut elements = Elements::new();
        elements.insert(ElementKind::AnimeType, "OVA");
        elements.insert(ElementKind::EpisodeTitle, "OVA");
        elements.remove(ElementKind::AnimeType);
        assert!(!elements.has(ElementKind::AnimeType));
        assert!(elements.has(ElementKind::EpisodeTitle));
    }

    #[test]
    fn singular_and_searchable_kinds() {
        assert!(ElementKind::ReleaseGroup.is_singular());
        assert!(ElementKind::FileChecksum.is_singular());
        assert!(!ElementKind::AudioTerm.is_singular());
        assert!(!ElementKind::EpisodeNumber.is_singular());
        assert!(ElementKind::EpisodePrefix.is_singular());
        assert!(ElementKind::AnimeSeasonPrefix.is_singular());
        assert!(ElementKind::VolumePrefix.is_singular());

        assert!(ElementKind::VideoTerm.is_searchable());
        assert!(!ElementKind::AnimeTitle.is_searchable());
        assert!(!ElementKind::EpisodeNumber.is_searchable());
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in [
            ElementKind::AnimeSeason,
            ElementKind::EpisodeNumberAlt,
            ElementKind::VideoResolution,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn store_serializes_as_list() {
        let mut elements = Elements::new();
        elements.insert(ElementKind::ReleaseGroup, "Group");
        let json = serde_json::to_string(&elements).unwrap();
        assert_eq!(json, r#"[{"kind":"release_group","value":"Group"}]"#);
    }
}

//! # Keyword Dictionary
//!
//! Compile-time tables of known release-name terms. Keys are normalized with
//! [`normalize`]: full-width ASCII folded to ASCII, then upper-cased.

use phf::phf_map;

use crate::types::ElementKind;

/// Matching behaviour of a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordFlags {
    /// A hit reclassifies the token as `Identifier`.
    pub identifiable: bool,
    /// A hit takes part in the keyword pass at all.
    pub searchable: bool,
    /// An episode prefix hit may consume the following number.
    pub valid: bool,
}

/// A dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub kind: ElementKind,
    pub flags: KeywordFlags,
}

impl Keyword {
    const fn new(kind: ElementKind) -> Self {
        Self::with(kind, true, true, true)
    }

    /// Ambiguous words that must stay `Unknown` for the title passes.
    const fn unidentifiable(kind: ElementKind) -> Self {
        Self::with(kind, false, true, true)
    }

    const fn invalid(kind: ElementKind) -> Self {
        Self::with(kind, true, true, false)
    }

    const fn unidentifiable_invalid(kind: ElementKind) -> Self {
        Self::with(kind, false, true, false)
    }

    const fn unsearchable(kind: ElementKind) -> Self {
        Self::with(kind, false, false, true)
    }

    const fn with(kind: ElementKind, identifiable: bool, searchable: bool, valid: bool) -> Self {
        Self {
            kind,
            flags: KeywordFlags {
                identifiable,
                searchable,
                valid,
            },
        }
    }
}

use ElementKind as K;

/// Main keyword table.
pub static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    // Season prefix
    "SAISON" => Keyword::unidentifiable(K::AnimeSeasonPrefix),
    "SEASON" => Keyword::unidentifiable(K::AnimeSeasonPrefix),

    // Anime type
    "GEKIJOUBAN" => Keyword::unidentifiable(K::AnimeType),
    "MOVIE" => Keyword::unidentifiable(K::AnimeType),
    "OAD" => Keyword::unidentifiable(K::AnimeType),
    "OAV" => Keyword::unidentifiable(K::AnimeType),
    "ONA" => Keyword::unidentifiable(K::AnimeType),
    "OVA" => Keyword::unidentifiable(K::AnimeType),
    "SPECIAL" => Keyword::unidentifiable(K::AnimeType),
    "SPECIALS" => Keyword::unidentifiable(K::AnimeType),
    "TV" => Keyword::unidentifiable(K::AnimeType),
    // "Yumeiro Patissiere SP Professional"
    "SP" => Keyword::unsearchable(K::AnimeType),
    "ED" => Keyword::unidentifiable_invalid(K::AnimeType),
    "ENDING" => Keyword::unidentifiable_invalid(K::AnimeType),
    "NCED" => Keyword::unidentifiable_invalid(K::AnimeType),
    "NCOP" => Keyword::unidentifiable_invalid(K::AnimeType),
    "OP" => Keyword::unidentifiable_invalid(K::AnimeType),
    "OPENING" => Keyword::unidentifiable_invalid(K::AnimeType),
    "PREVIEW" => Keyword::unidentifiable_invalid(K::AnimeType),
    "PV" => Keyword::unidentifiable_invalid(K::AnimeType),

    // Audio channels, codecs and language
    "2.0CH" => Keyword::new(K::AudioTerm),
    "2CH" => Keyword::new(K::AudioTerm),
    "5.1" => Keyword::new(K::AudioTerm),
    "5.1CH" => Keyword::new(K::AudioTerm),
    "DTS" => Keyword::new(K::AudioTerm),
    "DTS-ES" => Keyword::new(K::AudioTerm),
    "DTS5.1" => Keyword::new(K::AudioTerm),
    "TRUEHD5.1" => Keyword::new(K::AudioTerm),
    "AAC" => Keyword::new(K::AudioTerm),
    "AACX2" => Keyword::new(K::AudioTerm),
    "AACX3" => Keyword::new(K::AudioTerm),
    "AACX4" => Keyword::new(K::AudioTerm),
    "AC3" => Keyword::new(K::AudioTerm),
    "EAC3" => Keyword::new(K::AudioTerm),
    "E-AC-3" => Keyword::new(K::AudioTerm),
    "FLAC" => Keyword::new(K::AudioTerm),
    "FLACX2" => Keyword::new(K::AudioTerm),
    "FLACX3" => Keyword::new(K::AudioTerm),
    "FLACX4" => Keyword::new(K::AudioTerm),
    "LOSSLESS" => Keyword::new(K::AudioTerm),
    "MP3" => Keyword::new(K::AudioTerm),
    "OGG" => Keyword::new(K::AudioTerm),
    "VORBIS" => Keyword::new(K::AudioTerm),
    "DUALAUDIO" => Keyword::new(K::AudioTerm),
    "DUAL AUDIO" => Keyword::new(K::AudioTerm),

    // Device compatibility
    "IPAD3" => Keyword::new(K::DeviceCompatibility),
    "IPHONE5" => Keyword::new(K::DeviceCompatibility),
    "IPOD" => Keyword::new(K::DeviceCompatibility),
    "PS3" => Keyword::new(K::DeviceCompatibility),
    "XBOX" => Keyword::new(K::DeviceCompatibility),
    "XBOX360" => Keyword::new(K::DeviceCompatibility),
    "ANDROID" => Keyword::unidentifiable(K::DeviceCompatibility),

    // Episode prefix
    "EP" => Keyword::new(K::EpisodePrefix),
    "EP." => Keyword::new(K::EpisodePrefix),
    "EPS" => Keyword::new(K::EpisodePrefix),
    "EPS." => Keyword::new(K::EpisodePrefix),
    "EPISODE" => Keyword::new(K::EpisodePrefix),
    "EPISODE." => Keyword::new(K::EpisodePrefix),
    "EPISODES" => Keyword::new(K::EpisodePrefix),
    "CAPITULO" => Keyword::new(K::EpisodePrefix),
    "EPISODIO" => Keyword::new(K::EpisodePrefix),
    "EPISÓDIO" => Keyword::new(K::EpisodePrefix),
    "FOLGE" => Keyword::new(K::EpisodePrefix),
    // single-letter prefixes only count when glued to a number
    "E" => Keyword::invalid(K::EpisodePrefix),
    "\u{7B2C}" => Keyword::invalid(K::EpisodePrefix),

    // Language
    "ENG" => Keyword::new(K::Language),
    "ENGLISH" => Keyword::new(K::Language),
    "ESPANOL" => Keyword::new(K::Language),
    "JAP" => Keyword::new(K::Language),
    "PT-BR" => Keyword::new(K::Language),
    "SPANISH" => Keyword::new(K::Language),
    "VOSTFR" => Keyword::new(K::Language),
    // "Tokyo ESP", "Bokura ga Ita"
    "ESP" => Keyword::unidentifiable(K::Language),
    "ITA" => Keyword::unidentifiable(K::Language),

    // Other
    "REMASTER" => Keyword::new(K::Other),
    "REMASTERED" => Keyword::new(K::Other),
    "UNCENSORED" => Keyword::new(K::Other),
    "UNCUT" => Keyword::new(K::Other),
    "TS" => Keyword::new(K::Other),
    "VFR" => Keyword::new(K::Other),
    "WIDESCREEN" => Keyword::new(K::Other),
    "WS" => Keyword::new(K::Other),

    // Release group
    "THORA" => Keyword::new(K::ReleaseGroup),

    // Release information
    "BATCH" => Keyword::new(K::ReleaseInformation),
    "COMPLETE" => Keyword::new(K::ReleaseInformation),
    "PATCH" => Keyword::new(K::ReleaseInformation),
    "REMUX" => Keyword::new(K::ReleaseInformation),
    // "The End of Evangelion", "Final Approach"
    "END" => Keyword::unidentifiable(K::ReleaseInformation),
    "FINAL" => Keyword::unidentifiable(K::ReleaseInformation),

    // Release version
    "V0" => Keyword::new(K::ReleaseVersion),
    "V1" => Keyword::new(K::ReleaseVersion),
    "V2" => Keyword::new(K::ReleaseVersion),
    "V3" => Keyword::new(K::ReleaseVersion),
    "V4" => Keyword::new(K::ReleaseVersion),

    // Source
    "BD" => Keyword::new(K::Source),
    "BDRIP" => Keyword::new(K::Source),
    "BLURAY" => Keyword::new(K::Source),
    "BLU-RAY" => Keyword::new(K::Source),
    "DVD" => Keyword::new(K::Source),
    "DVD5" => Keyword::new(K::Source),
    "DVD9" => Keyword::new(K::Source),
    "DVD-R2J" => Keyword::new(K::Source),
    "DVDRIP" => Keyword::new(K::Source),
    "DVD-RIP" => Keyword::new(K::Source),
    "R2DVD" => Keyword::new(K::Source),
    "R2J" => Keyword::new(K::Source),
    "R2JDVD" => Keyword::new(K::Source),
    "R2JDVDRIP" => Keyword::new(K::Source),
    "HDTV" => Keyword::new(K::Source),
    "HDTVRIP" => Keyword::new(K::Source),
    "TVRIP" => Keyword::new(K::Source),
    "TV-RIP" => Keyword::new(K::Source),
    "WEBCAST" => Keyword::new(K::Source),
    "WEBRIP" => Keyword::new(K::Source),

    // Subtitles
    "ASS" => Keyword::new(K::Subtitles),
    "BIG5" => Keyword::new(K::Subtitles),
    "DUB" => Keyword::new(K::Subtitles),
    "DUBBED" => Keyword::new(K::Subtitles),
    "HARDSUB" => Keyword::new(K::Subtitles),
    "HARDSUBS" => Keyword::new(K::Subtitles),
    "RAW" => Keyword::new(K::Subtitles),
    "SOFTSUB" => Keyword::new(K::Subtitles),
    "SOFTSUBS" => Keyword::new(K::Subtitles),
    "SUB" => Keyword::new(K::Subtitles),
    "SUBBED" => Keyword::new(K::Subtitles),
    "SUBTITLED" => Keyword::new(K::Subtitles),

    // Video frame rate, codec, format, quality
    "23.976FPS" => Keyword::new(K::VideoTerm),
    "24FPS" => Keyword::new(K::VideoTerm),
    "29.97FPS" => Keyword::new(K::VideoTerm),
    "30FPS" => Keyword::new(K::VideoTerm),
    "60FPS" => Keyword::new(K::VideoTerm),
    "120FPS" => Keyword::new(K::VideoTerm),
    "8BIT" => Keyword::new(K::VideoTerm),
    "8-BIT" => Keyword::new(K::VideoTerm),
    "10BIT" => Keyword::new(K::VideoTerm),
    "10BITS" => Keyword::new(K::VideoTerm),
    "10-BIT" => Keyword::new(K::VideoTerm),
    "10-BITS" => Keyword::new(K::VideoTerm),
    "HI10" => Keyword::new(K::VideoTerm),
    "HI10P" => Keyword::new(K::VideoTerm),
    "HI444" => Keyword::new(K::VideoTerm),
    "HI444P" => Keyword::new(K::VideoTerm),
    "HI444PP" => Keyword::new(K::VideoTerm),
    "H264" => Keyword::new(K::VideoTerm),
    "H265" => Keyword::new(K::VideoTerm),
    "H.264" => Keyword::new(K::VideoTerm),
    "H.265" => Keyword::new(K::VideoTerm),
    "X264" => Keyword::new(K::VideoTerm),
    "X265" => Keyword::new(K::VideoTerm),
    "X.264" => Keyword::new(K::VideoTerm),
    "AVC" => Keyword::new(K::VideoTerm),
    "HEVC" => Keyword::new(K::VideoTerm),
    "HEVC2" => Keyword::new(K::VideoTerm),
    "DIVX" => Keyword::new(K::VideoTerm),
    "DIVX5" => Keyword::new(K::VideoTerm),
    "DIVX6" => Keyword::new(K::VideoTerm),
    "XVID" => Keyword::new(K::VideoTerm),
    "AV1" => Keyword::new(K::VideoTerm),
    "AVI" => Keyword::new(K::VideoTerm),
    "RMVB" => Keyword::new(K::VideoTerm),
    "WMV" => Keyword::new(K::VideoTerm),
    "WMV3" => Keyword::new(K::VideoTerm),
    "WMV9" => Keyword::new(K::VideoTerm),
    "HQ" => Keyword::new(K::VideoTerm),
    "LQ" => Keyword::new(K::VideoTerm),
    "HD" => Keyword::new(K::VideoTerm),
    "SD" => Keyword::new(K::VideoTerm),

    // Volume prefix
    "VOL" => Keyword::new(K::VolumePrefix),
    "VOL." => Keyword::new(K::VolumePrefix),
    "VOLUME" => Keyword::new(K::VolumePrefix),
};

/// File extensions. Kept apart from [`KEYWORDS`] because several of them
/// (`AVI`, `AAC`, `TS`) also name in-filename terms.
pub static EXTENSIONS: phf::Map<&'static str, Keyword> = phf_map! {
    "3GP" => Keyword::new(K::FileExtension),
    "AVI" => Keyword::new(K::FileExtension),
    "DIVX" => Keyword::new(K::FileExtension),
    "FLV" => Keyword::new(K::FileExtension),
    "M2TS" => Keyword::new(K::FileExtension),
    "MKV" => Keyword::new(K::FileExtension),
    "MOV" => Keyword::new(K::FileExtension),
    "MP4" => Keyword::new(K::FileExtension),
    "MPG" => Keyword::new(K::FileExtension),
    "OGM" => Keyword::new(K::FileExtension),
    "RM" => Keyword::new(K::FileExtension),
    "RMVB" => Keyword::new(K::FileExtension),
    "TS" => Keyword::new(K::FileExtension),
    "WEBM" => Keyword::new(K::FileExtension),
    "WMV" => Keyword::new(K::FileExtension),
    "AAC" => Keyword::invalid(K::FileExtension),
    "AIFF" => Keyword::invalid(K::FileExtension),
    "FLAC" => Keyword::invalid(K::FileExtension),
    "M4A" => Keyword::invalid(K::FileExtension),
    "MP3" => Keyword::invalid(K::FileExtension),
    "MKA" => Keyword::invalid(K::FileExtension),
    "OGG" => Keyword::invalid(K::FileExtension),
    "WAV" => Keyword::invalid(K::FileExtension),
    "WMA" => Keyword::invalid(K::FileExtension),
    "7Z" => Keyword::invalid(K::FileExtension),
    "RAR" => Keyword::invalid(K::FileExtension),
    "ZIP" => Keyword::invalid(K::FileExtension),
    "ASS" => Keyword::invalid(K::FileExtension),
    "SRT" => Keyword::invalid(K::FileExtension),
};

/// Folds full-width ASCII to ASCII and upper-cases the result.
///
/// ```
/// use tanto_core::parser::keyword::normalize;
///
/// assert_eq!(normalize("Episode"), "EPISODE");
/// assert_eq!(normalize("ＯＶＡ"), "OVA");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .flat_map(char::to_uppercase)
        .collect()
}

/// Looks up a normalized word in the main table.
#[must_use]
pub fn lookup(normalized: &str) -> Option<&'static Keyword> {
    KEYWORDS.get(normalized)
}

/// Looks up a normalized extension.
#[must_use]
pub fn lookup_extension(normalized: &str) -> Option<&'static Keyword> {
    EXTENSIONS.get(normalized)
}

/// Returns `true` if `normalized` is a keyword of `kind`.
#[must_use]
pub fn find(kind: ElementKind, normalized: &str) -> bool {
    let table = if kind == ElementKind::FileExtension {
        &EXTENSIONS
    } else {
        &KEYWORDS
    };
    table
        .get(normalized)
        .is_some_and(|keyword| keyword.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_width() {
        assert_eq!(normalize("bluray"), "BLURAY");
        assert_eq!(normalize("Ｈ２６４"), "H264");
        assert_eq!(normalize("Episódio"), "EPISÓDIO");
    }

    #[test]
    fn lookup_returns_kind_and_flags() {
        let hit = lookup("OVA").unwrap();
        assert_eq!(hit.kind, ElementKind::AnimeType);
        assert!(!hit.flags.identifiable);
        assert!(hit.flags.searchable);

        let hit = lookup("SP").unwrap();
        assert!(!hit.flags.searchable);

        let hit = lookup("E").unwrap();
        assert_eq!(hit.kind, ElementKind::EpisodePrefix);
        assert!(!hit.flags.valid);

        assert!(lookup("SHOW").is_none());
    }

    #[test]
    fn extensions_are_a_separate_table() {
        assert_eq!(lookup("AVI").map(|k| k.kind), Some(ElementKind::VideoTerm));
        assert!(lookup("MKV").is_none());
        assert!(find(ElementKind::FileExtension, "MKV"));
        assert!(find(ElementKind::FileExtension, "AVI"));
        assert!(!find(ElementKind::VideoTerm, "MKV"));
        assert!(lookup_extension("SRT").is_some_and(|k| !k.flags.valid));
    }

    #[test]
    fn find_checks_the_category() {
        assert!(find(ElementKind::AnimeType, "MOVIE"));
        assert!(!find(ElementKind::AnimeType, "EP"));
        assert!(find(ElementKind::EpisodePrefix, "EP"));
        assert!(find(ElementKind::VolumePrefix, "VOL."));
    }
}

//! # Number Pattern Matchers
//!
//! Small recognizers for the surface forms episode and volume numbers take
//! inside a single token. Every matcher is a pure function: it inspects the
//! text and describes what it found, and the parser decides how to apply it.
//! Validation that only depends on the text (value bounds, `lower < upper`)
//! happens here so that a rejected candidate falls through to the next
//! matcher.

use regex::Regex;

use super::helpers::{
    find_number_in_string, is_numeric_str, is_valid_episode_number, is_valid_volume_number,
    to_int,
};
use super::keyword;
use crate::error::Result;
use crate::types::ElementKind;

/// Numbers recognized inside one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberMatch {
    /// A keyword glued to the number, such as `EP` in `EP05` or `OVA` in `OVA2`.
    pub prefix: Option<(ElementKind, String)>,
    pub seasons: Vec<String>,
    /// Episode or volume numbers, lower bound first.
    pub numbers: Vec<String>,
    pub versions: Vec<String>,
}

impl NumberMatch {
    fn number(number: &str) -> Self {
        Self {
            numbers: vec![number.to_string()],
            ..Self::default()
        }
    }
}

/// Pre-compiled regular expressions used by the matchers.
#[derive(Debug, Clone)]
pub struct Patterns {
    single_episode: Regex,
    multi_episode: Regex,
    season_and_episode: Regex,
    fractional_episode: Regex,
    number_sign: Regex,
    counter: Regex,
    single_volume: Regex,
    multi_volume: Regex,
}

impl Patterns {
    /// Compiles the matcher patterns.
    ///
    /// # Errors
    ///
    /// Returns `TantoError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            single_episode: Regex::new(r"^([0-9]{1,4})[vV]([0-9])$")?,
            multi_episode: Regex::new(
                r"^([0-9]{1,4})(?:[vV]([0-9]))?[-~&+]([0-9]{1,4})(?:[vV]([0-9]))?$",
            )?,
            season_and_episode: Regex::new(
                r"(?i)^S?([0-9]{1,2})(?:-S?([0-9]{1,2}))?(?:x|[ ._x-]?E)([0-9]{1,4})(?:-E?([0-9]{1,4}))?(?:v([0-9]))?$",
            )?,
            fractional_episode: Regex::new(r"^[0-9]+\.5$")?,
            number_sign: Regex::new(r"^#([0-9]{1,4})(?:[-~&+]([0-9]{1,4}))?(?:[vV]([0-9]))?$")?,
            counter: Regex::new(r"^([0-9]{1,4})\x{8A71}$")?,
            single_volume: Regex::new(r"^([0-9]{1,2})[vV]([0-9])$")?,
            multi_volume: Regex::new(r"^([0-9]{1,2})[-~&+]([0-9]{1,2})(?:[vV]([0-9]))?$")?,
        })
    }
}

/// Shared matcher signature.
pub type Matcher = fn(&Patterns, &str) -> Option<NumberMatch>;

/// Episode matchers in priority order.
pub const EPISODE_MATCHERS: [(&str, Matcher); 8] = [
    ("season_and_episode", match_season_and_episode),
    ("type_and_episode", match_type_and_episode),
    ("single_episode", match_single_episode),
    ("multi_episode", match_multi_episode),
    ("fractional_episode", match_fractional_episode),
    ("partial_episode", match_partial_episode),
    ("number_sign", match_number_sign),
    ("counter", match_counter),
];

/// Volume matchers in priority order.
pub const VOLUME_MATCHERS: [(&str, Matcher); 2] = [
    ("single_volume", match_single_volume),
    ("multi_volume", match_multi_volume),
];

/// Runs the episode matchers over `word`, returning the first hit and the
/// name of the matcher that produced it.
///
/// Plain numbers never match: every pattern needs a non-digit.
pub fn match_episode(patterns: &Patterns, word: &str) -> Option<(&'static str, NumberMatch)> {
    run(&EPISODE_MATCHERS, patterns, word)
}

/// Runs the volume matchers over `word`.
pub fn match_volume(patterns: &Patterns, word: &str) -> Option<(&'static str, NumberMatch)> {
    run(&VOLUME_MATCHERS, patterns, word)
}

fn run(
    matchers: &[(&'static str, Matcher)],
    patterns: &Patterns,
    word: &str,
) -> Option<(&'static str, NumberMatch)> {
    if is_numeric_str(word) {
        return None;
    }
    let word = word.trim_matches(|c: char| c == ' ' || c == '-');
    if word.is_empty() {
        return None;
    }
    matchers
        .iter()
        .find_map(|&(name, matcher)| matcher(patterns, word).map(|found| (name, found)))
}

/// Splits `EP05` into `("EP", "05")`. `None` when `word` starts with a digit
/// or holds none.
pub fn split_prefix(word: &str) -> Option<(&str, &str)> {
    match find_number_in_string(word)? {
        0 => None,
        offset => Some(word.split_at(offset)),
    }
}

fn capture(caps: &regex::Captures<'_>, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().to_string())
}

/// `S01E03`, `2x01`, `S01-02xE001-150`
fn match_season_and_episode(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.season_and_episode.captures(word)?;
    let season = to_int(caps.get(1)?.as_str());
    if season == 0 {
        return None;
    }

    let normalized = |index: usize| caps.get(index).map(|m| to_int(m.as_str()).to_string());
    Some(NumberMatch {
        prefix: None,
        seasons: [Some(season.to_string()), normalized(2)]
            .into_iter()
            .flatten()
            .collect(),
        numbers: [normalized(3), normalized(4)].into_iter().flatten().collect(),
        versions: capture(&caps, 5).into_iter().collect(),
    })
}

/// `OVA2`, `ED1`, `EP05`, `第5話`
fn match_type_and_episode(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let (prefix, number) = split_prefix(word)?;
    let normalized = keyword::normalize(prefix);
    let kind = [ElementKind::AnimeType, ElementKind::EpisodePrefix]
        .into_iter()
        .find(|&kind| keyword::find(kind, &normalized))?;

    let mut found = match match_episode(patterns, number) {
        Some((_, found)) => found,
        None if is_numeric_str(number) && is_valid_episode_number(number) => {
            NumberMatch::number(number)
        }
        None => return None,
    };
    found.prefix = Some((kind, prefix.to_string()));
    Some(found)
}

/// `01v2`
fn match_single_episode(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.single_episode.captures(word)?;
    Some(NumberMatch {
        numbers: capture(&caps, 1).into_iter().collect(),
        versions: capture(&caps, 2).into_iter().collect(),
        ..NumberMatch::default()
    })
}

/// `01-02`, `03-05v2`
fn match_multi_episode(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.multi_episode.captures(word)?;
    let lower = caps.get(1)?.as_str();
    let upper = caps.get(3)?.as_str();
    // "009-1", "5-2"
    if to_int(lower) >= to_int(upper) || !is_valid_episode_number(lower) {
        return None;
    }
    Some(NumberMatch {
        numbers: vec![lower.to_string(), upper.to_string()],
        versions: [capture(&caps, 2), capture(&caps, 4)]
            .into_iter()
            .flatten()
            .collect(),
        ..NumberMatch::default()
    })
}

/// `07.5`
fn match_fractional_episode(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    (patterns.fractional_episode.is_match(word) && is_valid_episode_number(word))
        .then(|| NumberMatch::number(word))
}

/// `4a`, `111C`
fn match_partial_episode(_patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let digits = word.bytes().take_while(|b| b.is_ascii_digit()).count();
    let suffix = &word[digits..];
    let valid_suffix = matches!(suffix.as_bytes(), [b'A'..=b'C' | b'a'..=b'c']);
    (digits > 0 && valid_suffix && is_valid_episode_number(word)).then(|| NumberMatch::number(word))
}

/// `#01`, `#02-03v2`
fn match_number_sign(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.number_sign.captures(word)?;
    let first = caps.get(1)?.as_str();
    if !is_valid_episode_number(first) {
        return None;
    }
    Some(NumberMatch {
        numbers: [Some(first.to_string()), capture(&caps, 2)]
            .into_iter()
            .flatten()
            .collect(),
        versions: capture(&caps, 3).into_iter().collect(),
        ..NumberMatch::default()
    })
}

/// `5話`
fn match_counter(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.counter.captures(word)?;
    Some(NumberMatch::number(caps.get(1)?.as_str()))
}

/// `01v2`
fn match_single_volume(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.single_volume.captures(word)?;
    Some(NumberMatch {
        numbers: capture(&caps, 1).into_iter().collect(),
        versions: capture(&caps, 2).into_iter().collect(),
        ..NumberMatch::default()
    })
}

/// `01-03`, `01-03v2`
fn match_multi_volume(patterns: &Patterns, word: &str) -> Option<NumberMatch> {
    let caps = patterns.multi_volume.captures(word)?;
    let lower = caps.get(1)?.as_str();
    let upper = caps.get(2)?.as_str();
    if to_int(lower) >= to_int(upper) || !is_valid_volume_number(lower) {
        return None;
    }
    Some(NumberMatch {
        numbers: vec![lower.to_string(), upper.to_string()],
        versions: capture(&caps, 3).into_iter().collect(),
        ..NumberMatch::default()
    })
}

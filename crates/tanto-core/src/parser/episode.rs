//! Episode and volume number search.
//!
//! The search is a fallback chain: pattern matchers over every candidate
//! first, then progressively weaker positional guesses over bare numbers.
//! The first stage that claims a number ends the chain.

use std::cmp::Ordering;

use tracing::trace;

use super::heuristic::{Parser, NOT_DELIMITER};
use super::helpers::{
    find_number_in_string, is_bare_resolution, is_numeric_str, is_valid_episode_number,
    is_valid_volume_number, to_int,
};
use super::keyword;
use super::matchers::{match_episode, match_volume, split_prefix, NumberMatch};
use crate::token::{find_next_token, find_previous_token, TokenKind};
use crate::types::ElementKind;

impl Parser<'_> {
    pub(super) fn search_for_episode_number(&mut self) {
        let mut candidates: Vec<usize> = (0..self.tokens.len())
            .filter(|&i| {
                let token = &self.tokens[i];
                token.kind() == TokenKind::Unknown && find_number_in_string(&token.value).is_some()
            })
            .collect();
        if candidates.is_empty() {
            return;
        }
        self.found_episode_keywords = self.elements.has(ElementKind::EpisodeNumber);
        trace!(candidates = candidates.len(), "searching for episode number");

        if self.search_for_episode_patterns(&candidates) {
            return;
        }
        if self.elements.has(ElementKind::EpisodeNumber) {
            return;
        }

        candidates.retain(|&i| {
            self.tokens[i].kind() == TokenKind::Unknown && is_numeric_str(&self.tokens[i].value)
        });
        if candidates.is_empty() {
            return;
        }

        if self.search_for_equivalent_numbers(&candidates) {
            return;
        }
        if self.search_for_separated_numbers(&candidates) {
            return;
        }

        // Numbers between brackets are left to the isolated-number pass.
        candidates.retain(|&i| !self.is_token_isolated(i));
        self.search_for_last_number(&candidates);
    }

    fn search_for_episode_patterns(&mut self, candidates: &[usize]) -> bool {
        let mut matched = false;
        for &i in candidates {
            if self.tokens[i].kind() != TokenKind::Unknown {
                continue;
            }
            let word = self.tokens[i].value.clone();

            if !word.starts_with(|c: char| c.is_ascii_digit()) {
                if self.number_comes_after_volume_prefix(i, &word) {
                    continue;
                }
            } else if self.number_comes_before_another_number(i) {
                matched = true;
                continue;
            }

            if let Some((name, found)) = match_episode(self.patterns, &word) {
                trace!(matcher = name, index = i, value = %word, "episode pattern");
                self.apply_episode_match(found, i);
                matched = true;
            }
        }
        matched
    }

    /// `Vol3`, `Vol.01-03`
    fn number_comes_after_volume_prefix(&mut self, index: usize, word: &str) -> bool {
        let Some((prefix, number)) = split_prefix(word) else {
            return false;
        };
        if !keyword::find(ElementKind::VolumePrefix, &keyword::normalize(prefix)) {
            return false;
        }

        match match_volume(self.patterns, number) {
            Some((name, found)) => {
                trace!(matcher = name, index, value = %word, "volume pattern");
                self.apply_volume_match(found, index);
            }
            None => {
                self.set_volume_number(number, index, false);
            }
        }
        self.elements.insert(ElementKind::VolumePrefix, prefix);
        true
    }

    /// `8 & 10`, `01 of 24`
    fn number_comes_before_another_number(&mut self, index: usize) -> bool {
        if !is_numeric_str(&self.tokens[index].value) {
            return false;
        }
        let Some(separator) = find_next_token(self.tokens, index, NOT_DELIMITER) else {
            return false;
        };
        if self.tokens[separator].kind() != TokenKind::Unknown {
            return false;
        }
        let keep_other = match self.tokens[separator].value.to_lowercase().as_str() {
            "&" => true,
            "of" => false,
            _ => return false,
        };
        let Some(other) = find_next_token(self.tokens, separator, NOT_DELIMITER) else {
            return false;
        };
        if self.tokens[other].kind() != TokenKind::Unknown
            || !is_numeric_str(&self.tokens[other].value)
        {
            return false;
        }

        let number = self.tokens[index].value.clone();
        self.set_episode_number(&number, index, false);
        if keep_other {
            let other_number = self.tokens[other].value.clone();
            self.set_episode_number(&other_number, other, false);
        }
        self.tokens[separator].set_kind(TokenKind::Identifier);
        self.tokens[other].set_kind(TokenKind::Identifier);
        true
    }

    /// `01 (176)`, `29 (04)`
    fn search_for_equivalent_numbers(&mut self, candidates: &[usize]) -> bool {
        for &i in candidates {
            if self.is_token_isolated(i) || !is_valid_episode_number(&self.tokens[i].value) {
                continue;
            }
            let Some(bracket) = find_next_token(self.tokens, i, NOT_DELIMITER)
                .filter(|&b| self.tokens[b].kind() == TokenKind::Bracket)
            else {
                continue;
            };
            let Some(other) = find_next_token(self.tokens, bracket, NOT_DELIMITER.enclosed())
                .filter(|&o| self.tokens[o].kind() == TokenKind::Unknown)
            else {
                continue;
            };
            let value = &self.tokens[other].value;
            if !self.is_token_isolated(other)
                || !is_numeric_str(value)
                || !is_valid_episode_number(value)
                || is_bare_resolution(to_int(value))
            {
                continue;
            }

            let (low, high) = if to_int(&self.tokens[i].value) <= to_int(value) {
                (i, other)
            } else {
                (other, i)
            };
            let episode = self.tokens[low].value.clone();
            let alternative = self.tokens[high].value.clone();
            trace!(episode = %episode, alternative = %alternative, "equivalent numbers");
            self.set_episode_number(&episode, low, false);
            self.elements.insert(ElementKind::EpisodeNumberAlt, alternative);
            self.tokens[high].set_kind(TokenKind::Identifier);
            return true;
        }
        false
    }

    /// `Title - 05`
    fn search_for_separated_numbers(&mut self, candidates: &[usize]) -> bool {
        for &i in candidates {
            if self.tokens[i].enclosed {
                continue;
            }
            let Some(dash) = find_previous_token(self.tokens, i, NOT_DELIMITER)
                .filter(|&p| self.tokens[p].kind() == TokenKind::Unknown && self.is_dash_token(p))
            else {
                continue;
            };
            let number = self.tokens[i].value.clone();
            if self.set_episode_number(&number, i, true) {
                trace!(index = i, value = %number, "separated number");
                self.tokens[dash].set_kind(TokenKind::Identifier);
                return true;
            }
        }
        false
    }

    fn search_for_last_number(&mut self, candidates: &[usize]) -> bool {
        for &i in candidates.iter().rev() {
            // The title comes first.
            if i == 0 || self.tokens[i].enclosed {
                continue;
            }
            if self.tokens[..i]
                .iter()
                .all(|t| t.enclosed || t.kind() == TokenKind::Delimiter)
            {
                continue;
            }
            // "Movie 2", "Part 2"
            if let Some(previous) = find_previous_token(self.tokens, i, NOT_DELIMITER) {
                let word = &self.tokens[previous].value;
                if word.eq_ignore_ascii_case("Movie") || word.eq_ignore_ascii_case("Part") {
                    continue;
                }
            }

            let number = self.tokens[i].value.clone();
            if self.set_episode_number(&number, i, true) {
                trace!(index = i, value = %number, "last number");
                return true;
            }
        }
        false
    }

    pub(super) fn apply_episode_match(&mut self, found: NumberMatch, index: usize) {
        let NumberMatch {
            prefix,
            seasons,
            numbers,
            versions,
        } = found;
        if let Some((kind, prefix)) = prefix {
            self.elements.insert(kind, prefix);
        }
        for season in seasons {
            self.season_from_pattern = true;
            self.elements.insert(ElementKind::AnimeSeason, season);
        }
        for number in &numbers {
            self.set_episode_number(number, index, false);
        }
        for version in versions {
            self.elements.insert(ElementKind::ReleaseVersion, version);
        }
        self.tokens[index].set_kind(TokenKind::Identifier);
    }

    pub(super) fn apply_volume_match(&mut self, found: NumberMatch, index: usize) {
        for number in &found.numbers {
            self.set_volume_number(number, index, false);
        }
        for version in found.versions {
            self.elements.insert(ElementKind::ReleaseVersion, version);
        }
        self.tokens[index].set_kind(TokenKind::Identifier);
    }

    /// Records an episode number and claims its token.
    ///
    /// When an episode number was already known before the search started,
    /// the larger of the two becomes `EpisodeNumberAlt` and an equal value is
    /// not stored again.
    pub(super) fn set_episode_number(&mut self, number: &str, index: usize, validate: bool) -> bool {
        if validate && !is_valid_episode_number(number) {
            return false;
        }
        self.tokens[index].set_kind(TokenKind::Identifier);

        let mut kind = ElementKind::EpisodeNumber;
        if self.found_episode_keywords {
            let existing = self
                .elements
                .iter_mut()
                .find(|e| e.kind == ElementKind::EpisodeNumber);
            if let Some(existing) = existing {
                match to_int(number).cmp(&to_int(&existing.value)) {
                    Ordering::Greater => kind = ElementKind::EpisodeNumberAlt,
                    Ordering::Less => existing.kind = ElementKind::EpisodeNumberAlt,
                    Ordering::Equal => return false,
                }
            }
        }

        self.elements.insert(kind, number);
        true
    }

    pub(super) fn set_volume_number(&mut self, number: &str, index: usize, validate: bool) -> bool {
        if validate && !is_valid_volume_number(number) {
            return false;
        }
        self.tokens[index].set_kind(TokenKind::Identifier);
        self.elements.insert(ElementKind::VolumeNumber, number);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::options::Options;
    use crate::parser::{Parser, Patterns, Tokenizer};
    use crate::types::{ElementKind, Elements};

    fn parse(input: &str) -> Elements {
        let options = Options::default();
        let patterns = Patterns::new().unwrap();
        let mut elements = Elements::new();
        let mut tokens = Tokenizer::new(&options).tokenize(input, &mut elements);
        Parser::new(&mut tokens, &mut elements, &options, &patterns).parse();
        elements
    }

    fn episodes(elements: &Elements) -> Vec<&str> {
        elements.get_all(ElementKind::EpisodeNumber)
    }

    #[test]
    fn season_and_episode_are_normalized() {
        let elements = parse("Show.Name.S02E07.720p");
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("2"));
        assert_eq!(episodes(&elements), ["7"]);
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name"));
    }

    #[test]
    fn keyword_number_and_pattern_number_become_alternatives() {
        let elements = parse("Show Episode 5 S01E06");
        assert_eq!(episodes(&elements), ["5"]);
        assert_eq!(elements.get_all(ElementKind::EpisodeNumberAlt), ["6"]);
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("1"));

        let elements = parse("Show Episode 7 S01E06");
        assert_eq!(episodes(&elements), ["6"]);
        assert_eq!(elements.get_all(ElementKind::EpisodeNumberAlt), ["7"]);
    }

    #[test]
    fn equal_keyword_and_pattern_numbers_are_stored_once() {
        let elements = parse("Show Episode 6 S01E06");
        assert_eq!(episodes(&elements), ["6"]);
        assert!(!elements.has(ElementKind::EpisodeNumberAlt));
    }

    #[test]
    fn ranges_keep_both_numbers_in_order() {
        let elements = parse("Title - 01-02");
        assert_eq!(episodes(&elements), ["01", "02"]);
    }

    #[test]
    fn prefixed_numbers() {
        let elements = parse("Show EP05 [720p]");
        assert_eq!(episodes(&elements), ["05"]);
        assert_eq!(elements.get_first(ElementKind::EpisodePrefix), Some("EP"));

        let elements = parse("Show OVA2");
        assert_eq!(episodes(&elements), ["2"]);
        assert_eq!(elements.get_first(ElementKind::AnimeType), Some("OVA"));
    }

    #[test]
    fn version_suffix() {
        let elements = parse("Show - 05v2");
        assert_eq!(episodes(&elements), ["05"]);
        assert_eq!(elements.get_first(ElementKind::ReleaseVersion), Some("2"));
    }

    #[test]
    fn glued_volume_prefix() {
        let elements = parse("Show Vol.1");
        assert_eq!(elements.get_first(ElementKind::VolumeNumber), Some("1"));
        assert!(!elements.has(ElementKind::EpisodeNumber));
    }

    #[test]
    fn number_before_another_number() {
        let elements = parse("Show 01 of 24");
        assert_eq!(episodes(&elements), ["01"]);

        let elements = parse("Show 8 & 10");
        assert_eq!(episodes(&elements), ["8", "10"]);
    }

    #[test]
    fn equivalent_numbers() {
        let elements = parse("Show 01 (176)");
        assert_eq!(episodes(&elements), ["01"]);
        assert_eq!(elements.get_first(ElementKind::EpisodeNumberAlt), Some("176"));

        let elements = parse("Show 176 (01)");
        assert_eq!(episodes(&elements), ["01"]);
        assert_eq!(elements.get_first(ElementKind::EpisodeNumberAlt), Some("176"));
    }

    #[test]
    fn last_number_skips_years() {
        let elements = parse("Show 12 2014");
        assert_eq!(episodes(&elements), ["12"]);
    }

    #[test]
    fn last_number_skips_movie_and_part() {
        let elements = parse("Show Movie 2");
        assert!(!elements.has(ElementKind::EpisodeNumber));

        let elements = parse("Show Part 2 - 03");
        assert_eq!(episodes(&elements), ["03"]);
    }

    #[test]
    fn keyword_number_and_later_number() {
        let elements = parse("Show Episode 5 - 6");
        assert_eq!(episodes(&elements), ["5"]);
    }

    #[test]
    fn years_are_never_episodes() {
        let elements = parse("Show - 2014");
        assert!(!elements.has(ElementKind::EpisodeNumber));
    }
}

//! # Multi-pass Heuristic Parser
//!
//! Runs the ordered extraction passes over a token sequence. Token
//! classification is the channel between passes: a pass only looks at
//! tokens earlier passes left `Unknown`, and claims what it consumes by
//! turning it into an `Identifier`.

use tracing::trace;

use super::helpers::{
    find_number_in_string, is_bare_resolution, is_crc32, is_dash_character, is_mostly_latin, is_numeric_str,
    is_resolution, is_valid_episode_number, is_year, number_from_ordinal, to_int, trim_dashes,
};
use super::keyword;
use super::matchers::{match_episode, match_volume, Patterns};
use crate::options::Options;
use crate::token::{find_next_token, find_previous_token, find_token, Category, Token, TokenFilter, TokenKind};
use crate::types::{ElementKind, Elements};

pub(super) const NOT_DELIMITER: TokenFilter = TokenFilter::category(Category::NotDelimiter);
pub(super) const UNKNOWN: TokenFilter = TokenFilter::category(Category::Unknown);
const BRACKET: TokenFilter = TokenFilter::category(Category::Bracket);
const IDENTIFIER: TokenFilter = TokenFilter::category(Category::Identifier);

/// Single-pass-per-call parser over a borrowed token sequence and element store.
///
/// The parser keeps no state across calls apart from two flags, which every
/// [`Parser::parse`] resets.
pub struct Parser<'a> {
    pub(super) tokens: &'a mut [Token],
    pub(super) elements: &'a mut Elements,
    pub(super) options: &'a Options,
    pub(super) patterns: &'a Patterns,
    /// An episode number was already known when the number search started.
    pub(super) found_episode_keywords: bool,
    /// A season was read from a combined token such as `S01E01`.
    pub(super) season_from_pattern: bool,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: &'a mut [Token],
        elements: &'a mut Elements,
        options: &'a Options,
        patterns: &'a Patterns,
    ) -> Self {
        Self {
            tokens,
            elements,
            options,
            patterns,
            found_episode_keywords: false,
            season_from_pattern: false,
        }
    }

    /// Runs every pass in order.
    ///
    /// Returns `false` only for an empty token sequence. A filename that
    /// yields no title or episode still parses successfully.
    pub fn parse(&mut self) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        self.found_episode_keywords = false;
        self.season_from_pattern = false;

        self.search_for_keywords();

        if self.options.parse_episode_number {
            self.search_for_episode_number();
        }

        self.search_for_anime_title();

        if self.options.parse_release_group && !self.elements.has(ElementKind::ReleaseGroup) {
            self.search_for_release_group();
        }

        if self.options.parse_episode_title && self.elements.has(ElementKind::EpisodeNumber) {
            self.search_for_episode_title();
        }

        self.search_for_isolated_numbers();
        self.validate_elements();
        true
    }

    pub(super) fn is_kind(&self, index: Option<usize>, kind: TokenKind) -> bool {
        index.is_some_and(|i| self.tokens[i].kind() == kind)
    }

    /// Both neighbours, skipping delimiters, are brackets.
    pub(super) fn is_token_isolated(&self, index: usize) -> bool {
        self.is_kind(find_previous_token(self.tokens, index, NOT_DELIMITER), TokenKind::Bracket)
            && self.is_kind(find_next_token(self.tokens, index, NOT_DELIMITER), TokenKind::Bracket)
    }

    pub(super) fn is_dash_token(&self, index: usize) -> bool {
        let mut chars = self.tokens[index].value.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if is_dash_character(c))
    }

    fn identify(&mut self, index: usize) {
        self.tokens[index].set_kind(TokenKind::Identifier);
    }

    // Pass 1

    fn search_for_keywords(&mut self) {
        trace!("searching for keywords");
        for i in 0..self.tokens.len() {
            if self.tokens[i].kind() != TokenKind::Unknown {
                continue;
            }
            let word = self.tokens[i]
                .value
                .trim_matches(|c: char| c == ' ' || c == '-')
                .to_string();
            if word.is_empty() {
                continue;
            }
            // A number can only be a checksum.
            if word.len() != 8 && is_numeric_str(&word) {
                continue;
            }

            let (kind, identifiable, value) =
                if !self.elements.has(ElementKind::FileChecksum) && is_crc32(&word) {
                    (ElementKind::FileChecksum, true, word)
                } else if let Some(hit) = keyword::lookup(&keyword::normalize(&word)) {
                    let kind = hit.kind;
                    if kind == ElementKind::ReleaseGroup && !self.options.parse_release_group {
                        continue;
                    }
                    if !kind.is_searchable() || !hit.flags.searchable {
                        continue;
                    }
                    if kind.is_singular() && self.elements.has(kind) {
                        continue;
                    }
                    match kind {
                        ElementKind::AnimeSeasonPrefix => {
                            self.check_anime_season_keyword(i, &word);
                            continue;
                        }
                        ElementKind::EpisodePrefix => {
                            if hit.flags.valid {
                                self.check_extent_keyword(ElementKind::EpisodeNumber, i, &word);
                            }
                            continue;
                        }
                        ElementKind::VolumePrefix => {
                            self.check_extent_keyword(ElementKind::VolumeNumber, i, &word);
                            continue;
                        }
                        ElementKind::ReleaseVersion => {
                            (kind, hit.flags.identifiable, word.chars().skip(1).collect())
                        }
                        _ => (kind, hit.flags.identifiable, word),
                    }
                } else if !self.elements.has(ElementKind::VideoResolution) && is_resolution(&word) {
                    (ElementKind::VideoResolution, true, word)
                } else {
                    continue;
                };

            trace!(index = i, kind = %kind, value = %value, "keyword");
            self.elements.insert(kind, value);
            if identifiable {
                self.identify(i);
            }
        }
    }

    /// `2nd Season`, `Season 2`
    fn check_anime_season_keyword(&mut self, index: usize, word: &str) -> bool {
        let previous = find_previous_token(self.tokens, index, NOT_DELIMITER)
            .filter(|&p| self.tokens[p].kind() == TokenKind::Unknown);
        if let Some(p) = previous {
            if let Some(number) = number_from_ordinal(&self.tokens[p].value) {
                self.set_anime_season(number, word, p, index);
                return true;
            }
        }

        let next = find_next_token(self.tokens, index, NOT_DELIMITER)
            .filter(|&n| self.tokens[n].kind() == TokenKind::Unknown);
        if let Some(n) = next {
            if is_numeric_str(&self.tokens[n].value) {
                let number = self.tokens[n].value.clone();
                self.set_anime_season(&number, word, index, n);
                return true;
            }
        }
        false
    }

    fn set_anime_season(&mut self, number: &str, prefix: &str, first: usize, second: usize) {
        trace!(season = number, "season keyword");
        self.elements.insert(ElementKind::AnimeSeason, number);
        self.elements.insert(ElementKind::AnimeSeasonPrefix, prefix);
        self.identify(first);
        self.identify(second);
    }

    /// `Episode 05`, `Vol 3`: the number after the prefix is taken as is.
    fn check_extent_keyword(&mut self, kind: ElementKind, index: usize, word: &str) -> bool {
        let Some(next) = find_next_token(self.tokens, index, NOT_DELIMITER) else {
            return false;
        };
        if self.tokens[next].kind() != TokenKind::Unknown
            || find_number_in_string(&self.tokens[next].value) != Some(0)
        {
            return false;
        }

        let number = self.tokens[next].value.clone();
        let prefix_kind = if kind == ElementKind::VolumeNumber {
            match match_volume(self.patterns, &number) {
                Some((_, found)) => self.apply_volume_match(found, next),
                None => {
                    self.set_volume_number(&number, next, false);
                }
            }
            ElementKind::VolumePrefix
        } else {
            match match_episode(self.patterns, &number) {
                Some((_, found)) => self.apply_episode_match(found, next),
                None => {
                    self.set_episode_number(&number, next, false);
                }
            }
            ElementKind::EpisodePrefix
        };

        self.elements.insert(prefix_kind, word);
        self.identify(index);
        true
    }

    // Pass 3

    fn search_for_anime_title(&mut self) {
        let Some((begin, enclosed_title)) = self.find_title_start() else {
            return;
        };

        // Up to an identifier, or a bracket when the title itself is enclosed.
        let stop = if enclosed_title {
            IDENTIFIER.or(Category::Bracket)
        } else {
            IDENTIFIER
        };
        let mut end = find_token(self.tokens, begin, stop).unwrap_or(self.tokens.len());

        if !enclosed_title {
            // An opening bracket without its pair ends the title.
            let mut last_bracket = end;
            let mut bracket_open = false;
            for i in begin..end {
                if self.tokens[i].kind() == TokenKind::Bracket {
                    last_bracket = i;
                    bracket_open = !bracket_open;
                }
            }
            if bracket_open {
                end = last_bracket;
            }

            // Trailing groups ("Title [Fansub]") are not part of the title,
            // parenthesized ones ("Title (TV)") are unless they hold a lone number.
            let mut cursor = find_previous_token(self.tokens, end, NOT_DELIMITER);
            while let Some(close) = cursor.filter(|&c| self.is_removable_trailing_group(c)) {
                match find_previous_token(self.tokens, close, BRACKET) {
                    Some(open) if open >= begin => {
                        end = open;
                        cursor = find_previous_token(self.tokens, open, NOT_DELIMITER);
                    }
                    _ => break,
                }
            }
        }

        trace!(begin, end, enclosed_title, "anime title");
        self.build_element(ElementKind::AnimeTitle, false, begin, end.max(begin));
    }

    fn find_title_start(&self) -> Option<(usize, bool)> {
        if let Some(begin) = find_token(self.tokens, 0, UNKNOWN.not_enclosed()) {
            return Some((begin, false));
        }

        // Everything is enclosed: skip the first group, presumed to be the
        // release group, and groups that are mostly non-Latin.
        let first = find_token(self.tokens, 0, UNKNOWN);
        let mut cursor = first;
        let mut skipped_previous_group = false;
        while let Some(candidate) = cursor {
            if skipped_previous_group && is_mostly_latin(&self.tokens[candidate].value) {
                return Some((candidate, true));
            }
            cursor = find_token(self.tokens, candidate, BRACKET)
                .and_then(|close| find_token(self.tokens, close, UNKNOWN));
            skipped_previous_group = true;
        }
        first.map(|begin| (begin, true))
    }

    fn is_removable_trailing_group(&self, close: usize) -> bool {
        let token = &self.tokens[close];
        if token.kind() != TokenKind::Bracket {
            return false;
        }
        if token.first_char() != Some(')') {
            return true;
        }
        let Some(open) = find_previous_token(self.tokens, close, BRACKET) else {
            return false;
        };
        let mut inner = (open + 1..close).filter(|&i| self.tokens[i].kind() != TokenKind::Delimiter);
        match (inner.next(), inner.next()) {
            (Some(only), None) => is_numeric_str(&self.tokens[only].value),
            _ => false,
        }
    }

    // Pass 4

    fn search_for_release_group(&mut self) {
        let groups = self.bracket_groups();
        let Some(&(first_open, _)) = groups.first() else {
            return;
        };
        let Some(&(_, last_close)) = groups.last() else {
            return;
        };

        let trailing = (find_previous_token(self.tokens, self.tokens.len(), NOT_DELIMITER)
            == Some(last_close))
        .then(|| groups.len() - 1);

        let mut leading = Vec::new();
        if find_token(self.tokens, 0, NOT_DELIMITER) == Some(first_open) {
            for (g, &(open, _)) in groups.iter().enumerate() {
                let adjacent = match g.checked_sub(1) {
                    None => true,
                    Some(previous) => {
                        find_next_token(self.tokens, groups[previous].1, NOT_DELIMITER) == Some(open)
                    }
                };
                if !adjacent {
                    break;
                }
                leading.push(g);
            }
        }

        let chosen = trailing
            .into_iter()
            .chain(leading)
            .find(|&g| self.is_release_group_candidate(groups[g]));

        if let Some(g) = chosen {
            let (open, close) = groups[g];
            trace!(open, close, "release group");
            self.build_element(ElementKind::ReleaseGroup, true, open + 1, close);
        }
    }

    /// Matched `(open, close)` bracket pairs, in order.
    fn bracket_groups(&self) -> Vec<(usize, usize)> {
        let brackets: Vec<usize> = (0..self.tokens.len())
            .filter(|&i| self.tokens[i].kind() == TokenKind::Bracket)
            .collect();
        brackets
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    fn is_release_group_candidate(&self, (open, close): (usize, usize)) -> bool {
        let inner: Vec<&Token> = self.tokens[open + 1..close]
            .iter()
            .filter(|token| token.kind() != TokenKind::Delimiter)
            .collect();
        match inner.as_slice() {
            [] => false,
            // Years and tags, not group names.
            [only] if is_numeric_str(&only.value) => false,
            tokens => tokens.iter().all(|token| token.kind() == TokenKind::Unknown),
        }
    }

    // Pass 5

    fn search_for_episode_title(&mut self) {
        let stop = BRACKET.or(Category::Identifier);
        let mut from = 0;
        loop {
            let Some(begin) = find_token(self.tokens, from, UNKNOWN.not_enclosed()) else {
                return;
            };
            let end = find_token(self.tokens, begin, stop).unwrap_or(self.tokens.len());
            if end - begin <= 2 && self.is_dash_token(begin) {
                from = end;
                continue;
            }
            trace!(begin, end, "episode title");
            self.build_element(ElementKind::EpisodeTitle, false, begin, end);
            return;
        }
    }

    // Pass 6

    fn search_for_isolated_numbers(&mut self) {
        for i in 0..self.tokens.len() {
            let token = &self.tokens[i];
            if token.kind() != TokenKind::Unknown
                || !token.enclosed
                || !is_numeric_str(&token.value)
                || !self.is_token_isolated(i)
            {
                continue;
            }
            let value = token.value.clone();
            let number = to_int(&value);

            if is_year(number) && !self.elements.has(ElementKind::AnimeYear) {
                trace!(index = i, year = %value, "isolated year");
                self.elements.insert(ElementKind::AnimeYear, value);
                self.identify(i);
                continue;
            }
            // Some groups drop the "p" suffix.
            if is_bare_resolution(number) && !self.elements.has(ElementKind::VideoResolution) {
                trace!(index = i, resolution = %value, "isolated resolution");
                self.elements.insert(ElementKind::VideoResolution, value);
                self.identify(i);
                continue;
            }
            if self.options.parse_episode_number
                && !self.elements.has(ElementKind::EpisodeNumber)
                && is_valid_episode_number(&value)
            {
                trace!(index = i, episode = %value, "isolated episode number");
                self.set_episode_number(&value, i, true);
            }
        }
    }

    // Pass 7

    fn validate_elements(&mut self) {
        let is_known_type =
            |value: &str| keyword::find(ElementKind::AnimeType, &keyword::normalize(value));
        self.elements
            .retain(|e| e.kind != ElementKind::AnimeType || is_known_type(&e.value));

        if let Some(episode_title) = self.elements.get_first(ElementKind::EpisodeTitle) {
            let episode_title = episode_title.to_string();
            let types: Vec<String> = self
                .elements
                .get_all(ElementKind::AnimeType)
                .into_iter()
                .map(str::to_string)
                .collect();
            for anime_type in types.iter().filter(|t| episode_title.contains(t.as_str())) {
                if anime_type.len() == episode_title.len() {
                    self.elements.remove(ElementKind::EpisodeTitle);
                } else {
                    self.elements
                        .retain(|e| e.kind != ElementKind::AnimeType || &e.value != anime_type);
                }
            }
        }

        // A season equal to the only episode number, with an episode keyword
        // and neither a season keyword nor a season+episode token behind it,
        // is the same number read twice.
        let same_number = match (
            self.elements.get_all(ElementKind::AnimeSeason).as_slice(),
            self.elements.get_all(ElementKind::EpisodeNumber).as_slice(),
        ) {
            ([season], [episode]) => to_int(season) == to_int(episode),
            _ => false,
        };
        if same_number
            && self.elements.has(ElementKind::EpisodePrefix)
            && !self.elements.has(ElementKind::AnimeSeasonPrefix)
            && !self.season_from_pattern
        {
            self.elements.remove(ElementKind::AnimeSeason);
        }

        let mut seen = Vec::new();
        self.elements.retain(|e| {
            if e.value.is_empty() || seen.contains(&(e.kind, e.value.clone())) {
                return false;
            }
            seen.push((e.kind, e.value.clone()));
            true
        });
    }

    /// Joins tokens `begin..end` into one element value.
    ///
    /// Unknown and bracket tokens contribute their text. Delimiters are kept
    /// literally with `keep_delimiters`; otherwise `,` and `&` survive and the
    /// rest become spaces, except at `begin`.
    pub(super) fn build_element(
        &mut self,
        kind: ElementKind,
        keep_delimiters: bool,
        begin: usize,
        end: usize,
    ) {
        let mut element = String::new();
        for i in begin..end {
            let token = &mut self.tokens[i];
            match token.kind() {
                TokenKind::Unknown => {
                    element.push_str(&token.value);
                    token.set_kind(TokenKind::Identifier);
                }
                TokenKind::Bracket => element.push_str(&token.value),
                TokenKind::Delimiter => {
                    let Some(delimiter) = token.first_char() else {
                        continue;
                    };
                    if keep_delimiters {
                        element.push(delimiter);
                    } else if i != begin {
                        element.push(match delimiter {
                            ',' | '&' => delimiter,
                            _ => ' ',
                        });
                    } else {
                        continue;
                    }
                    token.set_kind(TokenKind::Identifier);
                }
                TokenKind::Identifier | TokenKind::Invalid => {}
            }
        }

        let element = trim_dashes(&element);
        if !element.is_empty() {
            self.elements.insert(kind, element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Tokenizer;

    fn run(input: &str, options: &Options) -> (Elements, Vec<Token>) {
        let patterns = Patterns::new().unwrap();
        let mut elements = Elements::new();
        let mut tokens = Tokenizer::new(options).tokenize(input, &mut elements);
        let ok = Parser::new(&mut tokens, &mut elements, options, &patterns).parse();
        assert!(ok);
        (elements, tokens)
    }

    fn parse(input: &str) -> Elements {
        run(input, &Options::default()).0
    }

    #[test]
    fn empty_sequence_fails() {
        let patterns = Patterns::new().unwrap();
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens: Vec<Token> = Vec::new();
        assert!(!Parser::new(&mut tokens, &mut elements, &options, &patterns).parse());
    }

    #[test]
    fn keywords_are_identified() {
        let (elements, tokens) = run("Show - 01 [BD 1920x1080 FLAC]", &Options::default());
        assert_eq!(elements.get_first(ElementKind::Source), Some("BD"));
        assert_eq!(elements.get_first(ElementKind::VideoResolution), Some("1920x1080"));
        assert_eq!(elements.get_first(ElementKind::AudioTerm), Some("FLAC"));
        let flac = tokens.iter().find(|t| t.value == "FLAC").unwrap();
        assert_eq!(flac.kind(), TokenKind::Identifier);
    }

    #[test]
    fn unidentifiable_keywords_stay_in_the_title() {
        let elements = parse("Tokyo ESP - 01");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Tokyo ESP"));
        assert_eq!(elements.get_first(ElementKind::Language), Some("ESP"));
    }

    #[test]
    fn release_version_drops_the_v() {
        let elements = parse("[Group] Show - 01 v2");
        assert_eq!(elements.get_first(ElementKind::ReleaseVersion), Some("2"));
    }

    #[test]
    fn season_keywords() {
        let elements = parse("Show 2nd Season - 05");
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("2"));
        assert_eq!(elements.get_first(ElementKind::AnimeSeasonPrefix), Some("Season"));
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show"));

        let elements = parse("Show Season 3 - 05");
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("3"));
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("05"));
    }

    #[test]
    fn episode_and_volume_prefixes() {
        let elements = parse("Show Episode 12 [720p]");
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("12"));
        assert_eq!(elements.get_first(ElementKind::EpisodePrefix), Some("Episode"));
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show"));

        let elements = parse("Show Vol 3");
        assert_eq!(elements.get_first(ElementKind::VolumeNumber), Some("3"));
        assert_eq!(elements.get_first(ElementKind::VolumePrefix), Some("Vol"));
    }

    #[test]
    fn trailing_groups_leave_the_title() {
        let elements = parse("Show Name [Group]");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name"));
        assert_eq!(elements.get_first(ElementKind::ReleaseGroup), Some("Group"));

        let elements = parse("Show Name (TV) - 01");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name (TV)"));

        let elements = parse("Show Name (2014) - 01");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name"));
        assert_eq!(elements.get_first(ElementKind::AnimeYear), Some("2014"));
    }

    #[test]
    fn fully_enclosed_name_skips_first_group() {
        let elements = parse("[Group][Show Name][01]");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name"));
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("01"));

        let elements = parse("[Show Name]");
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show Name"));
    }

    #[test]
    fn release_group_keeps_delimiters() {
        let elements = parse("[Erai-raws] Show - 01");
        assert_eq!(elements.get_first(ElementKind::ReleaseGroup), Some("Erai-raws"));

        let elements = parse("[Some Group] Show - 01");
        assert_eq!(elements.get_first(ElementKind::ReleaseGroup), Some("Some Group"));
    }

    #[test]
    fn release_group_can_be_disabled() {
        let options = Options::default().with_release_group(false);
        let (elements, _) = run("[Group] Show - 01", &options);
        assert!(!elements.has(ElementKind::ReleaseGroup));
        assert_eq!(elements.get_first(ElementKind::AnimeTitle), Some("Show"));
    }

    #[test]
    fn episode_title_follows_the_number() {
        let elements = parse("Show - 05 - The Beginning [720p]");
        assert_eq!(elements.get_first(ElementKind::EpisodeTitle), Some("The Beginning"));

        let options = Options::default().with_episode_title(false);
        let (elements, _) = run("Show - 05 - The Beginning [720p]", &options);
        assert!(!elements.has(ElementKind::EpisodeTitle));
    }

    #[test]
    fn isolated_resolution_without_suffix() {
        let elements = parse("[Group] Show - 03 [720]");
        assert_eq!(elements.get_first(ElementKind::VideoResolution), Some("720"));
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("03"));
    }

    #[test]
    fn anime_type_equal_to_episode_title_invalidates_it() {
        let elements = parse("Show - 01 - OVA");
        assert!(!elements.has(ElementKind::EpisodeTitle));
        assert_eq!(elements.get_first(ElementKind::AnimeType), Some("OVA"));
    }

    #[test]
    fn anime_type_inside_longer_episode_title_is_dropped() {
        let elements = parse("Show - 01 - Movie Night");
        assert_eq!(elements.get_first(ElementKind::EpisodeTitle), Some("Movie Night"));
        assert!(!elements.has(ElementKind::AnimeType));
    }

    #[test]
    fn build_element_normalizes_delimiters() {
        let elements = parse("Tom_&_Jerry,_The_Movie_-_01");
        assert_eq!(
            elements.get_first(ElementKind::AnimeTitle),
            Some("Tom & Jerry, The Movie")
        );
    }

    fn isolated_number_tokens(enclosed: bool) -> Vec<Token> {
        vec![
            Token::new(TokenKind::Bracket, "[", false),
            Token::new(TokenKind::Unknown, "Group", true),
            Token::new(TokenKind::Bracket, "]", true),
            Token::new(TokenKind::Delimiter, " ", false),
            Token::new(TokenKind::Unknown, "2014", enclosed),
            Token::new(TokenKind::Delimiter, " ", false),
            Token::new(TokenKind::Bracket, "[", false),
            Token::new(TokenKind::Identifier, "720p", true),
            Token::new(TokenKind::Bracket, "]", true),
        ]
    }

    #[test]
    fn isolated_numbers_must_be_enclosed() {
        let patterns = Patterns::new().unwrap();
        let options = Options::default();

        let mut elements = Elements::new();
        let mut tokens = isolated_number_tokens(false);
        Parser::new(&mut tokens, &mut elements, &options, &patterns).search_for_isolated_numbers();
        assert!(!elements.has(ElementKind::AnimeYear));
        assert_eq!(tokens[4].kind(), TokenKind::Unknown);

        let mut elements = Elements::new();
        let mut tokens = isolated_number_tokens(true);
        Parser::new(&mut tokens, &mut elements, &options, &patterns).search_for_isolated_numbers();
        assert_eq!(elements.get_first(ElementKind::AnimeYear), Some("2014"));
        assert_eq!(tokens[4].kind(), TokenKind::Identifier);
    }

    fn validate(elements: &mut Elements) {
        let patterns = Patterns::new().unwrap();
        let options = Options::default();
        let mut tokens = Tokenizer::new(&options).tokenize("Show", &mut Elements::new());
        Parser::new(&mut tokens, elements, &options, &patterns).validate_elements();
    }

    #[test]
    fn validation_drops_empty_and_duplicate_values() {
        let mut elements = Elements::new();
        elements.insert(ElementKind::Language, "ENG");
        elements.insert(ElementKind::Other, "");
        elements.insert(ElementKind::AudioTerm, "AAC");
        elements.insert(ElementKind::Language, "ENG");
        elements.insert(ElementKind::AudioTerm, "FLAC");
        validate(&mut elements);

        assert_eq!(elements.get_all(ElementKind::Language), ["ENG"]);
        assert_eq!(elements.get_all(ElementKind::AudioTerm), ["AAC", "FLAC"]);
        assert!(!elements.has(ElementKind::Other));
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn season_read_twice_is_dropped() {
        let mut elements = Elements::new();
        elements.insert(ElementKind::AnimeSeason, "1");
        elements.insert(ElementKind::EpisodeNumber, "01");
        elements.insert(ElementKind::EpisodePrefix, "Episode");
        validate(&mut elements);
        assert!(!elements.has(ElementKind::AnimeSeason));
        assert_eq!(elements.get_first(ElementKind::EpisodeNumber), Some("01"));

        // A season keyword backs the season.
        let mut elements = Elements::new();
        elements.insert(ElementKind::AnimeSeason, "1");
        elements.insert(ElementKind::AnimeSeasonPrefix, "Season");
        elements.insert(ElementKind::EpisodeNumber, "1");
        elements.insert(ElementKind::EpisodePrefix, "Episode");
        validate(&mut elements);
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("1"));
    }

    #[test]
    fn season_from_combined_token_survives_validation() {
        let elements = parse("Show S01E01 Episode 1");
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("1"));
        assert_eq!(elements.get_all(ElementKind::EpisodeNumber), ["1"]);
        assert_eq!(elements.get_first(ElementKind::EpisodePrefix), Some("Episode"));

        let elements = parse("Show.S01E01.Episode.1.720p");
        assert_eq!(elements.get_first(ElementKind::AnimeSeason), Some("1"));
    }

    #[test]
    fn classification_is_monotonic() {
        let (_, tokens) = run("[Group] Show - 05 [ABCD1234]", &Options::default());
        for token in &tokens {
            assert_ne!(token.kind(), TokenKind::Invalid);
        }
        let crc = tokens.iter().find(|t| t.value == "ABCD1234").unwrap();
        assert_eq!(crc.kind(), TokenKind::Identifier);
    }
}

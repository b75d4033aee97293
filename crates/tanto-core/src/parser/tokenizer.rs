//! # Tokenizer
//!
//! Splits a filename into bracket, delimiter, identifier and unknown tokens.
//! Splitting happens in three layers: bracket groups, then a few
//! pre-identified keywords that contain delimiter characters, then the
//! configured delimiters.

use tracing::trace;

use super::helpers::is_numeric_str;
use crate::options::Options;
use crate::token::{find_next_token, find_previous_token, Category, Token, TokenFilter, TokenKind};
use crate::types::{ElementKind, Elements};

/// Opening and closing bracket pairs.
const BRACKETS: [(char, char); 7] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('\u{300C}', '\u{300D}'), // 「」
    ('\u{300E}', '\u{300F}'), // 『』
    ('\u{3010}', '\u{3011}'), // 【】
    ('\u{FF08}', '\u{FF09}'), // （）
];

/// Keywords that would otherwise be torn apart by delimiters. Matched
/// case-sensitively, first occurrence only.
const PREIDENTIFIED: [(ElementKind, &str); 9] = [
    (ElementKind::AudioTerm, "Dual Audio"),
    (ElementKind::VideoTerm, "H264"),
    (ElementKind::VideoTerm, "H.264"),
    (ElementKind::VideoTerm, "h264"),
    (ElementKind::VideoTerm, "h.264"),
    (ElementKind::VideoResolution, "480p"),
    (ElementKind::VideoResolution, "720p"),
    (ElementKind::VideoResolution, "1080p"),
    (ElementKind::Source, "Blu-Ray"),
];

fn closing_bracket(c: char) -> Option<char> {
    BRACKETS
        .iter()
        .find(|(open, _)| *open == c)
        .map(|(_, close)| *close)
}

/// Tokenizer for anime filenames.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    options: &'a Options,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer splitting on `options.allowed_delimiters`.
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Tokenize a filename whose extension and ignored strings are already
    /// removed.
    ///
    /// Pre-identified keywords are inserted into `elements` as they are
    /// found. An empty result means the input is unparsable.
    ///
    /// # Examples
    /// ```
    /// use tanto_core::{Elements, Options, TokenKind};
    /// use tanto_core::parser::Tokenizer;
    ///
    /// let options = Options::default();
    /// let mut elements = Elements::new();
    /// let tokens = Tokenizer::new(&options).tokenize("[Group] Show_01", &mut elements);
    ///
    /// assert_eq!(tokens[1].value, "Group");
    /// assert!(tokens[1].enclosed);
    /// assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::Unknown));
    /// ```
    pub fn tokenize(&self, filename: &str, elements: &mut Elements) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(32);
        self.tokenize_by_brackets(filename, elements, &mut tokens);
        validate_delimiter_tokens(&mut tokens);
        trace!(count = tokens.len(), "tokenized");
        tokens
    }

    fn tokenize_by_brackets(&self, filename: &str, elements: &mut Elements, tokens: &mut Vec<Token>) {
        let mut start = 0;
        let mut closing: Option<char> = None;

        loop {
            let rest = &filename[start..];
            let enclosed = closing.is_some();
            // Once a group is open only its own closer ends it.
            let found = match closing {
                None => rest
                    .char_indices()
                    .find_map(|(i, c)| closing_bracket(c).map(|close| (i, c, Some(close)))),
                Some(close) => rest
                    .char_indices()
                    .find(|&(_, c)| c == close)
                    .map(|(i, c)| (i, c, None)),
            };

            let Some((offset, bracket, next_closing)) = found else {
                if !rest.is_empty() {
                    self.tokenize_by_preidentified(rest, enclosed, elements, tokens);
                }
                break;
            };

            if offset > 0 {
                self.tokenize_by_preidentified(&rest[..offset], enclosed, elements, tokens);
            }
            tokens.push(Token::new(TokenKind::Bracket, bracket.to_string(), true));
            closing = next_closing;
            start += offset + bracket.len_utf8();
        }
    }

    fn tokenize_by_preidentified(
        &self,
        text: &str,
        enclosed: bool,
        elements: &mut Elements,
        tokens: &mut Vec<Token>,
    ) {
        let mut found: Vec<(usize, &str)> = Vec::new();
        for (kind, keyword) in PREIDENTIFIED {
            if let Some(offset) = text.find(keyword) {
                elements.insert(kind, keyword);
                found.push((offset, keyword));
            }
        }
        found.sort_by_key(|&(offset, _)| offset);

        let mut cursor = 0;
        for (offset, keyword) in found {
            if offset < cursor {
                continue;
            }
            if offset > cursor {
                self.tokenize_by_delimiters(&text[cursor..offset], enclosed, tokens);
            }
            tokens.push(Token::new(TokenKind::Identifier, keyword, enclosed));
            cursor = offset + keyword.len();
        }

        if cursor < text.len() {
            self.tokenize_by_delimiters(&text[cursor..], enclosed, tokens);
        }
    }

    fn tokenize_by_delimiters(&self, text: &str, enclosed: bool, tokens: &mut Vec<Token>) {
        let mut start = 0;
        for (i, c) in text.char_indices() {
            if !self.options.is_delimiter(c) {
                continue;
            }
            if i > start {
                tokens.push(Token::new(TokenKind::Unknown, &text[start..i], enclosed));
            }
            tokens.push(Token::new(TokenKind::Delimiter, c.to_string(), enclosed));
            start = i + c.len_utf8();
        }
        if start < text.len() {
            tokens.push(Token::new(TokenKind::Unknown, &text[start..], enclosed));
        }
    }
}

fn is_kind(tokens: &[Token], index: Option<usize>, kind: TokenKind) -> bool {
    index.is_some_and(|i| tokens[i].kind() == kind)
}

fn is_single_character(token: &Token) -> bool {
    let mut chars = token.value.chars();
    token.kind() == TokenKind::Unknown
        && matches!((chars.next(), chars.next()), (Some(c), None) if c != '-')
}

/// Moves the text of `from` onto `to` and invalidates `from`.
fn append_token(tokens: &mut [Token], from: usize, to: usize) {
    let text = std::mem::take(&mut tokens[from].value);
    tokens[to].value.push_str(&text);
    tokens[from].set_kind(TokenKind::Invalid);
}

/// Repairs splits that tore apart words, numbers and keywords, then drops
/// the merged-away tokens.
fn validate_delimiter_tokens(tokens: &mut Vec<Token>) {
    let valid = TokenFilter::category(Category::Valid);

    for i in 0..tokens.len() {
        if tokens[i].kind() != TokenKind::Delimiter {
            continue;
        }
        let Some(delimiter) = tokens[i].first_char() else {
            continue;
        };
        let prev = find_previous_token(tokens, i, valid);
        let mut next = find_next_token(tokens, i, valid);

        // Single characters: "07.5", "A.B.C"
        if delimiter != ' ' && delimiter != '_' {
            if let Some(p) = prev.filter(|&p| is_single_character(&tokens[p])) {
                append_token(tokens, i, p);
                while let Some(n) = next.filter(|&n| tokens[n].kind() == TokenKind::Unknown) {
                    append_token(tokens, n, p);
                    next = find_next_token(tokens, n, valid);
                    if let Some(d) = next.filter(|&d| {
                        tokens[d].kind() == TokenKind::Delimiter
                            && tokens[d].first_char() == Some(delimiter)
                    }) {
                        append_token(tokens, d, p);
                        next = find_next_token(tokens, d, valid);
                    }
                }
                continue;
            }
            if let (Some(p), Some(n)) = (prev, next) {
                if tokens[p].kind() == TokenKind::Unknown && is_single_character(&tokens[n]) {
                    append_token(tokens, i, p);
                    append_token(tokens, n, p);
                    continue;
                }
            }
        }

        // Adjacent delimiters
        let next_delimiter = next
            .filter(|&n| tokens[n].kind() == TokenKind::Delimiter)
            .and_then(|n| tokens[n].first_char());
        let prev_delimiter = prev
            .filter(|&p| tokens[p].kind() == TokenKind::Delimiter)
            .and_then(|p| tokens[p].first_char());

        if is_kind(tokens, prev, TokenKind::Unknown) {
            if let (Some(p), Some(nd)) = (prev, next_delimiter) {
                // "Ep. 01"
                if delimiter != nd && delimiter != ',' && (nd == ' ' || nd == '_') {
                    append_token(tokens, i, p);
                }
            }
        } else if let (Some(pd), Some(nd)) = (prev_delimiter, next_delimiter) {
            // "&" in "_&_"
            if pd == nd && pd != delimiter {
                tokens[i].set_kind(TokenKind::Unknown);
            }
        }

        // "01+02"
        if matches!(delimiter, '&' | '+') {
            if let (Some(p), Some(n)) = (prev, next) {
                if is_kind(tokens, prev, TokenKind::Unknown)
                    && is_kind(tokens, next, TokenKind::Unknown)
                    && is_numeric_str(&tokens[p].value)
                    && is_numeric_str(&tokens[n].value)
                {
                    append_token(tokens, i, p);
                    append_token(tokens, n, p);
                }
            }
        }
    }

    tokens.retain(|token| token.kind() != TokenKind::Invalid);
}

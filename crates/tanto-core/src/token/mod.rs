//! # Token Model
//!
//! Classified substrings of a filename, as produced by the
//! [`Tokenizer`](crate::parser::Tokenizer) and refined by the
//! [`Parser`](crate::parser::Parser) passes.

pub mod query;

pub use query::{
    find_next_token, find_previous_token, find_token, Category, Enclosure, TokenFilter,
};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a token.
///
/// `Unknown` tokens are still up for grabs. Passes move them to
/// `Identifier` once consumed or to `Invalid` once judged unusable, and
/// never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Unknown,
    Bracket,
    Delimiter,
    Identifier,
    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Bracket => write!(f, "bracket"),
            Self::Delimiter => write!(f, "delimiter"),
            Self::Identifier => write!(f, "identifier"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

/// A token extracted from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text, exactly as it appears in the filename.
    pub value: String,
    kind: TokenKind,
    /// Whether the token lies inside a matched bracket pair.
    pub enclosed: bool,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, value: impl Into<String>, enclosed: bool) -> Self {
        Self {
            value: value.into(),
            kind,
            enclosed,
        }
    }

    /// The current classification.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Reclassifies the token.
    ///
    /// Returns `false` (and leaves the token untouched) for a transition back
    /// to `Unknown` from `Identifier` or `Invalid`.
    pub fn set_kind(&mut self, kind: TokenKind) -> bool {
        if kind == TokenKind::Unknown
            && matches!(self.kind, TokenKind::Identifier | TokenKind::Invalid)
        {
            return false;
        }
        self.kind = kind;
        true
    }

    /// First character of the token, used for delimiter and bracket tokens.
    #[must_use]
    pub fn first_char(&self) -> Option<char> {
        self.value.chars().next()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}", self.kind, self.value)?;
        if self.enclosed {
            write!(f, ", enclosed")?;
        }
        write!(f, ")")
    }
}

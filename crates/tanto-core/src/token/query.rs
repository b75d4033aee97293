//! Predicate search over a token sequence.
//!
//! A [`TokenFilter`] combines an enclosure requirement with up to two
//! category rules. Both groups must hold; within the category group any
//! rule may match.

use super::{Token, TokenKind};

/// Enclosure requirement of a [`TokenFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enclosure {
    #[default]
    Any,
    Enclosed,
    NotEnclosed,
}

/// Category rule of a [`TokenFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bracket,
    NotBracket,
    Delimiter,
    NotDelimiter,
    Identifier,
    NotIdentifier,
    Unknown,
    NotUnknown,
    /// Any kind but `Invalid`.
    Valid,
    Invalid,
}

impl Category {
    fn matches(self, kind: TokenKind) -> bool {
        match self {
            Self::Bracket => kind == TokenKind::Bracket,
            Self::NotBracket => kind != TokenKind::Bracket,
            Self::Delimiter => kind == TokenKind::Delimiter,
            Self::NotDelimiter => kind != TokenKind::Delimiter,
            Self::Identifier => kind == TokenKind::Identifier,
            Self::NotIdentifier => kind != TokenKind::Identifier,
            Self::Unknown => kind == TokenKind::Unknown,
            Self::NotUnknown => kind != TokenKind::Unknown,
            Self::Valid => kind != TokenKind::Invalid,
            Self::Invalid => kind == TokenKind::Invalid,
        }
    }
}

/// Structured token predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFilter {
    enclosure: Enclosure,
    categories: [Option<Category>; 2],
}

impl TokenFilter {
    /// Matches every token.
    pub const ANY: Self = Self {
        enclosure: Enclosure::Any,
        categories: [None, None],
    };

    /// A filter with a single category rule.
    #[must_use]
    pub const fn category(category: Category) -> Self {
        Self {
            enclosure: Enclosure::Any,
            categories: [Some(category), None],
        }
    }

    /// Accepts tokens satisfying this filter's category rule or `category`.
    #[must_use]
    pub const fn or(mut self, category: Category) -> Self {
        if self.categories[0].is_none() {
            self.categories[0] = Some(category);
        } else {
            self.categories[1] = Some(category);
        }
        self
    }

    /// Requires the token to be enclosed.
    #[must_use]
    pub const fn enclosed(mut self) -> Self {
        self.enclosure = Enclosure::Enclosed;
        self
    }

    /// Requires the token not to be enclosed.
    #[must_use]
    pub const fn not_enclosed(mut self) -> Self {
        self.enclosure = Enclosure::NotEnclosed;
        self
    }

    /// Returns `true` if `token` satisfies the filter.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        let enclosure_ok = match self.enclosure {
            Enclosure::Any => true,
            Enclosure::Enclosed => token.enclosed,
            Enclosure::NotEnclosed => !token.enclosed,
        };
        if !enclosure_ok {
            return false;
        }

        match self.categories {
            [None, None] => true,
            rules => rules
                .iter()
                .flatten()
                .any(|category| category.matches(token.kind())),
        }
    }
}

/// Finds the first token at or after `from` that satisfies `filter`.
pub fn find_token(tokens: &[Token], from: usize, filter: TokenFilter) -> Option<usize> {
    tokens
        .get(from..)?
        .iter()
        .position(|token| filter.matches(token))
        .map(|offset| from + offset)
}

/// Finds the nearest token strictly before `position` that satisfies `filter`.
///
/// `position` may equal `tokens.len()` to search from the end.
pub fn find_previous_token(
    tokens: &[Token],
    position: usize,
    filter: TokenFilter,
) -> Option<usize> {
    let end = position.min(tokens.len());
    tokens[..end].iter().rposition(|token| filter.matches(token))
}

/// Finds the nearest token strictly after `position` that satisfies `filter`.
pub fn find_next_token(tokens: &[Token], position: usize, filter: TokenFilter) -> Option<usize> {
    find_token(tokens, position.checked_add(1)?, filter)
}

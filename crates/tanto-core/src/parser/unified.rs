//! # Parsing Entry Point
//!
//! Strips the extension and ignored strings, lexes, then hands the token
//! sequence to the multi-pass [`Parser`](super::Parser).

use std::sync::LazyLock;

use tracing::debug;

use super::heuristic::Parser;
use super::keyword;
use super::matchers::Patterns;
use super::tokenizer::Tokenizer;
use crate::error::{Result, TantoError};
use crate::options::Options;
use crate::types::{ElementKind, ParseResult};

/// Longest suffix treated as a file extension.
const EXTENSION_MAX_LEN: usize = 4;

/// Shared parser behind [`parse`], compiled on first use.
static DEFAULT_TANTO: LazyLock<Result<Tanto>> = LazyLock::new(Tanto::with_defaults);

/// Reusable parser holding validated options and compiled patterns.
///
/// `Tanto` is immutable once built and can be shared between threads; each
/// call to [`Tanto::parse`] owns its own token and element storage.
#[derive(Debug, Clone)]
pub struct Tanto {
    options: Options,
    patterns: Patterns,
}

impl Tanto {
    /// Create a parser with the given options.
    ///
    /// # Errors
    ///
    /// Returns `TantoError::InvalidOptions` if an allowed delimiter is
    /// alphanumeric.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            patterns: Patterns::new()?,
        })
    }

    /// Create a parser with default options.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Options::default())
    }

    /// Get the parser options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse a filename.
    ///
    /// A name that yields no title or episode is still a successful parse;
    /// check [`ParseResult::has_title`] when a title is required.
    ///
    /// # Errors
    ///
    /// Returns `TantoError::EmptyInput` when nothing is left after removing
    /// the extension and ignored strings, and `TantoError::NoTokens` when the
    /// lexer produces no tokens.
    ///
    /// # Examples
    /// ```
    /// use tanto_core::parser::Tanto;
    ///
    /// let tanto = Tanto::with_defaults().unwrap();
    /// let result = tanto.parse("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv").unwrap();
    ///
    /// assert_eq!(result.anime_title(), Some("Jujutsu Kaisen"));
    /// assert_eq!(result.release_group(), Some("SubsPlease"));
    /// assert_eq!(result.episode_number(), Some("24"));
    /// ```
    pub fn parse(&self, filename: &str) -> Result<ParseResult> {
        debug!(filename, "parsing");
        let mut result = ParseResult::new(filename);
        let elements = &mut result.elements;

        let mut name = filename;
        if self.options.parse_file_extension {
            if let Some((stem, extension)) = split_extension(filename) {
                elements.insert(ElementKind::FileExtension, extension);
                name = stem;
            }
        }

        let mut name = name.to_string();
        for ignored in self.options.ignored_strings.iter().filter(|s| !s.is_empty()) {
            name = name.replace(ignored.as_str(), "");
        }
        if name.is_empty() {
            return Err(TantoError::EmptyInput);
        }
        elements.insert(ElementKind::FileName, name.as_str());

        let mut tokens = Tokenizer::new(&self.options).tokenize(&name, elements);
        if tokens.is_empty() {
            return Err(TantoError::NoTokens {
                input: filename.to_string(),
            });
        }

        Parser::new(&mut tokens, elements, &self.options, &self.patterns).parse();
        result.tokens = tokens;

        debug!(
            filename,
            elements = result.elements.len(),
            tokens = result.tokens.len(),
            "parsed"
        );
        Ok(result)
    }
}

/// Splits `name.mkv` into `("name", "mkv")` when the suffix is a known
/// extension of at most four alphanumeric characters.
fn split_extension(filename: &str) -> Option<(&str, &str)> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if extension.is_empty()
        || extension.chars().count() > EXTENSION_MAX_LEN
        || !extension.chars().all(char::is_alphanumeric)
    {
        return None;
    }
    keyword::lookup_extension(&keyword::normalize(extension)).map(|_| (stem, extension))
}

/// Convenience function to parse a filename with default options.
///
/// Reuses one lazily built [`Tanto`]; build your own to parse with other options.
pub fn parse(filename: &str) -> Result<ParseResult> {
    DEFAULT_TANTO.as_ref().map_err(Clone::clone)?.parse(filename)
}

/// Parse with specific options.
pub fn parse_with_options(filename: &str, options: Options) -> Result<ParseResult> {
    Tanto::new(options)?.parse(filename)
}

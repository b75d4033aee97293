//! # Tanto Core
//!
//! Heuristic metadata extraction for anime release filenames. A filename is
//! lexed into bracket, delimiter and text tokens, then a fixed sequence of
//! passes classifies those tokens into typed elements: title, episode,
//! season, release group, resolution, checksum and friends.
//!
//! ## Quick Start
//!
//! ```rust
//! use tanto_core::{parse, ElementKind};
//!
//! let result = parse("[Group] Show Name - 05 [1080p].mkv").unwrap();
//!
//! assert_eq!(result.anime_title(), Some("Show Name"));
//! assert_eq!(result.episode_number(), Some("05"));
//! assert_eq!(result.get(ElementKind::VideoResolution), Some("1080p"));
//! assert_eq!(result.release_group(), Some("Group"));
//! assert_eq!(result.file_extension(), Some("mkv"));
//! ```
pub mod error;
pub mod options;
pub mod parser;
pub mod token;
pub mod types;

// Re-export primary API
pub use error::{Result, TantoError};
pub use options::Options;
pub use parser::{parse, parse_with_options, Parser, Tanto, Tokenizer};
pub use token::{Category, Token, TokenFilter, TokenKind};
pub use types::{Element, ElementKind, Elements, ParseResult};

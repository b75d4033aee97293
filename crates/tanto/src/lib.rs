//! # Tanto
//!
//! Rule-based metadata extraction for anime release filenames.
//!
//! This crate re-exports [`tanto_core`]; see its documentation for the
//! parsing model.
//!
//! ```rust
//! let result = tanto::parse("[Group] Title - 01-02.mkv").unwrap();
//!
//! assert_eq!(result.anime_title(), Some("Title"));
//! assert_eq!(result.episode_numbers(), ["01", "02"]);
//! ```
pub use tanto_core::*;

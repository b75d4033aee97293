pub mod episode;
pub mod helpers;
pub mod heuristic;
pub mod keyword;
pub mod matchers;
pub mod tokenizer;
pub mod unified;

pub use heuristic::Parser;
pub use keyword::{Keyword, KeywordFlags};
pub use matchers::{NumberMatch, Patterns};
pub use tokenizer::Tokenizer;
pub use unified::{parse, parse_with_options, Tanto};

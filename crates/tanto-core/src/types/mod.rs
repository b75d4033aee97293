pub mod element;
pub mod result;

pub use element::{Element, ElementKind, Elements};
pub use result::ParseResult;

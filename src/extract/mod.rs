mod date;
pub mod extractor;
mod markup;

pub use extractor::{parse_document, IssueExtractor};

mod error;
mod issue;
mod settings;

pub use error::{ConvertError, RecordRef, Result};
pub use issue::Issue;
pub use settings::{MissingResolution, OutputNaming, Settings};

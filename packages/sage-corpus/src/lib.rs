mod error;
mod index;
mod loader;
mod tier;

pub use error::{Error, Result};
pub use index::VectorIndex;
pub use loader::load_document;
pub use tier::Tier;

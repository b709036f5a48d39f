//! docblock: extract Javadoc-style `/** ... */` comment blocks from source
//! text into structured records.
//!
//! Each block is paired with the first identifier in the code after it,
//! and its `@brief`, `@description`, `@param`, `@returns`/`@return`,
//! `@type` and `@feature` annotations fill in a [`model::DocRecord`].
//! Renderers in [`render`] turn the records into HTML or JSON.

pub mod model;
pub mod parser;
pub mod render;

pub use model::{DocRecord, Document};
pub use parser::{parse, parse_document, LeadingText, ParseOptions};

//! Hack VM Translator - Common Types
//!
//! Shared types used by every phase of the translator: source locations
//! for error reporting and the translator-wide error taxonomy.

pub mod error;
pub mod source_loc;

pub use error::TranslateError;
pub use source_loc::SourceLocation;

//! Hack VM Translator - Command Parser
//!
//! Turns the text of a `.vm` file into a [`TranslationUnit`]: an ordered
//! sequence of validated [`Command`] values, each tagged with the source
//! line it came from. All structural validation (known command words,
//! known segments, token arity, numeric indices) happens here; the codegen
//! crate can assume commands are well-formed.

pub mod command;
pub mod parser;

pub use command::{ArithmeticOp, Command, Segment, SourcedCommand, TranslationUnit};
pub use parser::parse_unit;

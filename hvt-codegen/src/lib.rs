//! Hack VM Translator - Code Generation Backend
//!
//! This crate handles the final phase of translation: generating Hack
//! assembly from parsed VM commands. It includes:
//!
//! - A typed Hack assembly instruction model
//! - Memory-segment address resolution
//! - Arithmetic/logical and stack-transfer translation
//! - Scoped control flow
//! - The function-call ABI (frame save/restore, return linkage)
//! - Program assembly with the bootstrap prologue
//!
//! The emitted text is symbolic: labels and variables are left for the
//! downstream assembler to resolve.

pub mod arithmetic;
pub mod asm;
pub mod flow;
pub mod function;
pub mod naming;
pub mod program;
pub mod segment;
pub mod stack;

#[cfg(test)]
mod tests;

pub use asm::{render, Address, AsmInst, Comp, Dest, Jump};
pub use naming::NameGenerator;
pub use program::Translator;

use hvt_common::TranslateError;
use hvt_parser::TranslationUnit;

/// Main entry point: translate a whole program, bootstrap included.
pub fn translate_program(units: &[TranslationUnit]) -> Result<String, TranslateError> {
    let mut translator = Translator::new();
    let instructions = translator.translate_program(units)?;
    Ok(render(&instructions))
}

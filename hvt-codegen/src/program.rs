//! Program assembly
//!
//! Dispatches parsed commands to the per-kind translators, tracks the
//! current unit and function scope, and prepends the bootstrap prologue:
//! set SP to the stack base, then call the program's entry function.

use crate::asm::{sym, AsmInst, Comp, Dest};
use crate::naming::NameGenerator;
use crate::{arithmetic, flow, function, stack};
use hvt_common::TranslateError;
use hvt_parser::{Command, SourcedCommand, TranslationUnit};
use log::{debug, trace};

/// Default entry function synthesized into the bootstrap call.
pub const DEFAULT_ENTRY: &str = "Sys.init";

/// Translates VM programs to Hack assembly.
///
/// Owns all mutable translation state (the unique-label counters), so two
/// translators in one process never interfere and a fresh translator
/// always produces identical output for identical input.
#[derive(Debug, Default)]
pub struct Translator {
    names: NameGenerator,
    entry: Option<String>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the bootstrap's entry function (default `Sys.init`).
    pub fn with_entry(entry: &str) -> Self {
        Self {
            names: NameGenerator::new(),
            entry: Some(entry.to_string()),
        }
    }

    fn entry(&self) -> &str {
        self.entry.as_deref().unwrap_or(DEFAULT_ENTRY)
    }

    /// Translate a whole program: bootstrap, then each unit in the order
    /// supplied by the caller.
    pub fn translate_program(
        &mut self,
        units: &[TranslationUnit],
    ) -> Result<Vec<AsmInst>, TranslateError> {
        let mut code = self.bootstrap();
        for unit in units {
            code.extend(self.translate_unit(unit)?);
        }
        debug!(
            "translated {} unit(s) into {} instructions",
            units.len(),
            code.len()
        );
        Ok(code)
    }

    /// Translate one unit with no bootstrap. Used for single-file input
    /// and by tests that set up the stack pointer themselves.
    pub fn translate_unit(
        &mut self,
        unit: &TranslationUnit,
    ) -> Result<Vec<AsmInst>, TranslateError> {
        debug!("translating unit '{}'", unit.name);

        // Labels outside any function scope to the unit name.
        let mut scope = unit.name.clone();
        let mut code = Vec::new();

        for sourced in &unit.commands {
            code.extend(self.translate_command(sourced, &unit.name, &mut scope)?);
        }
        Ok(code)
    }

    fn translate_command(
        &mut self,
        sourced: &SourcedCommand,
        unit: &str,
        scope: &mut String,
    ) -> Result<Vec<AsmInst>, TranslateError> {
        trace!("{}: {}", sourced.location, sourced.command);
        let location = &sourced.location;

        match &sourced.command {
            Command::Arithmetic(op) => Ok(arithmetic::translate(*op, &mut self.names)),
            Command::Push { segment, index } => stack::push(*segment, *index, unit, location),
            Command::Pop { segment, index } => stack::pop(*segment, *index, unit, location),
            Command::Label(name) => Ok(flow::label(scope, name)),
            Command::Goto(name) => Ok(flow::goto(scope, name)),
            Command::IfGoto(name) => Ok(flow::if_goto(scope, name)),
            Command::Function { name, locals } => {
                *scope = name.clone();
                Ok(function::function(name, *locals))
            }
            Command::Call { name, args } => Ok(function::call(name, *args, &mut self.names)),
            Command::Return => Ok(function::ret()),
        }
    }

    /// SP = stack base, then a synthesized `call <entry> 0`. The call
    /// threads a return address like any other, so control reaches the
    /// entry function without special-casing it.
    fn bootstrap(&mut self) -> Vec<AsmInst> {
        let mut code = vec![
            AsmInst::at(sym::STACK_BASE),
            AsmInst::assign(Dest::D, Comp::A),
            AsmInst::at_symbol(sym::SP),
            AsmInst::assign(Dest::M, Comp::D),
        ];
        let entry = self.entry().to_string();
        code.extend(function::call(&entry, 0, &mut self.names));
        code
    }
}

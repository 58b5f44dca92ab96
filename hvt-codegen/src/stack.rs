//! Stack transfer translation (`push` / `pop`)
//!
//! Invariant: a push/pop pair over the same cell leaves both SP and the
//! cell unchanged, and SP never transiently points below the stack base.

use crate::asm::{sym, AsmInst, Comp, Dest};
use crate::segment;
use hvt_common::{SourceLocation, TranslateError};
use hvt_parser::Segment;

/// `@SP / M=M+1`
pub(crate) fn sp_increment() -> Vec<AsmInst> {
    vec![
        AsmInst::at_symbol(sym::SP),
        AsmInst::assign(Dest::M, Comp::MPlusOne),
    ]
}

/// `@SP / M=M-1`
pub(crate) fn sp_decrement() -> Vec<AsmInst> {
    vec![
        AsmInst::at_symbol(sym::SP),
        AsmInst::assign(Dest::M, Comp::MMinusOne),
    ]
}

/// `push segment index`: read the value, store it at `*SP`, bump SP.
pub fn push(
    segment: Segment,
    index: u16,
    unit: &str,
    location: &SourceLocation,
) -> Result<Vec<AsmInst>, TranslateError> {
    let mut code = segment::resolve(segment, index, unit, location)?;
    code.push(AsmInst::assign(Dest::D, segment::value_comp(segment)));
    code.push(AsmInst::at_symbol(sym::SP));
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::M, Comp::D));
    code.extend(sp_increment());
    Ok(code)
}

/// `pop segment index`: drop SP, read the value, write the destination.
///
/// The destination address is computed first and cached in R13: both the
/// address computation and the value read need the A register, so doing
/// them in the other order would clobber one with the other.
pub fn pop(
    segment: Segment,
    index: u16,
    unit: &str,
    location: &SourceLocation,
) -> Result<Vec<AsmInst>, TranslateError> {
    if segment == Segment::Constant {
        return Err(TranslateError::invalid_segment(
            "cannot pop into the constant segment",
            location.clone(),
        ));
    }

    let mut code = segment::resolve(segment, index, unit, location)?;
    code.push(AsmInst::assign(Dest::D, Comp::A));
    code.push(AsmInst::at_symbol(sym::R13));
    code.push(AsmInst::assign(Dest::M, Comp::D));
    code.extend(sp_decrement());
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::R13));
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::M, Comp::D));
    Ok(code)
}

//! Memory-segment address resolution
//!
//! Maps a `(segment, index)` pair to the instruction fragment that leaves
//! the A register addressing the target cell. For `constant` the fragment
//! loads the literal itself into A; callers must read `A`, not `M`, in
//! that case (see [`value_comp`]).

use crate::asm::{sym, AsmInst, Comp, Dest};
use hvt_common::{SourceLocation, TranslateError};
use hvt_parser::Segment;

/// Resolve `(segment, index)` to an addressing fragment.
///
/// After the fragment executes, A addresses the target cell, except for
/// `constant` where A holds the literal value. `unit` namespaces static
/// cells so two files never alias each other's statics.
pub fn resolve(
    segment: Segment,
    index: u16,
    unit: &str,
    location: &SourceLocation,
) -> Result<Vec<AsmInst>, TranslateError> {
    match segment {
        Segment::Constant => Ok(vec![AsmInst::at(index)]),

        Segment::Local => Ok(based(sym::LCL, index)),
        Segment::Argument => Ok(based(sym::ARG, index)),
        Segment::This => Ok(based(sym::THIS, index)),
        Segment::That => Ok(based(sym::THAT, index)),

        Segment::Temp => {
            if index >= sym::TEMP_SIZE {
                return Err(TranslateError::invalid_segment(
                    format!("temp index must be 0..{}, got {}", sym::TEMP_SIZE - 1, index),
                    location.clone(),
                ));
            }
            Ok(vec![AsmInst::at(sym::TEMP_BASE + index)])
        }

        Segment::Pointer => match index {
            0 => Ok(vec![AsmInst::at_symbol(sym::THIS)]),
            1 => Ok(vec![AsmInst::at_symbol(sym::THAT)]),
            other => Err(TranslateError::invalid_segment(
                format!("pointer index must be 0 or 1, got {}", other),
                location.clone(),
            )),
        },

        Segment::Static => Ok(vec![AsmInst::at_symbol(format!("{}.{}", unit, index))]),
    }
}

/// Double indirection for the pointer-based segments:
/// A = *base + index.
fn based(base: &str, index: u16) -> Vec<AsmInst> {
    vec![
        AsmInst::at(index),
        AsmInst::assign(Dest::D, Comp::A),
        AsmInst::at_symbol(base),
        AsmInst::assign(Dest::A, Comp::DPlusM),
    ]
}

/// The comp reading a pushed value after [`resolve`]: the literal in A
/// for `constant`, the addressed cell otherwise.
pub fn value_comp(segment: Segment) -> Comp {
    match segment {
        Segment::Constant => Comp::A,
        _ => Comp::M,
    }
}

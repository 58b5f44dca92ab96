//! Arithmetic and logical stack operations
//!
//! Binary operations pop two operands (top of stack is the right-hand
//! side) and compute the result in place in the lower cell. Unary
//! operations transform the top cell in place. Comparisons push the
//! platform's native boolean encoding: all-ones for true, zero for false.

use crate::asm::{sym, AsmInst, Comp, Dest, Jump};
use crate::naming::NameGenerator;
use crate::stack::{sp_decrement, sp_increment};
use hvt_parser::ArithmeticOp;

/// Translate one arithmetic/logical command.
pub fn translate(op: ArithmeticOp, names: &mut NameGenerator) -> Vec<AsmInst> {
    let mut code = Vec::new();

    // Pop the right-hand operand into D for binary ops, then address the
    // (remaining) top cell with A.
    code.extend(sp_decrement());
    code.push(AsmInst::assign(Dest::A, Comp::M));
    if op.is_binary() {
        code.push(AsmInst::assign(Dest::D, Comp::M));
        code.extend(sp_decrement());
        code.push(AsmInst::assign(Dest::A, Comp::M));
    }

    match op {
        ArithmeticOp::Add => code.push(AsmInst::assign(Dest::M, Comp::DPlusM)),
        ArithmeticOp::Sub => code.push(AsmInst::assign(Dest::M, Comp::MMinusD)),
        ArithmeticOp::And => code.push(AsmInst::assign(Dest::M, Comp::DAndM)),
        ArithmeticOp::Or => code.push(AsmInst::assign(Dest::M, Comp::DOrM)),
        ArithmeticOp::Neg => code.push(AsmInst::assign(Dest::M, Comp::NegM)),
        ArithmeticOp::Not => code.push(AsmInst::assign(Dest::M, Comp::NotM)),
        ArithmeticOp::Eq => code.extend(comparison(Jump::JEQ, names)),
        ArithmeticOp::Gt => code.extend(comparison(Jump::JGT, names)),
        ArithmeticOp::Lt => code.extend(comparison(Jump::JLT, names)),
    }

    code.extend(sp_increment());
    code
}

/// Comparison tail, entered with A addressing the left operand's cell and
/// D holding the right operand.
///
/// The operands' difference is computed into the result cell and the
/// branch tests the difference itself, so the outcome matches the signed
/// comparison the VM promises. The result cell's address is parked in R14
/// across the branch because both arms need to write through it.
fn comparison(condition: Jump, names: &mut NameGenerator) -> Vec<AsmInst> {
    let (true_label, end_label) = names.comparison_labels();

    vec![
        AsmInst::assign(Dest::M, Comp::MMinusD),
        AsmInst::assign(Dest::D, Comp::A),
        AsmInst::at_symbol(sym::R14),
        AsmInst::assign(Dest::M, Comp::D),
        AsmInst::assign(Dest::A, Comp::M),
        AsmInst::assign(Dest::D, Comp::M),
        AsmInst::at_symbol(true_label.clone()),
        AsmInst::jump(Comp::D, condition),
        AsmInst::assign(Dest::D, Comp::Zero),
        AsmInst::at_symbol(end_label.clone()),
        AsmInst::jump(Comp::Zero, Jump::JMP),
        AsmInst::label(true_label),
        AsmInst::assign(Dest::D, Comp::NegOne),
        AsmInst::label(end_label),
        AsmInst::at_symbol(sym::R14),
        AsmInst::assign(Dest::A, Comp::M),
        AsmInst::assign(Dest::M, Comp::D),
    ]
}

//! Function-call ABI translation (`call` / `function` / `return`)
//!
//! The target machine has no native call or return instruction, so the
//! whole convention is built from memory-mapped pointers. A frame, from
//! the callee's point of view, is the five cells below its argument
//! segment's end: return address, then the caller's saved LCL, ARG, THIS
//! and THAT, with LCL pointing one past the last saved cell.

use crate::asm::{sym, AsmInst, Comp, Dest, Jump};
use crate::naming::NameGenerator;
use crate::stack::sp_increment;
use log::{debug, trace};

/// Saved-pointer push order at a call site. Return restores the reverse.
const SAVED_POINTERS: [&str; 4] = [sym::LCL, sym::ARG, sym::THIS, sym::THAT];

/// Cells occupied by one frame: return address plus the saved pointers.
const FRAME_SIZE: u16 = 1 + SAVED_POINTERS.len() as u16;

/// `call f n`: save the caller's frame, rebase ARG/LCL for the callee,
/// jump to `f`, and land the eventual return on a fresh label.
pub fn call(callee: &str, args: u16, names: &mut NameGenerator) -> Vec<AsmInst> {
    let return_label = names.return_label(callee);
    debug!("call {} {} -> return label {}", callee, args, return_label);

    let mut code = Vec::new();

    // Push the return address as a literal label value
    code.push(AsmInst::at_symbol(return_label.clone()));
    code.push(AsmInst::assign(Dest::D, Comp::A));
    code.extend(store_d_on_stack());

    // Push the caller's segment pointers, fixed order
    for base in SAVED_POINTERS {
        code.push(AsmInst::at_symbol(base));
        code.push(AsmInst::assign(Dest::D, Comp::M));
        code.extend(store_d_on_stack());
    }

    // ARG = SP - FRAME_SIZE - n
    code.push(AsmInst::at_symbol(sym::SP));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at(FRAME_SIZE));
    code.push(AsmInst::assign(Dest::D, Comp::DMinusA));
    code.push(AsmInst::at(args));
    code.push(AsmInst::assign(Dest::D, Comp::DMinusA));
    code.push(AsmInst::at_symbol(sym::ARG));
    code.push(AsmInst::assign(Dest::M, Comp::D));

    // LCL = SP
    code.push(AsmInst::at_symbol(sym::SP));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::LCL));
    code.push(AsmInst::assign(Dest::M, Comp::D));

    // Transfer control and emit the landing point
    code.push(AsmInst::at_symbol(callee));
    code.push(AsmInst::jump(Comp::Zero, Jump::JMP));
    code.push(AsmInst::label(return_label));

    code
}

/// `function f k`: entry label, then k pushed zeros for the locals. The
/// callee must not assume the machine clears memory.
pub fn function(name: &str, locals: u16) -> Vec<AsmInst> {
    trace!("function {} with {} locals", name, locals);

    let mut code = vec![AsmInst::label(name)];
    for _ in 0..locals {
        code.push(AsmInst::at(0));
        code.push(AsmInst::assign(Dest::D, Comp::A));
        code.extend(store_d_on_stack());
    }
    code
}

/// `return`: place the return value, tear down the frame, jump back.
///
/// Ordering is load-bearing. The return address is captured into R14
/// before the return value is written: with zero arguments, `*ARG` is the
/// very cell holding the return address. The saved pointers are restored
/// only after the value and address are safe, because the restore walk
/// overwrites the frame cells.
pub fn ret() -> Vec<AsmInst> {
    let mut code = Vec::new();

    // R15 = LCL (frame base)
    code.push(AsmInst::at_symbol(sym::LCL));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::R15));
    code.push(AsmInst::assign(Dest::M, Comp::D));

    // R14 = *(frame - FRAME_SIZE), the return address
    code.push(AsmInst::at(FRAME_SIZE));
    code.push(AsmInst::assign(Dest::A, Comp::DMinusA));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::R14));
    code.push(AsmInst::assign(Dest::M, Comp::D));

    // *ARG = popped return value; R13 caches the destination address
    code.push(AsmInst::at_symbol(sym::ARG));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::R13));
    code.push(AsmInst::assign(Dest::M, Comp::D));
    code.push(AsmInst::at_symbol(sym::SP));
    code.push(AsmInst::assign(Dest::M, Comp::MMinusOne));
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(sym::R13));
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::M, Comp::D));

    // SP = ARG + 1 (A still addresses the return-value cell)
    code.push(AsmInst::assign(Dest::D, Comp::A));
    code.push(AsmInst::at_symbol(sym::SP));
    code.push(AsmInst::assign(Dest::M, Comp::DPlusOne));

    // Restore THAT, THIS, ARG, LCL walking backward from the frame base
    for base in SAVED_POINTERS.iter().rev() {
        code.push(AsmInst::at_symbol(sym::R15));
        code.push(AsmInst::assign(Dest::M, Comp::MMinusOne));
        code.push(AsmInst::assign(Dest::A, Comp::M));
        code.push(AsmInst::assign(Dest::D, Comp::M));
        code.push(AsmInst::at_symbol(*base));
        code.push(AsmInst::assign(Dest::M, Comp::D));
    }

    // Indirect jump through the captured return address
    code.push(AsmInst::at_symbol(sym::R14));
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::jump(Comp::Zero, Jump::JMP));

    code
}

/// `*SP = D; SP += 1`
fn store_d_on_stack() -> Vec<AsmInst> {
    let mut code = vec![
        AsmInst::at_symbol(sym::SP),
        AsmInst::assign(Dest::A, Comp::M),
        AsmInst::assign(Dest::M, Comp::D),
    ];
    code.extend(sp_increment());
    code
}

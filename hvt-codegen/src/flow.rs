//! Control-flow translation (`label` / `goto` / `if-goto`)
//!
//! Jump targets are namespaced as `<scope>$<label>`, where the scope is
//! the enclosing function's fully qualified name (or the unit name for
//! straight-line code outside any function). Forward references stay
//! symbolic; the downstream assembler resolves them.

use crate::asm::{AsmInst, Comp, Dest, Jump};
use crate::stack::sp_decrement;

fn scoped(scope: &str, label: &str) -> String {
    format!("{}${}", scope, label)
}

/// `label L` - a jump target, no executable code.
pub fn label(scope: &str, name: &str) -> Vec<AsmInst> {
    vec![AsmInst::label(scoped(scope, name))]
}

/// `goto L` - unconditional jump.
pub fn goto(scope: &str, name: &str) -> Vec<AsmInst> {
    vec![
        AsmInst::at_symbol(scoped(scope, name)),
        AsmInst::jump(Comp::Zero, Jump::JMP),
    ]
}

/// `if-goto L` - pop one value, jump if it is non-zero.
pub fn if_goto(scope: &str, name: &str) -> Vec<AsmInst> {
    let mut code = sp_decrement();
    code.push(AsmInst::assign(Dest::A, Comp::M));
    code.push(AsmInst::assign(Dest::D, Comp::M));
    code.push(AsmInst::at_symbol(scoped(scope, name)));
    code.push(AsmInst::jump(Comp::D, Jump::JNE));
    code
}

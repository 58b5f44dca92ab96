//! Hack assembly instruction definitions
//!
//! This module models the instruction forms of the Hack machine: the
//! address instruction `@value`, the compute instruction
//! `dest=comp;jump`, and the label pseudo-instruction `(name)`. The full
//! dest/comp/jump tables are modeled, not just the subset the translator
//! emits.

use std::fmt;

/// Well-known symbols of the target platform.
///
/// `SP`, `LCL`, `ARG`, `THIS`, `THAT` are pre-defined pointer cells at
/// RAM 0-4. `R13`-`R15` are the scratch cells this translator reserves
/// for itself; generated user-segment code never touches them.
pub mod sym {
    pub const SP: &str = "SP";
    pub const LCL: &str = "LCL";
    pub const ARG: &str = "ARG";
    pub const THIS: &str = "THIS";
    pub const THAT: &str = "THAT";

    /// Scratch: cached pop destination address
    pub const R13: &str = "R13";
    /// Scratch: cached comparison result address / saved return address
    pub const R14: &str = "R14";
    /// Scratch: frame base during return
    pub const R15: &str = "R15";

    /// First cell of the stack region
    pub const STACK_BASE: u16 = 256;
    /// First cell of the temp segment (RAM 5-12)
    pub const TEMP_BASE: u16 = 5;
    /// Number of cells in the temp segment
    pub const TEMP_SIZE: u16 = 8;
}

/// Target of an address instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// A symbolic name, resolved by the downstream assembler
    Symbol(String),
    /// A literal 15-bit address or constant
    Literal(u16),
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Symbol(name) => write!(f, "{}", name),
            Address::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Destination field of a compute instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dest::M => write!(f, "M"),
            Dest::D => write!(f, "D"),
            Dest::MD => write!(f, "MD"),
            Dest::A => write!(f, "A"),
            Dest::AM => write!(f, "AM"),
            Dest::AD => write!(f, "AD"),
            Dest::AMD => write!(f, "AMD"),
        }
    }
}

/// Computation field of a compute instruction (the full ALU table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comp::Zero => write!(f, "0"),
            Comp::One => write!(f, "1"),
            Comp::NegOne => write!(f, "-1"),
            Comp::D => write!(f, "D"),
            Comp::A => write!(f, "A"),
            Comp::M => write!(f, "M"),
            Comp::NotD => write!(f, "!D"),
            Comp::NotA => write!(f, "!A"),
            Comp::NotM => write!(f, "!M"),
            Comp::NegD => write!(f, "-D"),
            Comp::NegA => write!(f, "-A"),
            Comp::NegM => write!(f, "-M"),
            Comp::DPlusOne => write!(f, "D+1"),
            Comp::APlusOne => write!(f, "A+1"),
            Comp::MPlusOne => write!(f, "M+1"),
            Comp::DMinusOne => write!(f, "D-1"),
            Comp::AMinusOne => write!(f, "A-1"),
            Comp::MMinusOne => write!(f, "M-1"),
            Comp::DPlusA => write!(f, "D+A"),
            Comp::DPlusM => write!(f, "D+M"),
            Comp::DMinusA => write!(f, "D-A"),
            Comp::DMinusM => write!(f, "D-M"),
            Comp::AMinusD => write!(f, "A-D"),
            Comp::MMinusD => write!(f, "M-D"),
            Comp::DAndA => write!(f, "D&A"),
            Comp::DAndM => write!(f, "D&M"),
            Comp::DOrA => write!(f, "D|A"),
            Comp::DOrM => write!(f, "D|M"),
        }
    }
}

/// Jump field of a compute instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jump {
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jump::JGT => write!(f, "JGT"),
            Jump::JEQ => write!(f, "JEQ"),
            Jump::JGE => write!(f, "JGE"),
            Jump::JLT => write!(f, "JLT"),
            Jump::JNE => write!(f, "JNE"),
            Jump::JLE => write!(f, "JLE"),
            Jump::JMP => write!(f, "JMP"),
        }
    }
}

/// One Hack assembly instruction
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    /// `@symbol` or `@literal`
    A(Address),
    /// `dest=comp;jump` (dest and jump each optional)
    C {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
    /// `(name)` - a jump target, consumed by the downstream assembler
    Label(String),
}

impl AsmInst {
    /// `@name`
    pub fn at_symbol(name: impl Into<String>) -> Self {
        AsmInst::A(Address::Symbol(name.into()))
    }

    /// `@value`
    pub fn at(value: u16) -> Self {
        AsmInst::A(Address::Literal(value))
    }

    /// `dest=comp`
    pub fn assign(dest: Dest, comp: Comp) -> Self {
        AsmInst::C {
            dest: Some(dest),
            comp,
            jump: None,
        }
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        AsmInst::C {
            dest: None,
            comp,
            jump: Some(jump),
        }
    }

    /// `(name)`
    pub fn label(name: impl Into<String>) -> Self {
        AsmInst::Label(name.into())
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::A(addr) => write!(f, "@{}", addr),
            AsmInst::C { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            AsmInst::Label(name) => write!(f, "({})", name),
        }
    }
}

/// Render a sequence of instructions as assembler input, one per line.
pub fn render(instructions: &[AsmInst]) -> String {
    let mut out = String::new();
    for inst in instructions {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}

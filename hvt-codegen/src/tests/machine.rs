//! Test-only model of the target machine
//!
//! Two-pass symbol resolution (labels, then first-use variable cells from
//! RAM 16, with the standard predefined symbols) followed by a direct
//! interpreter for A/C instructions over a 32K RAM. Signed 16-bit
//! wrapping arithmetic throughout, matching the hardware ALU.

use crate::asm::{Address, AsmInst, Comp, Dest, Jump};
use std::collections::HashMap;

const RAM_SIZE: usize = 32768;
const FIRST_VARIABLE_CELL: u16 = 16;

/// A symbol-resolved instruction
#[derive(Debug, Clone)]
enum Inst {
    A(u16),
    C {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
}

pub struct Machine {
    rom: Vec<Inst>,
    symbols: HashMap<String, u16>,
    pub ram: Vec<i16>,
    a: i16,
    d: i16,
    pc: usize,
}

impl Machine {
    /// Resolve symbols and load the program. Panics on malformed input;
    /// this is test scaffolding, not production code.
    pub fn load(program: &[AsmInst]) -> Self {
        let mut symbols = predefined_symbols();

        // Pass 1: labels name the index of the following real instruction
        let mut index = 0u16;
        for inst in program {
            match inst {
                AsmInst::Label(name) => {
                    assert!(
                        symbols.insert(name.clone(), index).is_none(),
                        "duplicate label {name}"
                    );
                }
                _ => index += 1,
            }
        }

        // Pass 2: remaining symbols are variables, allocated from RAM 16
        let mut next_variable = FIRST_VARIABLE_CELL;
        let mut rom = Vec::new();
        for inst in program {
            match inst {
                AsmInst::Label(_) => {}
                AsmInst::A(Address::Literal(value)) => rom.push(Inst::A(*value)),
                AsmInst::A(Address::Symbol(name)) => {
                    let address = *symbols.entry(name.clone()).or_insert_with(|| {
                        let cell = next_variable;
                        next_variable += 1;
                        cell
                    });
                    rom.push(Inst::A(address));
                }
                AsmInst::C { dest, comp, jump } => rom.push(Inst::C {
                    dest: *dest,
                    comp: *comp,
                    jump: *jump,
                }),
            }
        }

        Self {
            rom,
            symbols,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    /// RAM cell a symbol resolved to (variable or predefined)
    pub fn address_of(&self, symbol: &str) -> u16 {
        *self
            .symbols
            .get(symbol)
            .unwrap_or_else(|| panic!("unresolved symbol {symbol}"))
    }

    pub fn sp(&self) -> i16 {
        self.ram[0]
    }

    /// The value on top of the stack (the cell below SP)
    pub fn stack_top(&self) -> i16 {
        self.ram[(self.sp() - 1) as usize]
    }

    /// Execute until the program counter runs off the end of the ROM or
    /// the step budget is exhausted (looping programs rely on the budget).
    pub fn run(&mut self, max_steps: usize) {
        for _ in 0..max_steps {
            if self.pc >= self.rom.len() {
                return;
            }
            self.step();
        }
    }

    fn step(&mut self) {
        match self.rom[self.pc].clone() {
            Inst::A(value) => {
                self.a = value as i16;
                self.pc += 1;
            }
            Inst::C { dest, comp, jump } => {
                let address = (self.a as u16 as usize) % RAM_SIZE;
                let result = self.eval(comp, self.ram[address]);

                if let Some(dest) = dest {
                    // M writes go through the pre-update A
                    if matches!(dest, Dest::M | Dest::MD | Dest::AM | Dest::AMD) {
                        self.ram[address] = result;
                    }
                    if matches!(dest, Dest::D | Dest::MD | Dest::AD | Dest::AMD) {
                        self.d = result;
                    }
                    if matches!(dest, Dest::A | Dest::AM | Dest::AD | Dest::AMD) {
                        self.a = result;
                    }
                }

                let taken = match jump {
                    None => false,
                    Some(Jump::JGT) => result > 0,
                    Some(Jump::JEQ) => result == 0,
                    Some(Jump::JGE) => result >= 0,
                    Some(Jump::JLT) => result < 0,
                    Some(Jump::JNE) => result != 0,
                    Some(Jump::JLE) => result <= 0,
                    Some(Jump::JMP) => true,
                };
                if taken {
                    self.pc = self.a as u16 as usize;
                } else {
                    self.pc += 1;
                }
            }
        }
    }

    fn eval(&self, comp: Comp, m: i16) -> i16 {
        let (a, d) = (self.a, self.d);
        match comp {
            Comp::Zero => 0,
            Comp::One => 1,
            Comp::NegOne => -1,
            Comp::D => d,
            Comp::A => a,
            Comp::M => m,
            Comp::NotD => !d,
            Comp::NotA => !a,
            Comp::NotM => !m,
            Comp::NegD => d.wrapping_neg(),
            Comp::NegA => a.wrapping_neg(),
            Comp::NegM => m.wrapping_neg(),
            Comp::DPlusOne => d.wrapping_add(1),
            Comp::APlusOne => a.wrapping_add(1),
            Comp::MPlusOne => m.wrapping_add(1),
            Comp::DMinusOne => d.wrapping_sub(1),
            Comp::AMinusOne => a.wrapping_sub(1),
            Comp::MMinusOne => m.wrapping_sub(1),
            Comp::DPlusA => d.wrapping_add(a),
            Comp::DPlusM => d.wrapping_add(m),
            Comp::DMinusA => d.wrapping_sub(a),
            Comp::DMinusM => d.wrapping_sub(m),
            Comp::AMinusD => a.wrapping_sub(d),
            Comp::MMinusD => m.wrapping_sub(d),
            Comp::DAndA => d & a,
            Comp::DAndM => d & m,
            Comp::DOrA => d | a,
            Comp::DOrM => d | m,
        }
    }
}

fn predefined_symbols() -> HashMap<String, u16> {
    let mut symbols = HashMap::new();
    symbols.insert("SP".to_string(), 0);
    symbols.insert("LCL".to_string(), 1);
    symbols.insert("ARG".to_string(), 2);
    symbols.insert("THIS".to_string(), 3);
    symbols.insert("THAT".to_string(), 4);
    for r in 0..16 {
        symbols.insert(format!("R{r}"), r);
    }
    symbols.insert("SCREEN".to_string(), 16384);
    symbols.insert("KBD".to_string(), 24576);
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::{AsmInst, Comp, Dest, Jump};

    #[test]
    fn test_straight_line_arithmetic() {
        // RAM[0] = 2 + 3
        let program = vec![
            AsmInst::at(2),
            AsmInst::assign(Dest::D, Comp::A),
            AsmInst::at(3),
            AsmInst::assign(Dest::D, Comp::DPlusA),
            AsmInst::at(0),
            AsmInst::assign(Dest::M, Comp::D),
        ];
        let mut machine = Machine::load(&program);
        machine.run(100);
        assert_eq!(machine.ram[0], 5);
    }

    #[test]
    fn test_label_and_jump() {
        // Skip over an instruction that would clobber RAM[5]
        let program = vec![
            AsmInst::at(5),
            AsmInst::assign(Dest::M, Comp::One),
            AsmInst::at_symbol("DONE"),
            AsmInst::jump(Comp::Zero, Jump::JMP),
            AsmInst::at(5),
            AsmInst::assign(Dest::M, Comp::Zero),
            AsmInst::label("DONE"),
        ];
        let mut machine = Machine::load(&program);
        machine.run(100);
        assert_eq!(machine.ram[5], 1);
    }

    #[test]
    fn test_variable_allocation_from_16() {
        let program = vec![
            AsmInst::at_symbol("first"),
            AsmInst::assign(Dest::M, Comp::One),
            AsmInst::at_symbol("second"),
            AsmInst::assign(Dest::M, Comp::NegOne),
        ];
        let mut machine = Machine::load(&program);
        machine.run(100);
        assert_eq!(machine.address_of("first"), 16);
        assert_eq!(machine.address_of("second"), 17);
        assert_eq!(machine.ram[16], 1);
        assert_eq!(machine.ram[17], -1);
    }

    #[test]
    fn test_conditional_jump_on_negative() {
        let program = vec![
            AsmInst::at(1),
            AsmInst::assign(Dest::D, Comp::A),
            AsmInst::assign(Dest::D, Comp::NegD),
            AsmInst::at_symbol("NEG"),
            AsmInst::jump(Comp::D, Jump::JLT),
            AsmInst::at(7),
            AsmInst::assign(Dest::M, Comp::One),
            AsmInst::label("NEG"),
        ];
        let mut machine = Machine::load(&program);
        machine.run(100);
        assert_eq!(machine.ram[7], 0);
    }
}

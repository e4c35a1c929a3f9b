//! Decoded instructions and their byte encoding.
//!
//! Instructions are variable length: one opcode byte followed by 0 to 3
//! operand bytes, laid out exactly as they sit in the memory buffer:
//! ```text
//! LOAD  reg addr        01 rr aa
//! STORE reg addr        02 rr aa
//! ADD   reg1 reg2       03 r1 r2
//! SUB   reg1 reg2       04 r1 r2
//! ADDI  reg             05 rr
//! SUBI  reg             06 rr
//! JUMP  addr            07 aa
//! BEQ   reg1 reg2 addr  08 r1 r2 aa
//! BEQZ  addr            09 aa
//! HALT                  ff
//! ```

use std::fmt;

use crate::opcode::Opcode;

/// A single decoded instruction. Register operands are raw indices and
/// are not range-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Load { reg: u8, addr: u8 },
    Store { reg: u8, addr: u8 },
    Add { dst: u8, src: u8 },
    Sub { dst: u8, src: u8 },
    Addi { reg: u8 },
    Subi { reg: u8 },
    Jump { addr: u8 },
    Beq { lhs: u8, rhs: u8, addr: u8 },
    /// Always tests register 1; there is no register operand.
    Beqz { addr: u8 },
    Halt,
}

impl Instruction {
    /// Build an instruction from an opcode and its operand bytes. Operand
    /// bytes past `opcode.operand_count()` are ignored.
    pub fn from_parts(opcode: Opcode, operands: [u8; 3]) -> Self {
        match opcode {
            Opcode::Load => Instruction::Load {
                reg: operands[0],
                addr: operands[1],
            },
            Opcode::Store => Instruction::Store {
                reg: operands[0],
                addr: operands[1],
            },
            Opcode::Add => Instruction::Add {
                dst: operands[0],
                src: operands[1],
            },
            Opcode::Sub => Instruction::Sub {
                dst: operands[0],
                src: operands[1],
            },
            Opcode::Addi => Instruction::Addi { reg: operands[0] },
            Opcode::Subi => Instruction::Subi { reg: operands[0] },
            Opcode::Jump => Instruction::Jump { addr: operands[0] },
            Opcode::Beq => Instruction::Beq {
                lhs: operands[0],
                rhs: operands[1],
                addr: operands[2],
            },
            Opcode::Beqz => Instruction::Beqz { addr: operands[0] },
            Opcode::Halt => Instruction::Halt,
        }
    }

    /// The opcode of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Addi { .. } => Opcode::Addi,
            Instruction::Subi { .. } => Opcode::Subi,
            Instruction::Jump { .. } => Opcode::Jump,
            Instruction::Beq { .. } => Opcode::Beq,
            Instruction::Beqz { .. } => Opcode::Beqz,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Encoded width in bytes.
    pub fn width(&self) -> usize {
        self.opcode().width()
    }

    /// Append the encoded bytes of this instruction to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode() as u8);
        match *self {
            Instruction::Load { reg, addr } | Instruction::Store { reg, addr } => {
                out.extend_from_slice(&[reg, addr]);
            }
            Instruction::Add { dst, src } | Instruction::Sub { dst, src } => {
                out.extend_from_slice(&[dst, src]);
            }
            Instruction::Addi { reg } | Instruction::Subi { reg } => out.push(reg),
            Instruction::Jump { addr } | Instruction::Beqz { addr } => out.push(addr),
            Instruction::Beq { lhs, rhs, addr } => out.extend_from_slice(&[lhs, rhs, addr]),
            Instruction::Halt => {}
        }
    }

    /// Encode this instruction to a fresh byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width());
        self.encode_into(&mut out);
        out
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match *self {
            Instruction::Load { reg, addr } | Instruction::Store { reg, addr } => {
                write!(f, "{op} r{reg} {addr:#04x}")
            }
            Instruction::Add { dst, src } | Instruction::Sub { dst, src } => {
                write!(f, "{op} r{dst} r{src}")
            }
            Instruction::Addi { reg } | Instruction::Subi { reg } => write!(f, "{op} r{reg}"),
            Instruction::Jump { addr } | Instruction::Beqz { addr } => {
                write!(f, "{op} {addr:#04x}")
            }
            Instruction::Beq { lhs, rhs, addr } => write!(f, "{op} r{lhs} r{rhs} {addr:#04x}"),
            Instruction::Halt => write!(f, "{op}"),
        }
    }
}

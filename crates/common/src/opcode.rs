//! Opcode definitions for the register machine.
//!
//! Byte values for LOAD, STORE, ADD, SUB and HALT are fixed by existing
//! encoded programs and must never change.

use std::fmt;

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// Operand bytes following the opcode are register indices or absolute
/// buffer addresses, depending on the variant.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `reg, addr`: read a little-endian i16 from `addr` into `reg`.
    Load = 0x01,
    /// `reg, addr`: write `reg` little-endian to `addr`.
    Store = 0x02,
    /// `reg1, reg2`: `reg1 += reg2`, wrapping.
    Add = 0x03,
    /// `reg1, reg2`: `reg1 -= reg2`, wrapping.
    Sub = 0x04,
    /// `reg`: increment by one, wrapping.
    Addi = 0x05,
    /// `reg`: decrement by one, wrapping.
    Subi = 0x06,
    /// `addr`: unconditional jump.
    Jump = 0x07,
    /// `reg1, reg2, addr`: jump if the registers are equal.
    Beq = 0x08,
    /// `addr`: jump if register 1 is zero.
    Beqz = 0x09,
    /// Stop execution.
    Halt = 0xFF,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Load,
    Opcode::Store,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Addi,
    Opcode::Subi,
    Opcode::Jump,
    Opcode::Beq,
    Opcode::Beqz,
    Opcode::Halt,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Opcode::Load),
            0x02 => Ok(Opcode::Store),
            0x03 => Ok(Opcode::Add),
            0x04 => Ok(Opcode::Sub),
            0x05 => Ok(Opcode::Addi),
            0x06 => Ok(Opcode::Subi),
            0x07 => Ok(Opcode::Jump),
            0x08 => Ok(Opcode::Beq),
            0x09 => Ok(Opcode::Beqz),
            0xFF => Ok(Opcode::Halt),
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl Opcode {
    /// Total encoded width in bytes, opcode byte included.
    pub fn width(self) -> usize {
        match self {
            Opcode::Halt => 1,
            Opcode::Addi | Opcode::Subi | Opcode::Jump | Opcode::Beqz => 2,
            Opcode::Load | Opcode::Store | Opcode::Add | Opcode::Sub => 3,
            Opcode::Beq => 4,
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_count(self) -> usize {
        self.width() - 1
    }

    /// Returns the mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Jump => "JUMP",
            Opcode::Beq => "BEQ",
            Opcode::Beqz => "BEQZ",
            Opcode::Halt => "HALT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_valid_opcodes() {
        for &opcode in &ALL_OPCODES {
            let byte = opcode as u8;
            let decoded = Opcode::try_from(byte).unwrap();
            assert_eq!(
                opcode, decoded,
                "roundtrip failed for {opcode:?} ({byte:#04x})"
            );
        }
    }

    #[test]
    fn sample_program_bytes_are_stable() {
        assert_eq!(Opcode::Load as u8, 0x01);
        assert_eq!(Opcode::Store as u8, 0x02);
        assert_eq!(Opcode::Add as u8, 0x03);
        assert_eq!(Opcode::Sub as u8, 0x04);
        assert_eq!(Opcode::Halt as u8, 0xFF);
    }

    #[test]
    fn every_other_byte_is_unknown() {
        let known: Vec<u8> = ALL_OPCODES.iter().map(|&op| op as u8).collect();
        for byte in 0..=255u8 {
            if known.contains(&byte) {
                continue;
            }
            assert_eq!(
                Opcode::try_from(byte),
                Err(DecodeError::UnknownOpcode(byte)),
                "byte {byte:#04x} should be unknown"
            );
        }
    }

    #[test]
    fn widths_match_table() {
        assert_eq!(Opcode::Load.width(), 3);
        assert_eq!(Opcode::Store.width(), 3);
        assert_eq!(Opcode::Add.width(), 3);
        assert_eq!(Opcode::Sub.width(), 3);
        assert_eq!(Opcode::Addi.width(), 2);
        assert_eq!(Opcode::Subi.width(), 2);
        assert_eq!(Opcode::Jump.width(), 2);
        assert_eq!(Opcode::Beq.width(), 4);
        assert_eq!(Opcode::Beqz.width(), 2);
        assert_eq!(Opcode::Halt.width(), 1);
    }

    #[test]
    fn mnemonics_are_uppercase() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
            assert_eq!(opcode.to_string(), m);
        }
    }
}

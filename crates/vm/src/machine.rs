//! VM state: register file, program counter and bounds-checked buffer access.

use crate::config::Config;
use crate::error::RuntimeError;
use regvm_common::memory::{decode_i16, encode_i16, MAX_BUFFER_LEN, SLOT_WIDTH};
use regvm_common::{DecodeError, Instruction, Opcode};

/// Size of the register file. Slot 0 belongs to the program counter and
/// is never addressable by an operand; 1..REGISTER_COUNT are general purpose.
pub const REGISTER_COUNT: usize = 4;

/// Register tested by BEQZ. Fixed by the encoding, which has no register operand.
pub const BEQZ_REGISTER: u8 = 1;

/// Result of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halt,
}

/// Summary of a run that reached HALT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halted {
    /// Address of the HALT instruction.
    pub pc: usize,
    /// Instructions executed, HALT included.
    pub steps: u64,
}

/// The regvm machine. Borrows its buffer exclusively for one execution.
pub struct VM<'m> {
    /// Code, data and I/O slots in one address space.
    pub(crate) memory: &'m mut [u8],
    /// Register file; index 0 is reserved and stays zero.
    pub(crate) registers: [i16; REGISTER_COUNT],
    /// Address of the next instruction to fetch.
    pub(crate) pc: usize,
    /// Instructions executed so far.
    pub(crate) steps: u64,
    pub(crate) config: Config,
}

impl<'m> VM<'m> {
    /// Create a VM over `memory` with the default config.
    pub fn new(memory: &'m mut [u8]) -> Result<Self, RuntimeError> {
        Self::with_config(memory, Config::default())
    }

    /// Create a VM over `memory`. Registers and pc start at zero.
    pub fn with_config(memory: &'m mut [u8], config: Config) -> Result<Self, RuntimeError> {
        if memory.len() > MAX_BUFFER_LEN {
            return Err(RuntimeError::BufferTooLarge {
                len: memory.len(),
                max: MAX_BUFFER_LEN,
            });
        }
        Ok(Self {
            memory,
            registers: [0; REGISTER_COUNT],
            pc: 0,
            steps: 0,
            config,
        })
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn registers(&self) -> &[i16; REGISTER_COUNT] {
        &self.registers
    }

    pub fn memory(&self) -> &[u8] {
        self.memory
    }

    /// Read the byte at `addr`.
    pub(crate) fn byte(&self, addr: usize) -> Result<u8, RuntimeError> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(RuntimeError::OutOfBounds { at: self.pc, addr })
    }

    /// Decode the instruction at the current pc without executing it.
    pub fn fetch(&self) -> Result<Instruction, RuntimeError> {
        let byte = self.byte(self.pc)?;
        let opcode = Opcode::try_from(byte).map_err(|e| match e {
            DecodeError::UnknownOpcode(byte) => RuntimeError::UnknownOpcode { at: self.pc, byte },
        })?;

        let mut operands = [0u8; 3];
        for (i, slot) in operands.iter_mut().take(opcode.operand_count()).enumerate() {
            *slot = self.byte(self.pc + 1 + i)?;
        }

        Ok(Instruction::from_parts(opcode, operands))
    }

    /// Bounds-check a register operand.
    fn register_slot(&self, index: u8) -> Result<usize, RuntimeError> {
        let slot = usize::from(index);
        if slot == 0 || slot >= REGISTER_COUNT {
            return Err(RuntimeError::InvalidRegister { at: self.pc, index });
        }
        Ok(slot)
    }

    pub(crate) fn reg(&self, index: u8) -> Result<i16, RuntimeError> {
        Ok(self.registers[self.register_slot(index)?])
    }

    pub(crate) fn set_reg(&mut self, index: u8, value: i16) -> Result<(), RuntimeError> {
        let slot = self.register_slot(index)?;
        self.registers[slot] = value;
        Ok(())
    }

    /// Range of the 2-byte word at `addr`, checked against the buffer.
    fn word(&self, addr: u8) -> Result<std::ops::Range<usize>, RuntimeError> {
        let start = usize::from(addr);
        let end = start + SLOT_WIDTH;
        if end > self.memory.len() {
            return Err(RuntimeError::OutOfBounds {
                at: self.pc,
                addr: start,
            });
        }
        Ok(start..end)
    }

    pub(crate) fn load_word(&self, addr: u8) -> Result<i16, RuntimeError> {
        let range = self.word(addr)?;
        Ok(decode_i16(self.memory[range.start], self.memory[range.start + 1]))
    }

    pub(crate) fn store_word(&mut self, addr: u8, value: i16) -> Result<(), RuntimeError> {
        let range = self.word(addr)?;
        self.memory[range].copy_from_slice(&encode_i16(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_oversized_buffer() {
        let mut memory = vec![0u8; MAX_BUFFER_LEN + 1];
        assert!(matches!(
            VM::new(&mut memory),
            Err(RuntimeError::BufferTooLarge { len: 257, max: 256 })
        ));
    }

    #[test]
    fn accepts_full_address_space() {
        let mut memory = vec![0u8; MAX_BUFFER_LEN];
        assert!(VM::new(&mut memory).is_ok());
    }

    #[test]
    fn fetch_decodes_at_pc() {
        let mut memory = [0x01, 0x02, 0x10, 0xff];
        let vm = VM::new(&mut memory).unwrap();
        assert_eq!(vm.fetch(), Ok(Instruction::Load { reg: 2, addr: 0x10 }));
    }

    #[test]
    fn fetch_truncated_operands() {
        let mut memory = [0x08, 0x01, 0x02];
        let vm = VM::new(&mut memory).unwrap();
        assert_eq!(vm.fetch(), Err(RuntimeError::OutOfBounds { at: 0, addr: 3 }));
    }

    #[test]
    fn fetch_empty_buffer() {
        let mut memory: [u8; 0] = [];
        let vm = VM::new(&mut memory).unwrap();
        assert_eq!(vm.fetch(), Err(RuntimeError::OutOfBounds { at: 0, addr: 0 }));
    }

    #[test]
    fn register_zero_is_reserved() {
        let mut memory = [0xffu8];
        let mut vm = VM::new(&mut memory).unwrap();
        assert_eq!(vm.reg(0), Err(RuntimeError::InvalidRegister { at: 0, index: 0 }));
        assert_eq!(
            vm.set_reg(REGISTER_COUNT as u8, 1),
            Err(RuntimeError::InvalidRegister {
                at: 0,
                index: REGISTER_COUNT as u8
            })
        );
        vm.set_reg(3, -7).unwrap();
        assert_eq!(vm.registers(), &[0, 0, 0, -7]);
    }

    #[test]
    fn word_access_is_bounds_checked() {
        let mut memory = [0u8; 4];
        let mut vm = VM::new(&mut memory).unwrap();
        vm.store_word(2, -2).unwrap();
        assert_eq!(vm.load_word(2), Ok(-2));
        assert_eq!(vm.load_word(3), Err(RuntimeError::OutOfBounds { at: 0, addr: 3 }));
        assert_eq!(
            vm.store_word(200, 1),
            Err(RuntimeError::OutOfBounds { at: 0, addr: 200 })
        );
        assert_eq!(vm.memory(), &[0, 0, 0xfe, 0xff]);
    }
}

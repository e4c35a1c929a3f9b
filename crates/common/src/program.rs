//! Program construction for tests, demos and tooling.
//!
//! A [`Program`] is an ordered list of instructions encoded contiguously
//! from address 0, plus raw data bytes placed at fixed addresses. It
//! produces buffer images; it never parses text.

use crate::error::ImageError;
use crate::image::load_image;
use crate::instruction::Instruction;
use crate::memory::encode_i16;

/// Raw bytes placed at an absolute address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub addr: usize,
    pub bytes: Vec<u8>,
}

/// An instruction stream that starts at address 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream, in address order.
    pub instructions: Vec<Instruction>,
    /// Data written over the zeroed tail, in the order placed.
    pub data: Vec<Placement>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            data: Vec::new(),
        }
    }

    /// Place raw bytes at `addr`.
    pub fn data(mut self, addr: usize, bytes: &[u8]) -> Self {
        self.data.push(Placement {
            addr,
            bytes: bytes.to_vec(),
        });
        self
    }

    /// Place a little-endian i16 at `addr`.
    pub fn word(self, addr: usize, value: i16) -> Self {
        self.data(addr, &encode_i16(value))
    }

    /// Append an instruction.
    pub fn push(mut self, instr: Instruction) -> Self {
        self.instructions.push(instr);
        self
    }

    pub fn load(self, reg: u8, addr: u8) -> Self {
        self.push(Instruction::Load { reg, addr })
    }

    pub fn store(self, reg: u8, addr: u8) -> Self {
        self.push(Instruction::Store { reg, addr })
    }

    pub fn add(self, dst: u8, src: u8) -> Self {
        self.push(Instruction::Add { dst, src })
    }

    pub fn sub(self, dst: u8, src: u8) -> Self {
        self.push(Instruction::Sub { dst, src })
    }

    pub fn addi(self, reg: u8) -> Self {
        self.push(Instruction::Addi { reg })
    }

    pub fn subi(self, reg: u8) -> Self {
        self.push(Instruction::Subi { reg })
    }

    pub fn jump(self, addr: u8) -> Self {
        self.push(Instruction::Jump { addr })
    }

    pub fn beq(self, lhs: u8, rhs: u8, addr: u8) -> Self {
        self.push(Instruction::Beq { lhs, rhs, addr })
    }

    pub fn beqz(self, addr: u8) -> Self {
        self.push(Instruction::Beqz { addr })
    }

    pub fn halt(self) -> Self {
        self.push(Instruction::Halt)
    }

    /// Address the next pushed instruction would land at.
    pub fn len_bytes(&self) -> usize {
        self.instructions.iter().map(Instruction::width).sum()
    }

    /// Encode the instruction stream.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len_bytes());
        for instr in &self.instructions {
            instr.encode_into(&mut bytes);
        }
        bytes
    }

    /// Encode into a zero-filled buffer of `len` bytes and apply data
    /// placements. A placement may not overlap code or another placement.
    pub fn image(&self, len: usize) -> Result<Vec<u8>, ImageError> {
        let code = self.encode();
        let mut memory = vec![0u8; len];
        load_image(&mut memory, &code)?;

        let mut written = vec![false; len];
        written[..code.len()].fill(true);
        for placement in &self.data {
            let end = placement
                .addr
                .checked_add(placement.bytes.len())
                .filter(|&end| end <= len)
                .ok_or(ImageError::OutOfRange {
                    addr: placement.addr,
                    len: placement.bytes.len(),
                    capacity: len,
                })?;
            if let Some(offset) = written[placement.addr..end].iter().position(|&w| w) {
                return Err(ImageError::Overlap {
                    addr: placement.addr + offset,
                });
            }
            written[placement.addr..end].fill(true);
            memory[placement.addr..end].copy_from_slice(&placement.bytes);
        }
        Ok(memory)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let program = Program::default();
        assert!(program.is_empty());
        assert_eq!(program.len_bytes(), 0);
        assert_eq!(program.encode(), Vec::<u8>::new());
    }

    #[test]
    fn encodes_addition_sample() {
        let program = Program::default()
            .load(1, 0x10)
            .load(2, 0x12)
            .add(1, 2)
            .store(1, 0x0e)
            .halt();
        assert_eq!(program.len(), 5);
        assert_eq!(program.len_bytes(), 13);
        assert_eq!(
            program.encode(),
            vec![
                0x01, 0x01, 0x10, //
                0x01, 0x02, 0x12, //
                0x03, 0x01, 0x02, //
                0x02, 0x01, 0x0e, //
                0xff,
            ]
        );
    }

    #[test]
    fn image_pads_to_length() {
        let image = Program::default().halt().image(4).unwrap();
        assert_eq!(image, vec![0xff, 0, 0, 0]);
    }

    #[test]
    fn data_lands_at_its_address() {
        let image = Program::default()
            .halt()
            .word(0x10, 255)
            .data(0x12, &[0x03, 0x00])
            .image(20)
            .unwrap();
        assert_eq!(image[0], 0xff);
        assert_eq!(&image[0x10..0x14], &[0xff, 0x00, 0x03, 0x00]);
        assert_eq!(image.len(), 20);
    }

    #[test]
    fn data_overlapping_code_is_rejected() {
        let program = Program::default().load(1, 2).halt().word(3, 7);
        assert_eq!(program.image(20), Err(ImageError::Overlap { addr: 3 }));
    }

    #[test]
    fn data_overlapping_data_is_rejected() {
        let program = Program::default().word(10, 1).word(11, 2);
        assert_eq!(program.image(20), Err(ImageError::Overlap { addr: 11 }));
    }

    #[test]
    fn data_past_the_end_is_rejected() {
        let program = Program::default().word(19, -1);
        assert_eq!(
            program.image(20),
            Err(ImageError::OutOfRange {
                addr: 19,
                len: 2,
                capacity: 20
            })
        );
    }

    #[test]
    fn image_rejects_overflow() {
        let program = Program::default().load(1, 2).load(1, 2);
        assert_eq!(
            program.image(5),
            Err(ImageError::TooLarge {
                image: 6,
                capacity: 5
            })
        );
    }
}

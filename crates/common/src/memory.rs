//! Little-endian value encoding and the reserved tail layout of a buffer.
//!
//! Every multi-byte value in the buffer is a signed 16-bit integer stored
//! low byte first. The tail of the buffer conventionally holds output
//! slots followed by input slots:
//! ```text
//! 00 01 02 ...            len-6 len-5  len-4 len-3  len-2 len-1
//! INSTRUCTIONS ---------> OUT[0]       IN[0]        IN[1]
//! ```

use crate::error::LayoutError;

/// Largest buffer reachable with single-byte addresses.
pub const MAX_BUFFER_LEN: usize = 256;

/// Bytes per value slot.
pub const SLOT_WIDTH: usize = 2;

/// Decode a little-endian pair as a two's-complement i16.
pub fn decode_i16(lo: u8, hi: u8) -> i16 {
    (u16::from(lo) | (u16::from(hi) << 8)) as i16
}

/// Encode an i16 as `[low, high]`.
pub fn encode_i16(value: i16) -> [u8; 2] {
    let bits = value as u16;
    [(bits & 0xFF) as u8, ((bits >> 8) & 0xFF) as u8]
}

/// Read the i16 at `addr..addr+2`, or `None` if any byte is out of bounds.
pub fn read_i16(memory: &[u8], addr: usize) -> Option<i16> {
    let lo = *memory.get(addr)?;
    let hi = *memory.get(addr.checked_add(1)?)?;
    Some(decode_i16(lo, hi))
}

/// Write `value` at `addr..addr+2`. Returns `None` and leaves memory
/// untouched if any byte is out of bounds.
pub fn write_i16(memory: &mut [u8], addr: usize, value: i16) -> Option<()> {
    let end = addr.checked_add(SLOT_WIDTH)?;
    let slot = memory.get_mut(addr..end)?;
    slot.copy_from_slice(&encode_i16(value));
    Some(())
}

/// Placement of the reserved output and input slots at the end of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    len: usize,
    outputs: usize,
    inputs: usize,
}

impl Layout {
    /// Describe a buffer of `len` bytes ending in `outputs` output slots
    /// followed by `inputs` input slots.
    pub fn new(len: usize, outputs: usize, inputs: usize) -> Result<Self, LayoutError> {
        if len > MAX_BUFFER_LEN {
            return Err(LayoutError::TooLarge {
                len,
                max: MAX_BUFFER_LEN,
            });
        }
        let (slots, needed) = outputs
            .checked_add(inputs)
            .and_then(|slots| Some((slots, slots.checked_mul(SLOT_WIDTH)?)))
            .ok_or(LayoutError::SlotCountOverflow { outputs, inputs })?;
        if needed > len {
            return Err(LayoutError::SlotsDoNotFit { slots, needed, len });
        }
        Ok(Self {
            len,
            outputs,
            inputs,
        })
    }

    /// One output slot at `len - 6`, inputs at `len - 4` and `len - 2`.
    pub fn conventional(len: usize) -> Result<Self, LayoutError> {
        Self::new(len, 1, 2)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// First address of the reserved tail. Code lives below this.
    pub fn reserved_start(&self) -> usize {
        self.len - (self.outputs + self.inputs) * SLOT_WIDTH
    }

    /// Address of output slot `index`, if it exists.
    pub fn output_addr(&self, index: usize) -> Option<usize> {
        (index < self.outputs).then(|| self.reserved_start() + index * SLOT_WIDTH)
    }

    /// Address of input slot `index`, if it exists.
    pub fn input_addr(&self, index: usize) -> Option<usize> {
        (index < self.inputs)
            .then(|| self.reserved_start() + (self.outputs + index) * SLOT_WIDTH)
    }

    /// Decode output slot `index` from `memory`.
    pub fn read_output(&self, memory: &[u8], index: usize) -> Option<i16> {
        read_i16(memory, self.output_addr(index)?)
    }

    /// Decode input slot `index` from `memory`.
    pub fn read_input(&self, memory: &[u8], index: usize) -> Option<i16> {
        read_i16(memory, self.input_addr(index)?)
    }

    /// Encode `value` into input slot `index`.
    pub fn write_input(&self, memory: &mut [u8], index: usize, value: i16) -> Option<()> {
        write_i16(memory, self.input_addr(index)?, value)
    }

    /// Decode every output slot.
    pub fn outputs_of(&self, memory: &[u8]) -> Vec<Option<i16>> {
        (0..self.outputs)
            .map(|i| self.read_output(memory, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_low_byte_first() {
        assert_eq!(decode_i16(0x02, 0x01), 258);
        assert_eq!(decode_i16(0xFD, 0x00), 253);
        assert_eq!(decode_i16(0xD4, 0xFF), -44);
    }

    #[test]
    fn encode_negative_value() {
        assert_eq!(encode_i16(-1), [0xFF, 0xFF]);
        assert_eq!(encode_i16(i16::MIN), [0x00, 0x80]);
    }

    #[test]
    fn encode_decode_every_i16() {
        for v in i16::MIN..=i16::MAX {
            let [lo, hi] = encode_i16(v);
            assert_eq!(decode_i16(lo, hi), v);
        }
    }

    #[test]
    fn read_past_end_is_none() {
        let memory = [0u8; 4];
        assert_eq!(read_i16(&memory, 2), Some(0));
        assert_eq!(read_i16(&memory, 3), None);
        assert_eq!(read_i16(&memory, usize::MAX), None);
    }

    #[test]
    fn write_past_end_leaves_memory_untouched() {
        let mut memory = [0u8; 4];
        assert_eq!(write_i16(&mut memory, 3, 0x1234), None);
        assert_eq!(memory, [0; 4]);
        assert_eq!(write_i16(&mut memory, 2, 0x1234), Some(()));
        assert_eq!(memory, [0, 0, 0x34, 0x12]);
    }

    #[test]
    fn conventional_layout_for_twenty_bytes() {
        let layout = Layout::conventional(20).unwrap();
        assert_eq!(layout.output_addr(0), Some(0x0e));
        assert_eq!(layout.input_addr(0), Some(0x10));
        assert_eq!(layout.input_addr(1), Some(0x12));
        assert_eq!(layout.output_addr(1), None);
        assert_eq!(layout.input_addr(2), None);
        assert_eq!(layout.reserved_start(), 14);
    }

    #[test]
    fn multiple_outputs_precede_inputs() {
        let layout = Layout::new(60, 2, 1).unwrap();
        assert_eq!(layout.output_addr(0), Some(54));
        assert_eq!(layout.output_addr(1), Some(56));
        assert_eq!(layout.input_addr(0), Some(58));
    }

    #[test]
    fn slots_must_fit() {
        assert_eq!(
            Layout::conventional(4),
            Err(LayoutError::SlotsDoNotFit {
                slots: 3,
                needed: 6,
                len: 4
            })
        );
        assert!(matches!(
            Layout::conventional(257),
            Err(LayoutError::TooLarge { len: 257, .. })
        ));
    }

    #[test]
    fn huge_slot_counts_are_rejected() {
        assert_eq!(
            Layout::new(20, usize::MAX, 2),
            Err(LayoutError::SlotCountOverflow {
                outputs: usize::MAX,
                inputs: 2
            })
        );
        assert_eq!(
            Layout::new(20, usize::MAX / 2, 1),
            Err(LayoutError::SlotCountOverflow {
                outputs: usize::MAX / 2,
                inputs: 1
            })
        );
        assert!(matches!(
            Layout::new(20, 1_000, 0),
            Err(LayoutError::SlotsDoNotFit { slots: 1_000, .. })
        ));
    }

    #[test]
    fn input_and_output_access() {
        let layout = Layout::conventional(20).unwrap();
        let mut memory = [0u8; 20];
        layout.write_input(&mut memory, 0, 255).unwrap();
        layout.write_input(&mut memory, 1, -3).unwrap();
        assert_eq!(&memory[0x10..0x14], &[0xFF, 0x00, 0xFD, 0xFF]);
        assert_eq!(layout.read_input(&memory, 1), Some(-3));
        memory[0x0e] = 0x02;
        memory[0x0f] = 0x01;
        assert_eq!(layout.outputs_of(&memory), vec![Some(258)]);
    }
}

//! Errors raised while decoding bytes and laying out buffers.

use thiserror::Error;

/// Errors that occur during opcode decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte matches no entry in the opcode table.
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),
}

/// Errors from describing the reserved output/input tail of a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Buffer exceeds what single-byte addresses can reach.
    #[error("buffer length {len} exceeds addressable maximum {max}")]
    TooLarge { len: usize, max: usize },

    /// Reserved slots need more bytes than the buffer has.
    #[error("{slots} reserved slots need {needed} bytes but buffer has {len}")]
    SlotsDoNotFit {
        slots: usize,
        needed: usize,
        len: usize,
    },

    /// Slot counts too large to total without overflowing.
    #[error("slot counts overflow: {outputs} outputs + {inputs} inputs")]
    SlotCountOverflow { outputs: usize, inputs: usize },
}

/// Errors from placing an encoded image into a memory buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Image has more bytes than the target buffer.
    #[error("image of {image} bytes does not fit in buffer of {capacity} bytes")]
    TooLarge { image: usize, capacity: usize },

    /// Data placement runs past the end of the buffer.
    #[error("{len} data bytes at {addr:#04x} do not fit in buffer of {capacity} bytes")]
    OutOfRange {
        addr: usize,
        len: usize,
        capacity: usize,
    },

    /// Data placement overlaps code or an earlier placement.
    #[error("byte at address {addr:#04x} is written twice")]
    Overlap { addr: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_opcode() {
        assert_eq!(
            DecodeError::UnknownOpcode(0x0a).to_string(),
            "unknown opcode: 0x0a"
        );
    }

    #[test]
    fn display_slots_do_not_fit() {
        let err = LayoutError::SlotsDoNotFit {
            slots: 3,
            needed: 6,
            len: 4,
        };
        assert_eq!(err.to_string(), "3 reserved slots need 6 bytes but buffer has 4");
    }

    #[test]
    fn display_image_too_large() {
        let err = ImageError::TooLarge {
            image: 30,
            capacity: 20,
        };
        assert_eq!(
            err.to_string(),
            "image of 30 bytes does not fit in buffer of 20 bytes"
        );
    }
}

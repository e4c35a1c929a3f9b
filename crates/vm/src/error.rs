//! Runtime errors for the regvm engine.
//!
//! Every error raised while executing carries the program counter (`at`)
//! of the faulting instruction. Mutations applied before the fault stay
//! in the buffer.

use thiserror::Error;

/// Errors that stop execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Opcode fetch, operand fetch, or LOAD/STORE target outside the buffer.
    #[error("address {addr:#x} out of bounds at pc {at:#04x}")]
    OutOfBounds { at: usize, addr: usize },

    /// Register operand names the program counter slot or lies past the file.
    #[error("invalid register index {index} at pc {at:#04x}")]
    InvalidRegister { at: usize, index: u8 },

    /// Fetched byte matches no opcode.
    #[error("unknown opcode {byte:#04x} at pc {at:#04x}")]
    UnknownOpcode { at: usize, byte: u8 },

    /// Configured instruction budget ran out before HALT.
    #[error("step limit {limit} exceeded at pc {at:#04x}")]
    StepLimitExceeded { at: usize, limit: u64 },

    /// Buffer is longer than single-byte addresses can reach.
    #[error("buffer of {len} bytes exceeds addressable maximum {max}")]
    BufferTooLarge { len: usize, max: usize },
}

impl RuntimeError {
    /// Program counter of the faulting instruction, when there is one.
    pub fn pc(&self) -> Option<usize> {
        match *self {
            RuntimeError::OutOfBounds { at, .. }
            | RuntimeError::InvalidRegister { at, .. }
            | RuntimeError::UnknownOpcode { at, .. }
            | RuntimeError::StepLimitExceeded { at, .. } => Some(at),
            RuntimeError::BufferTooLarge { .. } => None,
        }
    }
}

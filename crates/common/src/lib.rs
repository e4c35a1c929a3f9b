//! Shared types and encoding for the regvm register machine.
//!
//! This crate provides the data side of the machine:
//!
//! - [`Opcode`] — the closed opcode table with widths
//! - [`Instruction`] — a decoded instruction and its byte encoding
//! - [`Program`] — builds buffer images from instruction lists
//! - [`memory`] — little-endian i16 helpers and the output/input [`Layout`]
//! - [`image`] — loading images into a buffer and dumping a buffer
//!
//! The execution engine lives in `regvm-vm`.

pub mod error;
pub mod image;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, ImageError, LayoutError};
pub use instruction::Instruction;
pub use memory::{Layout, MAX_BUFFER_LEN};
pub use opcode::Opcode;
pub use program::Program;

//! regvm engine — runs bytecode in place over a single byte buffer.
//!
//! The buffer is at once program storage, working memory and I/O: the
//! instruction stream starts at address 0 and results are read back from
//! reserved slots at the end. The machine has:
//! - A register file of signed 16-bit integers
//! - A program counter kept apart from the general-purpose registers
//! - An instruction budget that turns runaway programs into an error
//!
//! # Usage
//!
//! ```
//! use regvm_common::{Layout, Program};
//!
//! let layout = Layout::conventional(20).unwrap();
//! let mut memory: [u8; 20] = Program::default()
//!     .load(1, 0x10)
//!     .load(2, 0x12)
//!     .add(1, 2)
//!     .store(1, 0x0e)
//!     .halt()
//!     .image(20)
//!     .unwrap()
//!     .try_into()
//!     .unwrap();
//! layout.write_input(&mut memory, 0, 255).unwrap();
//! layout.write_input(&mut memory, 1, 3).unwrap();
//!
//! regvm_vm::execute(&mut memory).unwrap();
//! assert_eq!(layout.read_output(&memory, 0), Some(258));
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;

pub use config::{Config, DEFAULT_STEP_LIMIT};
pub use error::RuntimeError;
pub use machine::{Halted, Step, REGISTER_COUNT, VM};

/// Run the program in `memory` to completion with the default config.
///
/// Registers start at zero and are discarded afterwards; effects are
/// visible only through the buffer.
///
/// # Errors
///
/// Returns [`RuntimeError`] on an unknown opcode, an out-of-bounds access,
/// an invalid register operand, or when the default step limit runs out.
pub fn execute<const N: usize>(memory: &mut [u8; N]) -> Result<(), RuntimeError> {
    execute_with(memory, &Config::default()).map(|_| ())
}

/// Run the program in `memory` under `config`, reporting where it halted.
///
/// # Errors
///
/// See [`execute`]. Also fails with [`RuntimeError::BufferTooLarge`] for
/// buffers longer than 256 bytes.
pub fn execute_with(memory: &mut [u8], config: &Config) -> Result<Halted, RuntimeError> {
    let mut vm = VM::with_config(memory, *config)?;
    vm.execute()
}

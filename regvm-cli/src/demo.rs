//! Built-in sample programs with known results.

use regvm_common::{Layout, Program};
use regvm_vm::{Config, RuntimeError};
use tracing::debug;

use crate::EXIT_RUNTIME;

/// A self-checking sample: a program, its inputs and the expected output.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: &'static str,
    pub len: usize,
    pub program: Program,
    pub inputs: Vec<i16>,
    pub expected: i16,
}

/// Why a sample did not produce its expected output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleFailure {
    Runtime(RuntimeError),
    Mismatch { got: Option<i16>, expected: i16 },
    Setup(String),
}

impl Sample {
    /// Build the image, run it, and compare output slot 0.
    pub fn check(&self) -> Result<(), SampleFailure> {
        let layout =
            Layout::conventional(self.len).map_err(|e| SampleFailure::Setup(e.to_string()))?;
        let mut memory = self
            .program
            .image(layout.reserved_start())
            .map_err(|e| SampleFailure::Setup(e.to_string()))?;
        memory.resize(self.len, 0);
        for (index, &value) in self.inputs.iter().enumerate() {
            layout
                .write_input(&mut memory, index, value)
                .ok_or_else(|| SampleFailure::Setup(format!("no input slot {index}")))?;
        }

        let halted = regvm_vm::execute_with(&mut memory, &Config::default())
            .map_err(SampleFailure::Runtime)?;
        debug!(sample = self.name, steps = halted.steps, "sample halted");

        let got = layout.read_output(&memory, 0);
        if got == Some(self.expected) {
            Ok(())
        } else {
            Err(SampleFailure::Mismatch {
                got,
                expected: self.expected,
            })
        }
    }
}

/// LOAD x, LOAD y, <op>, STORE, HALT over the 20-byte layout.
fn binary(op: fn(Program, u8, u8) -> Program) -> Program {
    op(Program::default().load(1, 0x10).load(2, 0x12), 1, 2)
        .store(1, 0x0e)
        .halt()
}

fn unary(op: fn(Program, u8) -> Program) -> Program {
    op(Program::default().load(1, 0x10), 1).store(1, 0x0e).halt()
}

/// All samples in display order.
pub fn samples() -> Vec<Sample> {
    vec![
        Sample {
            name: "255 + 3 = 258",
            len: 20,
            program: binary(Program::add),
            inputs: vec![255, 3],
            expected: 258,
        },
        Sample {
            name: "256 - 3 = 253",
            len: 20,
            program: binary(Program::sub),
            inputs: vec![256, 3],
            expected: 253,
        },
        Sample {
            name: "256 - 300 = -44",
            len: 20,
            program: binary(Program::sub),
            inputs: vec![256, 300],
            expected: -44,
        },
        Sample {
            name: "300 + 1 = 301",
            len: 20,
            program: unary(Program::addi),
            inputs: vec![300],
            expected: 301,
        },
        Sample {
            name: "300 - 1 = 299",
            len: 20,
            program: unary(Program::subi),
            inputs: vec![300],
            expected: 299,
        },
        Sample {
            // 0x00 LOAD r1 in, 0x03 JUMP 0x08, 0x05 STORE r1 out, 0x08 HALT
            name: "jump over store leaves output at 0",
            len: 20,
            program: Program::default()
                .load(1, 0x10)
                .jump(0x08)
                .store(1, 0x0e)
                .halt(),
            inputs: vec![99],
            expected: 0,
        },
        Sample {
            // 0x00 LOAD r1 in, 0x03 BEQZ 0x0c, 0x05 ADD r2 r1, 0x08 SUBI r1,
            // 0x0a JUMP 0x03, 0x0c STORE r2 out, 0x0f HALT
            name: "sum 1..10 = 55",
            len: 50,
            program: Program::default()
                .load(1, 46)
                .beqz(0x0c)
                .add(2, 1)
                .subi(1)
                .jump(0x03)
                .store(2, 44)
                .halt(),
            inputs: vec![10],
            expected: 55,
        },
    ]
}

/// Run every sample, printing progress. Stops at the first failure.
pub fn run_all() -> Result<(), i32> {
    for sample in samples() {
        println!("Testing {}", sample.name);
        if let Err(failure) = sample.check() {
            match failure {
                SampleFailure::Runtime(e) => eprintln!("runtime error: {e}"),
                SampleFailure::Mismatch { got, expected } => {
                    eprintln!("mismatch: expected {expected}, got {got:?}")
                }
                SampleFailure::Setup(msg) => eprintln!("error: {msg}"),
            }
            return Err(EXIT_RUNTIME);
        }
    }
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sample_passes() {
        for sample in samples() {
            assert_eq!(sample.check(), Ok(()), "{}", sample.name);
        }
    }

    #[test]
    fn wrong_expectation_is_reported() {
        let mut sample = samples().remove(0);
        sample.expected = 0;
        assert_eq!(
            sample.check(),
            Err(SampleFailure::Mismatch {
                got: Some(258),
                expected: 0
            })
        );
    }

    #[test]
    fn runtime_fault_is_reported() {
        let sample = Sample {
            name: "bad register",
            len: 20,
            program: Program::default().addi(9).halt(),
            inputs: vec![],
            expected: 0,
        };
        assert_eq!(
            sample.check(),
            Err(SampleFailure::Runtime(RuntimeError::InvalidRegister {
                at: 0,
                index: 9
            }))
        );
    }
}

//! CLI command implementations.

use std::fs;

use regvm_common::image::{dump as render_dump, load_image};
use regvm_common::Layout;
use regvm_vm::Config;
use tracing::{debug, info};

use crate::args::{self, Options};
use crate::{EXIT_INPUT, EXIT_RUNTIME};

/// Load an image, fill inputs, execute and print the output slots.
pub fn run(args: &[String]) -> Result<(), i32> {
    let opts = args::parse(args).inspect_err(|_| {
        eprintln!("Usage: regvm run <image> [--size N] [--outputs N] [--inputs N] [--input V]... [--max-steps N] [--dump]");
    })?;

    let mut memory = read_image(&opts)?;
    let layout = layout_for(&opts, memory.len())?;

    if opts.input_values.len() > layout.inputs() {
        eprintln!(
            "error: {} inputs given but the layout has {} input slots",
            opts.input_values.len(),
            layout.inputs()
        );
        return Err(EXIT_INPUT);
    }
    for (index, &value) in opts.input_values.iter().enumerate() {
        // Index is below layout.inputs(), so the slot exists and fits.
        let _ = layout.write_input(&mut memory, index, value);
    }

    let config = match opts.max_steps {
        Some(step_limit) => Config { step_limit },
        None => Config::from_env(),
    };
    info!(image = %opts.image, len = memory.len(), step_limit = ?config.step_limit, "executing");

    let result = regvm_vm::execute_with(&mut memory, &config);

    match &result {
        Ok(halted) => {
            eprintln!("halted at pc {:#04x} after {} steps", halted.pc, halted.steps);
            for (index, value) in layout.outputs_of(&memory).into_iter().enumerate() {
                if let Some(value) = value {
                    println!("out[{index}] = {value}");
                }
            }
        }
        Err(e) => eprintln!("runtime error: {e}"),
    }

    if opts.dump {
        print!("{}", render_dump(&memory));
    }

    result.map(|_| ()).map_err(|e| {
        debug!(pc = ?e.pc(), "run failed");
        EXIT_RUNTIME
    })
}

/// Print the memory table of an image.
pub fn dump(args: &[String]) -> Result<(), i32> {
    let opts = args::parse_with(args, args::DUMP_FLAGS).inspect_err(|_| {
        eprintln!("Usage: regvm dump <image> [--size N]");
    })?;
    let memory = read_image(&opts)?;
    print!("{}", render_dump(&memory));
    Ok(())
}

/// Run the built-in sample programs and check their results.
pub fn demo(args: &[String]) -> Result<(), i32> {
    if let Some(extra) = args.first() {
        eprintln!("error: unexpected argument '{extra}'");
        return Err(EXIT_INPUT);
    }
    crate::demo::run_all()
}

// --- Helpers ---

/// Read an image file into a buffer of `--size` bytes (or the file length).
fn read_image(opts: &Options) -> Result<Vec<u8>, i32> {
    let bytes = fs::read(&opts.image).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", opts.image);
        EXIT_INPUT
    })?;

    let size = opts.size.unwrap_or(bytes.len());
    if size > regvm_common::MAX_BUFFER_LEN {
        eprintln!(
            "error: buffer size {size} exceeds maximum {}",
            regvm_common::MAX_BUFFER_LEN
        );
        return Err(EXIT_INPUT);
    }

    let mut memory = vec![0u8; size];
    load_image(&mut memory, &bytes).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_INPUT
    })?;
    Ok(memory)
}

/// Slot layout from flags, defaulting to one output and two inputs.
fn layout_for(opts: &Options, len: usize) -> Result<Layout, i32> {
    Layout::new(len, opts.outputs.unwrap_or(1), opts.inputs.unwrap_or(2)).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_INPUT
    })
}

//! regvm CLI — run, inspect and demo register-machine buffer images.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input or image error
//! - 2: Runtime error or failed demo check

use std::process;

use regvm_cli::commands;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `REGVM_LOG=regvm_vm=trace`.
const LOG_ENV: &str = "REGVM_LOG";

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "dump" => commands::dump(&args[2..]),
        "demo" => commands::demo(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_usage() {
    eprintln!("Usage: regvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <image> [options]     Execute a raw buffer image and print output slots");
    eprintln!("  dump <image> [--size N]   Print the memory table of an image");
    eprintln!("  demo                      Run the built-in sample programs");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --size N        Buffer length (default: image length, max 256)");
    eprintln!("  --outputs N     Output slots at the end of the buffer (default 1)");
    eprintln!("  --inputs N      Input slots after the outputs (default 2)");
    eprintln!("  --input V       Value for the next input slot; repeatable");
    eprintln!("  --max-steps N   Instruction budget, 0 or 'none' for unlimited");
    eprintln!("                  (default: $REGVM_STEP_LIMIT or 1000000)");
    eprintln!("  --dump          Print the memory table after execution");
}

//! Flag parsing shared by the subcommands.

use crate::EXIT_INPUT;

/// Options accepted by `run` and `dump`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    /// Path to the raw buffer image.
    pub image: String,
    /// Buffer length; defaults to the image length.
    pub size: Option<usize>,
    pub outputs: Option<usize>,
    pub inputs: Option<usize>,
    /// Values written to the input slots, in order.
    pub input_values: Vec<i16>,
    /// `Some(None)` disables the limit.
    pub max_steps: Option<Option<u64>>,
    pub dump: bool,
}

/// Flags accepted by `run`.
pub const RUN_FLAGS: &[&str] = &[
    "--size",
    "--outputs",
    "--inputs",
    "--input",
    "--max-steps",
    "--dump",
];

/// Flags accepted by `dump`.
pub const DUMP_FLAGS: &[&str] = &["--size"];

/// Parse `<image> [flags]` for `run`. Prints the problem to stderr on failure.
pub fn parse(args: &[String]) -> Result<Options, i32> {
    parse_with(args, RUN_FLAGS)
}

/// Parse `<image> [flags]`, rejecting any flag not in `allowed`.
pub fn parse_with(args: &[String], allowed: &[&str]) -> Result<Options, i32> {
    let mut opts = Options::default();
    let mut image = None;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        if arg.starts_with("--") && !allowed.contains(&arg) {
            eprintln!("error: unknown flag '{arg}'");
            return Err(EXIT_INPUT);
        }
        match arg {
            "--size" => opts.size = Some(value(args, &mut i, arg)?),
            "--outputs" => opts.outputs = Some(value(args, &mut i, arg)?),
            "--inputs" => opts.inputs = Some(value(args, &mut i, arg)?),
            "--input" => opts.input_values.push(value(args, &mut i, arg)?),
            "--max-steps" => {
                let raw: String = value(args, &mut i, arg)?;
                let limit = regvm_vm::config::parse_step_limit(&raw).ok_or_else(|| {
                    eprintln!("error: invalid value '{raw}' for --max-steps");
                    EXIT_INPUT
                })?;
                opts.max_steps = Some(limit);
            }
            "--dump" => opts.dump = true,
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown flag '{flag}'");
                return Err(EXIT_INPUT);
            }
            path => {
                if image.is_some() {
                    eprintln!("error: unexpected argument '{path}'");
                    return Err(EXIT_INPUT);
                }
                image = Some(path.to_string());
            }
        }
        i += 1;
    }

    opts.image = image.ok_or_else(|| {
        eprintln!("error: an image file is required");
        EXIT_INPUT
    })?;
    Ok(opts)
}

/// Consume and parse the value following flag `args[*i]`.
fn value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, i32> {
    *i += 1;
    let raw = args.get(*i).ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        EXIT_INPUT
    })?;
    raw.parse().map_err(|_| {
        eprintln!("error: invalid value '{raw}' for {flag}");
        EXIT_INPUT
    })
}

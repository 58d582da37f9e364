//! utf8mend CLI tool for validating, repairing, and case-folding UTF-8.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use utf8_mend::{count_scalars, locate_invalid, repair, to_lower, to_upper, InvalidRun};

/// Exit codes shared by the subcommands.
mod exit_codes {
    /// Input is valid / operation succeeded.
    pub const SUCCESS: i32 = 0;
    /// Input contained malformed UTF-8 (validate only).
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

#[derive(Debug, Parser)]
#[command(name = "utf8mend")]
#[command(about = "UTF-8 validation and repair toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check files (or stdin) for UTF-8 well-formedness
    Validate(ValidateArgs),
    /// Replace every malformed run with a marker
    Repair(RepairArgs),
    /// Fold ASCII and basic Cyrillic letters to one case
    Fold(FoldArgs),
    /// Count scalar units by leading bytes
    Count(CountArgs),
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    no_color: bool,
}

#[derive(Debug, Parser)]
struct RepairArgs {
    /// Input file (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Marker substituted for each malformed run (may be empty)
    #[arg(short, long, default_value = "\u{FFFD}")]
    replacement: String,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct FoldArgs {
    /// Input file (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Fold to uppercase (default is lowercase)
    #[arg(short, long, conflicts_with = "lower")]
    upper: bool,

    /// Fold to lowercase
    #[arg(short, long)]
    lower: bool,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct CountArgs {
    /// Input files to count (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    files: Vec<PathBuf>,
}

/// ANSI color codes for diagnostics.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                message: "",
                reset: "",
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("utf8mend: {e:#}");
            exit_codes::IO_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Repair(args) => run_repair(args),
        Command::Fold(args) => run_fold(args),
        Command::Count(args) => run_count(args),
    }
}

fn run_validate(args: ValidateArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    if args.files.is_empty() {
        let input = read_stdin()?;
        return Ok(validate_input(&input, None, args.quiet, &scheme));
    }

    let mut worst = exit_codes::SUCCESS;
    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let name = path.to_string_lossy();
                let code = validate_input(&input, Some(&name), args.quiet, &scheme);
                worst = worst.max(code);
            }
            Err(e) => {
                if !args.quiet {
                    eprintln!("utf8mend: {}: {e}", path.display());
                }
                worst = worst.max(exit_codes::IO_ERROR);
            }
        }
    }
    Ok(worst)
}

fn validate_input(input: &[u8], name: Option<&str>, quiet: bool, scheme: &ColorScheme) -> i32 {
    match locate_invalid(input) {
        None => exit_codes::SUCCESS,
        Some(run) => {
            if !quiet {
                report_run(input, name, run, scheme);
            }
            exit_codes::INVALID
        }
    }
}

/// Print a compiler-style diagnostic for a malformed run.
fn report_run(input: &[u8], name: Option<&str>, run: InvalidRun, scheme: &ColorScheme) {
    let (line, column) = line_column(input, run.offset);
    let source = name.unwrap_or("<stdin>");
    let end = usize::min(run.offset + run.length, input.len());
    let bytes = format_bytes(&input[run.offset..end]);

    eprintln!(
        "{loc}{source}:{line}:{column}:{reset} {err}error:{reset} {msg}{run}{reset} [{bytes}]",
        loc = scheme.location,
        err = scheme.error,
        msg = scheme.message,
        reset = scheme.reset,
    );
}

/// Line and column (both 1-indexed, column in bytes) of a byte offset.
fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut line_start = 0;
    for (i, &b) in input[..offset].iter().enumerate() {
        if b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    (line, offset - line_start + 1)
}

/// Hex dump of the run's bytes, e.g. `0xC2` or `0xE0 0x9F 0xBF`.
fn format_bytes(bytes: &[u8]) -> String {
    let parts: Vec<String> = bytes.iter().map(|b| format!("0x{b:02X}")).collect();
    parts.join(" ")
}

fn run_repair(args: RepairArgs) -> Result<i32> {
    let input = read_input(args.input.as_ref())?;
    let fixed = repair(&input, args.replacement.as_bytes());
    write_output(args.output.as_ref(), fixed.as_ref())?;
    Ok(exit_codes::SUCCESS)
}

fn run_fold(args: FoldArgs) -> Result<i32> {
    let input = read_input(args.input.as_ref())?;
    let folded = if args.upper {
        to_upper(&input)
    } else {
        to_lower(&input)
    };
    write_output(args.output.as_ref(), &folded)?;
    Ok(exit_codes::SUCCESS)
}

fn run_count(args: CountArgs) -> Result<i32> {
    if args.files.is_empty() {
        let input = read_stdin()?;
        println!("{}", count_scalars(&input));
        return Ok(exit_codes::SUCCESS);
    }
    for path in &args.files {
        let input =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        println!("{}\t{}", count_scalars(&input), path.display());
    }
    Ok(exit_codes::SUCCESS)
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("failed to read from stdin")?;
    Ok(input)
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => read_stdin(),
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes).context("failed to write to stdout")
        }
    }
}

//! Intcode virtual machine CLI.
//!
//! This binary is the command-line front end to `intcode-vm`. It provides:
//! 1. **Run:** Execute a program against a fixed input list, printing its output as numbers or ASCII text.
//! 2. **Disassemble:** Print a linear listing of one or more program files.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` (e.g. `RUST_LOG=trace`
//! together with `trace_instructions` in the config) to see more.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use intcode_vm::devices::{AsciiLine, LineAssembler, encode_line};
use intcode_vm::isa::disasm;
use intcode_vm::{Config, Machine, Program};

#[derive(Parser, Debug)]
#[command(
    name = "intcode",
    author,
    version,
    about = "Threaded intcode virtual machine",
    long_about = "Run an intcode program or disassemble it.\n\nExamples:\n  intcode run -f day09.txt --input 1\n  intcode run -f day25.txt --ascii --line north --line \"take mug\"\n  intcode disasm day02.txt day05.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and print what it emitted.
    Run {
        /// Program listing to execute.
        #[arg(short, long)]
        file: PathBuf,

        /// Comma-separated input values, consumed in order.
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        input: Vec<i64>,

        /// Text line fed after `--input` as ASCII codes plus newline. Repeatable.
        #[arg(short, long)]
        line: Vec<String>,

        /// Print output as ASCII text; values above 127 are printed as numbers.
        #[arg(long)]
        ascii: bool,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print the disassembly of each program file.
    Disasm {
        /// Program listings to disassemble.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            input,
            line,
            ascii,
            config,
            stats,
        } => cmd_run(&file, input, &line, ascii, config, stats),
        Commands::Disasm { files } => cmd_disasm(&files),
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads `file`, runs it on this thread until halt or fault, and prints its output.
///
/// Output produced before a fault is still printed. On fault the error and
/// statistics (if requested) are reported and the process exits with code 1.
fn cmd_run(
    file: &Path,
    input: Vec<i64>,
    lines: &[String],
    ascii: bool,
    config: Option<PathBuf>,
    stats: bool,
) {
    let config = match config {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let program = Program::from_file(file).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let mut queue: VecDeque<i64> = input.into_iter().collect();
    queue.extend(lines.iter().flat_map(|text| encode_line(text)));
    info!(path = %file.display(), inputs = queue.len(), "running program");

    let mut machine = Machine::with_config(&program, queue, Vec::new(), &config.machine);
    let result = machine.run();

    print_output(machine.output(), ascii);
    if let Err(e) = &result {
        eprintln!("\n[!] FAULT: {e}");
    }
    if stats {
        machine.stats().print();
    }
    if result.is_err() {
        process::exit(1);
    }
}

fn print_output(values: &[i64], ascii: bool) {
    if !ascii {
        for value in values {
            println!("{value}");
        }
        return;
    }
    for line in LineAssembler::decode(values) {
        match line {
            AsciiLine::Text(text) => println!("{text}"),
            AsciiLine::Value(value) => println!("{value}"),
        }
    }
}

/// Prints `<file>:` followed by its listing for every file; exits 1 if any failed to load.
fn cmd_disasm(files: &[PathBuf]) {
    let mut failed = false;
    for path in files {
        match Program::from_file(path) {
            Ok(program) => {
                println!("{}:", path.display());
                println!("{}", disasm::listing(program.words()));
                println!();
            }
            Err(e) => {
                eprintln!("Error: {e}");
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

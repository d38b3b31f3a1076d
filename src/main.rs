use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use ls8_cpu::{isa, CpuState, Ls8Cpu};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Runs an LS-8 program.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Program file: one 8-digit binary literal per line, `#` starts a comment
    program: PathBuf,

    /// Abort if the program has not halted after this many instructions
    #[arg(long, value_name = "N")]
    max_cycles: Option<usize>,

    /// Print a disassembly of the program instead of running it
    #[arg(long)]
    disassemble: bool,

    /// Log more detail to stderr (-v info, -vv debug, -vvv every instruction)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(level_filter(args.verbose))
        .with(stderr_format)
        .init();

    tracing::info!("loading LS-8 program {}", args.program.display());
    let program = ls8_cpu::load_file(&args.program)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.disassemble {
        for line in isa::disassemble(&program) {
            writeln!(out, "{}", line)?;
        }
        return Ok(());
    }

    let mut cpu = Ls8Cpu::with_program(&program)?;
    match args.max_cycles {
        Some(budget) => {
            let batch = cpu
                .execute_cycles(budget, &mut out)
                .with_context(|| format!("execution failed at 0x{:02X}", cpu.pc()))?;
            if batch.state == CpuState::Running {
                bail!("program did not halt within {} cycles", budget);
            }
        }
        None => {
            cpu.run(&mut out)
                .with_context(|| format!("execution failed at 0x{:02X}", cpu.pc()))?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["ls8", "-vv", "--max-cycles", "100", "mult.ls8"]).unwrap();
        assert_eq!(args.program, PathBuf::from("mult.ls8"));
        assert_eq!(args.max_cycles, Some(100));
        assert_eq!(args.verbose, 2);
        assert!(!args.disassemble);
        assert_eq!(level_filter(args.verbose), LevelFilter::DEBUG);
    }

    #[test]
    fn program_is_required() {
        assert!(Args::try_parse_from(["ls8"]).is_err());
    }
}

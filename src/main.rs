use std::{io, path::PathBuf};

use clap::{ArgAction, Parser};
use colored::Colorize;
use hackasm::{Assembler, BuildError, synthesize::out::HackFile};
use tracing::Level;

/// Assembler for the Hack computer
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Assembly source file
    file: PathBuf,

    /// Output file [default: FILE with a .hack extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print an annotated listing after assembling
    #[arg(short, long)]
    dump: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Error> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let Some(module) = args.file.file_name() else {
        return Err(Error::InvalidFile);
    };
    let module = module.to_string_lossy();

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension("hack"));

    let assembler = Assembler::<HackFile>::default();
    let program = match assembler.assemble(&args.file, &out_path) {
        Ok(program) => program,
        Err(BuildError::Assembly(_)) => {
            eprintln!("{:>12} {}", "Failed".bright_red(), module);
            return Err(Error::AssemblyFailed);
        }
        Err(e) => return Err(e.into()),
    };

    if args.dump {
        for emitted in &program.emitted {
            println!(
                "{:>5}  {}  {}",
                emitted.pc.to_string().dimmed(),
                emitted.word,
                emitted.text
            );
        }
    }

    println!(
        "{:>12} {} -> {} ({} words, {} labels, {} variables)",
        "Assembled".bright_green(),
        module,
        out_path.display(),
        program.len(),
        program.labels,
        program.variables
    );

    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("path is not an assembly file")]
    InvalidFile,
    #[error("assembly failed")]
    AssemblyFailed,
    #[error(transparent)]
    Build(#[from] BuildError),
}

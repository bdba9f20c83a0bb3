//! Command-line interface for dotsimplify
//!
//! Usage:
//!   dotsimplify simplify [INPUT] [-o OUTPUT] [--keep-redundant] [--report]
//!   dotsimplify condense <DEPS> <INDEX>... [-o OUTPUT] [--name NAME]
//!
//! `-` or a missing INPUT reads standard input. Diagnostics go to stderr,
//! controlled by RUST_LOG (default `warn`).

use clap::{Parser, Subcommand};
use dotsimplify::{parse, parse_index, render, Condenser, Error, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotsimplify", version, about = "Simplify chapter dependency graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove edges implied by a longer path
    Simplify {
        /// Graph description to read (`-` for stdin)
        input: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Parse and re-render without removing anything
        #[arg(long)]
        keep_redundant: bool,
        /// List removed edges on stderr
        #[arg(long)]
        report: bool,
    },
    /// Collapse a module graph into a chapter graph
    Condense {
        /// Module-level graph description
        deps: PathBuf,
        /// Chapter index documents; the file stem names the chapter
        #[arg(required = true)]
        indexes: Vec<PathBuf>,
        /// Name of the generated graph
        #[arg(long, default_value = "dep2")]
        name: String,
        /// Also remove redundant chapter edges
        #[arg(long)]
        simplify: bool,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Simplify {
            input,
            output,
            keep_redundant,
            report,
        } => {
            let source = read_input(input.as_deref())?;
            let mut graph = parse(&source)?;
            if !keep_redundant {
                let removed = graph.simplify();
                if report {
                    for edge in &removed {
                        eprintln!("removed: {edge}");
                    }
                }
            }
            write_output(output.as_deref(), &render(&graph))
        }
        Command::Condense {
            deps,
            indexes,
            name,
            simplify,
            output,
        } => {
            let modules = parse(&read_input(Some(deps.as_path()))?)?;
            let mut condenser = Condenser::new(name);
            for path in &indexes {
                let chapter = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .ok_or_else(|| Error::io(format!("no file name in {}", path.display())))?;
                let text = read_input(Some(path.as_path()))?;
                condenser.add_chapter(parse_index(chapter, &text));
            }
            let mut chapters = condenser.condense(&modules);
            if simplify {
                chapters.simplify();
            }
            write_output(output.as_deref(), &render(&chapters))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    match path {
        None => {
            std::io::stdin().read_to_string(&mut text)?;
        }
        Some(p) if p == Path::new("-") => {
            std::io::stdin().read_to_string(&mut text)?;
        }
        Some(p) => {
            text = std::fs::read_to_string(p)
                .map_err(|e| Error::io(format!("{}: {e}", p.display())))?;
        }
    }
    Ok(text)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, text)
            .map_err(|e| Error::io(format!("{}: {e}", p.display()))),
        None => {
            std::io::stdout().write_all(text.as_bytes())?;
            Ok(())
        }
    }
}

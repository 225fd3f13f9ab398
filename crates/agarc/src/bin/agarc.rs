/// agar/magar recognizer CLI

use std::path::PathBuf;
use std::process;

use agarc::{Backend, RecognizeOptions, Recognizer};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "agarc")]
#[command(about = "agar/magar recognizer - checks a source file against the LL(1) grammar")]
#[command(version)]
struct Args {
    /// Input source file
    #[arg(value_name = "FILE", required_unless_present = "grammar")]
    input: Option<PathBuf>,

    /// Only print the verdict
    #[arg(short, long)]
    quiet: bool,

    /// Log recoveries and table activity to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Use the recursive-descent recognizer instead of the table
    #[arg(long)]
    descent: bool,

    /// Print productions, FIRST/FOLLOW sets and the table, then exit
    #[arg(long)]
    grammar: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.grammar {
        print!("{}", Recognizer::grammar_report()?);
        return Ok(());
    }

    let input = args.input.context("no input file given")?;
    let backend = if args.descent {
        Backend::Descent
    } else {
        Backend::Table
    };
    let options = RecognizeOptions::new(&input)
        .quiet(args.quiet)
        .verbose(args.verbose)
        .backend(backend);

    let recognizer = Recognizer::new(options);
    let output = recognizer
        .run()
        .with_context(|| format!("failed to recognize {}", input.display()))?;

    for line in output.transcript(recognizer.options().quiet) {
        println!("{}", line);
    }

    match &output.result {
        Ok(summary) => {
            if summary.recoveries > 0 {
                eprintln!("note: {} panic-mode recoveries", summary.recoveries);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
    Ok(())
}

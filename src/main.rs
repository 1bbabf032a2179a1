use std::{
    fs,
    io::{self, BufRead},
};

use clap::Parser;
use qline::{
    interpreter::{dispatcher::Outcome, lexer::LexerOptions, session::Interpreter},
    run_script_with,
};
use tracing_subscriber::EnvFilter;

/// qline interprets a small quantum-circuit command notation, one line at a
/// time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells qline to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of every evaluated line.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Match rule patterns without regard to letter case.
    #[arg(long)]
    case_insensitive: bool,

    /// Reject whitespace between tokens instead of skipping it.
    #[arg(long)]
    keep_whitespace: bool,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// A script, or a path with `--file`. Without it, lines are read from
    /// standard input.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    let options = LexerOptions { case_sensitive:  !args.case_insensitive,
                                 omit_whitespace: !args.keep_whitespace, };

    let Some(contents) = args.contents else {
        repl(options);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
                                         eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                         std::process::exit(1);
                                     })
    } else {
        contents
    };

    if let Err(e) = run_script_with(&script, options, args.pipe_mode) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Interprets standard input line by line. A failing line is reported and
/// the session continues.
fn repl(options: LexerOptions) {
    let mut interpreter = match Interpreter::with_options(options) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read from standard input: {e}");
                std::process::exit(1);
            },
        };

        match interpreter.interpret(&line) {
            Ok(Outcome::Value(value)) => println!("{value}"),
            Ok(Outcome::Assigned { name, value }) => println!("{name} = {value}"),
            Ok(Outcome::Executed(calls)) => {
                for call in calls {
                    match call.value {
                        Some(value) => println!("{} = {value}", call.source),
                        None => println!("{}", call.source),
                    }
                }
            },
            Ok(Outcome::Nothing) => {},
            Err(e) => eprintln!("{e}"),
        }
    }
}

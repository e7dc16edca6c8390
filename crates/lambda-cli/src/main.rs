use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use lambda_eval::{Halt, ReduceConfig, Reducer};
use lambda_syntax::{LambdaParser, LogTracer, NoopTracer, Tracer};
use log::LevelFilter;

mod error;
mod io;

use error::{convert_parse_error, ErrorContext};

#[derive(Parser, Debug)]
#[command(name = "lambda")]
#[command(about = "Untyped lambda calculus interpreter", long_about = None)]
struct Args {
    /// Source file; a single line is read from standard input when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
    /// Trace grammar rules and reduction steps on standard error
    #[arg(short, long)]
    trace: bool,
    /// Maximum number of reduction steps
    #[arg(short = 'n', long, value_name = "STEPS")]
    max_steps: Option<usize>,
    /// Print the parsed term without reducing it
    #[arg(long)]
    parse_only: bool,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None);
    if args.trace {
        builder.filter_module("lambda", LevelFilter::Trace);
    }
    builder.parse_default_env();
    builder.init();
}

fn main() -> miette::Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args);

    let (name, source) = match &args.file {
        Some(path) => (path.display().to_string(), io::read_file(path.clone())?),
        None => ("<stdin>".to_string(), io::read_line()?),
    };
    log::debug!("read {} bytes from {name}", source.len());

    let tracer: &dyn Tracer = if args.trace { &LogTracer } else { &NoopTracer };

    let term = match LambdaParser::new(tracer).parse(&source) {
        Ok(term) => term,
        Err(failure) => {
            println!("{}", failure.message());
            if log::log_enabled!(log::Level::Info) {
                let ctx = ErrorContext {
                    name: &name,
                    source: &source,
                };
                eprintln!("{:?}", miette::Report::new(convert_parse_error(failure, ctx)));
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.parse_only {
        println!("{term}");
        return Ok(ExitCode::SUCCESS);
    }

    let reducer = Reducer::new(
        tracer,
        ReduceConfig {
            max_steps: args.max_steps,
        },
    );
    let reduction = reducer.normalize(term);
    if reduction.halt == Halt::StepLimit {
        log::warn!(
            "stopped after {} steps without reaching a normal form",
            reduction.steps
        );
    }
    println!("{}", reduction.term);

    Ok(ExitCode::SUCCESS)
}

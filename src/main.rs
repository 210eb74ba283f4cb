use std::fs;

use clap::Parser;
use dicelang::{interpreter::evaluator::core::Context, run};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// dicelang is a small bracket-grouped scripting language with built-in dice
/// rolling.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells dicelang to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the last statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Seeds the dice generator so rolls are reproducible.
    #[arg(short, long)]
    seed: Option<u64>,

    contents: String,
}

/// Installs a tracing subscriber, but only when `RUST_LOG` is set so script
/// output stays clean.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                        .with_writer(std::io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut context = args.seed.map_or_else(Context::new, Context::seeded);

    match run(&script, &mut context) {
        Ok(Some(value)) if args.pipe_mode => println!("{value}"),
        Ok(_) => {},
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

use clap::Parser;
use std::path::PathBuf;
use std::process;

use sagviz::error::SagError;
use sagviz::word::Symbol;

/// Sagviz: draw the graph of a double-occurrence word as smooth SVG curves
#[derive(Parser, Debug)]
#[command(
    name = "sagviz",
    about = "Render a double-occurrence word as an SVG of grid-placed vertices and cubic-curve edges",
    version
)]
struct Cli {
    /// The word as comma-separated integers, every symbol exactly twice
    /// (e.g. 0,1,2,0,1,2)
    #[arg(short, long, value_name = "WORD")]
    input: String,
    /// Path to the output SVG file
    #[arg(short, long, value_name = "FILE", default_value = "graph.svg")]
    output: PathBuf,
    /// Seed for the placement tie-break; omit for a fresh random layout
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

fn parse_word(input: &str) -> Result<Vec<Symbol>, SagError> {
    input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<Symbol>()
                .map_err(|_| SagError::InputParse(token.to_string()))
        })
        .collect()
}

fn run(cli: Cli) -> Result<(), SagError> {
    let symbols = parse_word(&cli.input)?;
    sagviz::generate(&symbols, &cli.output, cli.seed)?;
    println!(
        "File {} was successfully generated with {:?}",
        cli.output.display(),
        symbols
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

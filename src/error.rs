// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::word::Symbol;

/// Everything that can go wrong between parsing the word and saving the SVG.
/// All variants are fatal; the pipeline never produces partial output.
#[derive(Debug, Error)]
pub enum SagError {
    /// The input is not a double-occurrence word.
    #[error("an invalid double-occurrence word was passed: symbol {symbol} occurs {count} time(s), expected 2")]
    InvalidWord { symbol: Symbol, count: usize },

    /// The output path does not carry the .svg extension.
    #[error("output file should be *.svg, got {0:?}")]
    InvalidOutputPath(PathBuf),

    /// A token of the comma-separated input could not be parsed as an integer.
    #[error("could not parse {0:?} as an integer symbol")]
    InputParse(String),

    /// The bounded candidate search ran out of shells. Unreachable for valid
    /// double-occurrence words (degree is capped at 4), kept so malformed
    /// adjacency fails loudly instead of spinning.
    #[error("vertex placement starved for symbol {symbol}: no free grid point within shell radius {radius}")]
    PlacementExhausted { symbol: Symbol, radius: u32 },

    /// Every allowed tangent direction at a vertex is already occupied.
    #[error("no unoccupied tangent direction left at symbol {symbol}")]
    DirectionsExhausted { symbol: Symbol },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub mod bezier;
pub mod error;
pub mod geom;
pub mod layout;
pub mod render;
pub mod word;

use std::path::Path;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use error::SagError;
use word::{Symbol, Word};

/// Runs the whole pipeline: validate, place, route, render, save.
///
/// Both validation failures fire before any placement work. `seed` pins the
/// candidate shuffle for reproducible layouts; with `None` a fresh seed is
/// drawn and logged, so any layout can be reproduced after the fact.
///
/// # Errors
///
/// [`SagError::InvalidOutputPath`] when `output` does not end in `.svg`,
/// [`SagError::InvalidWord`] when `symbols` is not a double-occurrence word,
/// [`SagError::Io`] when the final save fails.
pub fn generate(
    symbols: &[Symbol],
    output: &Path,
    seed: Option<u64>,
) -> Result<(), SagError> {
    if !output.to_string_lossy().ends_with(".svg") {
        return Err(SagError::InvalidOutputPath(output.to_path_buf()));
    }
    let word = Word::parse(symbols)?;

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("layout seed: {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let adjacency = word.adjacency();
    let coordinates = layout::place_vertices(&word, &adjacency, &mut rng)?;
    let control_points = bezier::solve_control_points(&word, &coordinates)?;
    let curves = bezier::assemble_curves(&word, &coordinates, &control_points);

    let document = render::render(&word, &coordinates, &curves);
    render::write_svg(output, &document)?;
    Ok(())
}

// src/bezier.rs

// Tangent direction allocation and the control-point pass.
//
// Every consecutive pair of word positions becomes one cubic Bezier curve.
// The two interior control points are tangent handles: at a vertex shared
// with the previous curve the handle is the point reflection of that curve's
// handle, which makes the edge pass through the vertex without a kink.
// Everywhere else the handle direction is picked from a fixed set of eight,
// chosen to pull away from the incident edges.

use log::debug;

use crate::error::SagError;
use crate::geom::Point;
use crate::layout::{VertexCoordinates, SCALE};
use crate::word::{Symbol, Word};

/// Tangent handle length, as a fraction of the grid unit.
pub const HANDLE_LEN: f64 = 0.45;

/// The allowed handle angles in degrees: 12th roots of unity with the 4th
/// roots (0, 90, 180, 270) removed, so no handle ever lies along a grid axis.
const ALLOWED_ANGLES_DEG: [f64; 8] = [30.0, 60.0, 120.0, 150.0, 210.0, 240.0, 300.0, 330.0];

/// One edge of the drawing: endpoints `p0`/`p3` are vertex coordinates,
/// `p1`/`p2` the tangent handles at either end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Tangent handles per word position: `start[i]` belongs to `word[i]`,
/// `end[i]` to `word[i+1]`, both for the curve between them.
#[derive(Debug, Clone)]
pub struct ControlPoints {
    pub start: Vec<Point>,
    pub end: Vec<Point>,
}

fn allowed_directions() -> [Point; 8] {
    ALLOWED_ANGLES_DEG.map(|degrees| {
        let angle = degrees.to_radians();
        Point::new(
            HANDLE_LEN * SCALE * angle.sin(),
            HANDLE_LEN * SCALE * angle.cos(),
        )
    })
}

/// Directions whose handle position is still free at `vertex`. A direction
/// counts as occupied when `vertex + dir` or `vertex - dir` coincides with
/// any handle assigned so far, at any vertex, not just this one.
fn unoccupied_directions(
    vertex: &Point,
    start: &[Option<Point>],
    end: &[Option<Point>],
) -> Vec<Point> {
    let assigned: Vec<Point> = start
        .iter()
        .chain(end.iter())
        .filter_map(|slot| *slot)
        .collect();
    allowed_directions()
        .into_iter()
        .filter(|&dir| {
            let forward = *vertex + dir;
            let backward = *vertex - dir;
            !assigned
                .iter()
                .any(|cp| cp.approx_eq(&forward) || cp.approx_eq(&backward))
        })
        .collect()
}

/// Minimax direction choice. With one incident edge, pull straight away from
/// it is worst, toward it is best -- the original maximizes the dot product
/// with the single neighbor vector. With two incident edges the score is
/// `min(dot(v0, c), -dot(v1, c))`, balancing both at once. First maximal
/// candidate wins, matching the reference tie behavior.
fn best_direction(vectors: &[Point], candidates: &[Point]) -> Option<Point> {
    let score = |candidate: &Point| -> f64 {
        match vectors {
            [] => 0.0,
            [v] => v.dot(candidate),
            [v0, v1, ..] => v0.dot(candidate).min(-v1.dot(candidate)),
        }
    };
    let mut best: Option<(Point, f64)> = None;
    for &candidate in candidates {
        let s = score(&candidate);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((candidate, s)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Vectors from the vertex at word position `at` toward the vertices at the
/// given word positions, skipping positions outside the word.
fn neighbor_vectors(
    symbols: &[Symbol],
    coordinates: &VertexCoordinates,
    at: usize,
    positions: [isize; 2],
) -> Vec<Point> {
    let origin = coordinates[&symbols[at]];
    positions
        .into_iter()
        .filter(|&pos| pos >= 0 && (pos as usize) < symbols.len())
        .map(|pos| coordinates[&symbols[pos as usize]] - origin)
        .collect()
}

/// Fills both handle arrays in one strict left-to-right pass.
///
/// `start[i]` depends on `end[i-1]` through the reflection rule, so the order
/// of evaluation is part of the algorithm: each slot is computed exactly
/// once, either by reflecting an already-filled neighboring slot or by a
/// fresh direction search.
pub fn solve_control_points(
    word: &Word,
    coordinates: &VertexCoordinates,
) -> Result<ControlPoints, SagError> {
    let symbols = word.symbols();
    let curve_count = symbols.len().saturating_sub(1);
    let mut start: Vec<Option<Point>> = vec![None; curve_count];
    let mut end: Vec<Option<Point>> = vec![None; curve_count];

    for i in 0..curve_count {
        let at_start = coordinates[&symbols[i]];
        let from_previous = i.checked_sub(1).and_then(|j| end[j]);
        start[i] = Some(match from_previous {
            Some(previous) => previous.reflect_through(&at_start),
            None => {
                let vectors = neighbor_vectors(
                    symbols,
                    coordinates,
                    i,
                    [i as isize + 1, i as isize - 1],
                );
                let candidates = unoccupied_directions(&at_start, &start, &end);
                let direction = best_direction(&vectors, &candidates).ok_or(
                    SagError::DirectionsExhausted { symbol: symbols[i] },
                )?;
                at_start + direction
            }
        });

        let at_end = coordinates[&symbols[i + 1]];
        let from_next = start.get(i + 1).copied().flatten();
        end[i] = Some(match from_next {
            Some(next) => next.reflect_through(&at_end),
            None => {
                let vectors = neighbor_vectors(
                    symbols,
                    coordinates,
                    i + 1,
                    [i as isize, i as isize + 2],
                );
                let candidates = unoccupied_directions(&at_end, &start, &end);
                let direction = best_direction(&vectors, &candidates).ok_or(
                    SagError::DirectionsExhausted {
                        symbol: symbols[i + 1],
                    },
                )?;
                at_end + direction
            }
        });
    }

    debug!("solved {} control point pairs", curve_count);
    Ok(ControlPoints {
        start: start.into_iter().flatten().collect(),
        end: end.into_iter().flatten().collect(),
    })
}

/// Packages one [`CubicBezier`] per consecutive word pair, in word order.
/// A symbol pair visited twice yields two distinct curves.
pub fn assemble_curves(
    word: &Word,
    coordinates: &VertexCoordinates,
    control_points: &ControlPoints,
) -> Vec<CubicBezier> {
    let symbols = word.symbols();
    (0..control_points.start.len())
        .map(|i| CubicBezier {
            p0: coordinates[&symbols[i]],
            p1: control_points.start[i],
            p2: control_points.end[i],
            p3: coordinates[&symbols[i + 1]],
        })
        .collect()
}

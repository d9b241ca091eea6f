// src/layout.rs

// Breadth-first grid placement of the word's vertices.
//
// The first symbol sits at the origin; every other vertex takes one of the 4
// nearest unoccupied grid points around its BFS parent, searched as an
// expanding L1 diamond. A final distortion pass knocks coordinates off exact
// grid alignment so that unrelated vertices cannot share tangent handle
// positions later on.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SagError;
use crate::geom::{Point, EPS};
use crate::word::{Adjacency, Symbol, Word};

/// Grid spacing between candidate vertex positions.
pub const SCALE: f64 = 150.0;

const DISTORTION_X: f64 = 0.08;
const DISTORTION_Y: f64 = 0.28;

/// Coordinates per symbol, in BFS discovery order. The renderer draws vertex
/// markers in exactly this order.
pub type VertexCoordinates = IndexMap<Symbol, Point>;

/// Assigns every distinct symbol a unique coordinate.
///
/// The shuffle is the only source of nondeterminism in the whole pipeline;
/// callers inject the rng so a fixed seed reproduces the layout exactly.
///
/// # Errors
///
/// [`SagError::PlacementExhausted`] if the diamond search exceeds its radius
/// bound. Cannot happen for a valid double-occurrence word (degree <= 4), but
/// a malformed adjacency must fail loudly instead of expanding forever.
pub fn place_vertices(
    word: &Word,
    adjacency: &Adjacency,
    rng: &mut impl Rng,
) -> Result<VertexCoordinates, SagError> {
    let mut coordinates: VertexCoordinates = IndexMap::new();
    if word.is_empty() {
        return Ok(coordinates);
    }

    // Enough shells to host every vertex with room to spare: a diamond of
    // radius r covers 2r(r+1) grid points, so this bound is far beyond what
    // n occupied points can starve.
    let max_radius = 2 * word.distinct_count() as u32 + 4;

    let root = word.symbols()[0];
    coordinates.insert(root, Point::ORIGIN);
    let mut visited: IndexSet<Symbol> = IndexSet::from([root]);
    let mut queue: VecDeque<Symbol> = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        let mut candidates =
            unoccupied_candidates(current, &coordinates, max_radius)?;
        candidates.make_contiguous().shuffle(rng);
        sort_candidates(&mut candidates, &coordinates[&current]);
        candidates.truncate(4);

        if let Some(neighbors) = adjacency.get(&current) {
            for &neighbor in neighbors {
                if visited.contains(&neighbor) {
                    continue;
                }
                let point = candidates.pop_front().ok_or(
                    SagError::PlacementExhausted {
                        symbol: current,
                        radius: max_radius,
                    },
                )?;
                coordinates.insert(neighbor, point);
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    distort(&mut coordinates);
    debug!(
        "placed {} vertices (grid unit {})",
        coordinates.len(),
        SCALE
    );
    Ok(coordinates)
}

/// Collects unoccupied grid points around `current` by expanding L1 diamond
/// shells until at least 4 have accumulated.
fn unoccupied_candidates(
    current: Symbol,
    coordinates: &VertexCoordinates,
    max_radius: u32,
) -> Result<VecDeque<Point>, SagError> {
    let center = coordinates[&current];
    let mut candidates: VecDeque<Point> = VecDeque::new();
    let mut radius = 1u32;
    while candidates.len() < 4 {
        if radius > max_radius {
            return Err(SagError::PlacementExhausted {
                symbol: current,
                radius: max_radius,
            });
        }
        for dx in 0..=radius {
            let dy = radius - dx;
            // Sign combinations, deduplicated on the axes where one offset
            // component is zero.
            let signs: &[(f64, f64)] = if dx == 0 {
                &[(1.0, 1.0), (1.0, -1.0)]
            } else if dy == 0 {
                &[(1.0, 1.0), (-1.0, 1.0)]
            } else {
                &[(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)]
            };
            for &(sx, sy) in signs {
                let point = Point::new(
                    center.x + SCALE * sx * dx as f64,
                    center.y + SCALE * sy * dy as f64,
                );
                let occupied =
                    coordinates.values().any(|coord| coord.approx_eq(&point));
                if !occupied {
                    candidates.push_back(point);
                }
            }
        }
        radius += 1;
    }
    Ok(candidates)
}

/// Stable sort by shell distance first, then by distance from the origin.
/// Run after a shuffle, so candidates with identical keys keep a random
/// relative order.
fn sort_candidates(candidates: &mut VecDeque<Point>, current: &Point) {
    let key = |p: &Point| 1e10 * p.l1_dist(current) + p.l2_dist_sq(&Point::ORIGIN);
    candidates
        .make_contiguous()
        .sort_by(|a, b| key(a).total_cmp(&key(b)));
}

/// Shifts coordinates sitting on odd grid rows/columns by a fraction of the
/// grid unit. Without this, vertices on the same grid line would produce
/// coinciding tangent handle positions and fight over directions.
fn distort(coordinates: &mut VertexCoordinates) {
    for point in coordinates.values_mut() {
        // The EPS nudge keeps exact grid multiples from truncating one short.
        if (point.y.abs() / SCALE + EPS) as i64 % 2 == 1 {
            point.y += SCALE * DISTORTION_Y;
        }
        if (point.x.abs() / SCALE + EPS) as i64 % 2 == 1 {
            point.x += SCALE * DISTORTION_X;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layout(symbols: &[Symbol], seed: u64) -> VertexCoordinates {
        let word = Word::parse(symbols).unwrap();
        let adjacency = word.adjacency();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        place_vertices(&word, &adjacency, &mut rng).unwrap()
    }

    #[test]
    fn test_first_symbol_starts_at_origin_before_distortion() {
        // The origin lands in even grid row and column, so distortion leaves
        // it untouched.
        let coords = layout(&[0, 0], 1);
        assert_eq!(coords.len(), 1);
        assert!(coords[&0].approx_eq(&Point::ORIGIN));
    }

    #[test]
    fn test_every_symbol_gets_one_coordinate() {
        let coords = layout(&[0, 1, 2, 0, 1, 2], 7);
        assert_eq!(coords.len(), 3);
    }

    #[test]
    fn test_no_two_coordinates_collide() {
        let coords = layout(&[0, 1, 2, 3, 0, 2, 1, 3], 42);
        let points: Vec<&Point> = coords.values().collect();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                assert!(
                    !points[i].approx_eq(points[j]),
                    "vertices {i} and {j} collide"
                );
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let a = layout(&[0, 1, 2, 3, 0, 2, 1, 3], 99);
        let b = layout(&[0, 1, 2, 3, 0, 2, 1, 3], 99);
        assert_eq!(a.len(), b.len());
        for (symbol, point) in &a {
            assert!(b[symbol].approx_eq(point));
        }
    }

    #[test]
    fn test_shell_enumeration_dedupes_axis_points() {
        // With only the root occupied, shell 1 yields exactly 4 points:
        // (+-SCALE, 0) and (0, +-SCALE), no duplicates.
        let mut coordinates: VertexCoordinates = IndexMap::new();
        coordinates.insert(0, Point::ORIGIN);
        let candidates = unoccupied_candidates(0, &coordinates, 8).unwrap();
        assert_eq!(candidates.len(), 4);
        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                assert!(!candidates[i].approx_eq(&candidates[j]));
            }
        }
    }

    #[test]
    fn test_candidates_prefer_inner_shells() {
        // Occupy the origin plus one shell-1 point; the remaining shell-1
        // points must still rank ahead of any shell-2 point.
        let mut coordinates: VertexCoordinates = IndexMap::new();
        coordinates.insert(0, Point::ORIGIN);
        coordinates.insert(1, Point::new(SCALE, 0.0));
        let mut candidates = unoccupied_candidates(0, &coordinates, 8).unwrap();
        sort_candidates(&mut candidates, &Point::ORIGIN);
        candidates.truncate(4);
        // Three free shell-1 points rank first; the fourth slot falls to
        // shell 2.
        for point in candidates.iter().take(3) {
            assert!(point.l1_dist(&Point::ORIGIN) < SCALE + EPS);
        }
        assert!(candidates[3].l1_dist(&Point::ORIGIN) > SCALE + EPS);
    }
}

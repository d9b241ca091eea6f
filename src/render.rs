// src/render.rs

// SVG assembly. The document is built entirely in memory and written in one
// shot, so a failing run never leaves a partial artifact behind.

use std::io;
use std::path::Path as FsPath;

use log::debug;
use svg::node::element::{Circle, Group, Path, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::bezier::CubicBezier;
use crate::geom::Point;
use crate::layout::VertexCoordinates;
use crate::word::Word;

const NODE_RADIUS: f64 = 4.0;
const STROKE_WIDTH: f64 = 0.5;
const PADDING: f64 = 100.0;

/// Fill for the markers of the word's first and last symbol.
const HIGHLIGHT_FILL: &str = "red";
const DEFAULT_FILL: &str = "white";

/// Axis-aligned bounding box over every vertex and every curve point,
/// including the tangent handles (a handle can stick out past all vertices).
fn bounding_box(coordinates: &VertexCoordinates, curves: &[CubicBezier]) -> (Point, Point) {
    let mut min = Point::new(f64::MAX, f64::MAX);
    let mut max = Point::new(f64::MIN, f64::MIN);
    let mut extend = |p: &Point| {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    };
    for point in coordinates.values() {
        extend(point);
    }
    for curve in curves {
        extend(&curve.p0);
        extend(&curve.p1);
        extend(&curve.p2);
        extend(&curve.p3);
    }
    if coordinates.is_empty() && curves.is_empty() {
        (Point::ORIGIN, Point::ORIGIN)
    } else {
        (min, max)
    }
}

/// Builds the complete SVG document: a white background, then one group
/// holding all edge curves in word order followed by all vertex markers in
/// placement order, so markers always sit on top of edges.
pub fn render(
    word: &Word,
    coordinates: &VertexCoordinates,
    curves: &[CubicBezier],
) -> Document {
    let (min, max) = bounding_box(coordinates, curves);
    let width = max.x - min.x + 2.0 * PADDING;
    let height = max.y - min.y + 2.0 * PADDING;
    // Shift everything so the padded bounding box starts at (0, 0).
    let adjust = |p: &Point| (p.x - min.x + PADDING, p.y - min.y + PADDING);

    let background = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", "100%")
        .set("height", "100%")
        .set("fill", "white");

    let mut graph = Group::new().set("id", "graph");

    for curve in curves {
        let (x0, y0) = adjust(&curve.p0);
        let (x1, y1) = adjust(&curve.p1);
        let (x2, y2) = adjust(&curve.p2);
        let (x3, y3) = adjust(&curve.p3);
        let path = Path::new()
            .set(
                "d",
                format!("M {x0},{y0} C {x1},{y1} {x2},{y2} {x3},{y3}"),
            )
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        graph = graph.add(path);
    }

    let endpoints = word.endpoints();
    for (&symbol, point) in coordinates {
        let (x, y) = adjust(point);
        let highlighted = endpoints
            .map(|(first, last)| symbol == first || symbol == last)
            .unwrap_or(false);
        let fill = if highlighted {
            HIGHLIGHT_FILL
        } else {
            DEFAULT_FILL
        };
        let marker = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", NODE_RADIUS)
            .set("fill", fill)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let label = Text::new()
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-size", NODE_RADIUS * 1.3)
            .set("font-weight", "bold")
            .add(TextNode::new(symbol.to_string()));
        graph = graph.add(marker).add(label);
    }

    debug!(
        "rendered {} curves and {} vertices into a {:.0}x{:.0} canvas",
        curves.len(),
        coordinates.len(),
        width,
        height
    );

    Document::new()
        .set("width", width)
        .set("height", height)
        .add(background)
        .add(graph)
}

/// Saves the document. Writing is the only I/O of the whole pipeline.
pub fn write_svg<P: AsRef<FsPath>>(path: P, document: &Document) -> io::Result<()> {
    svg::save(path, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::{assemble_curves, solve_control_points};
    use crate::layout::place_vertices;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rendered(symbols: &[i64], seed: u64) -> String {
        let word = Word::parse(symbols).unwrap();
        let adjacency = word.adjacency();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let coordinates = place_vertices(&word, &adjacency, &mut rng).unwrap();
        let control_points = solve_control_points(&word, &coordinates).unwrap();
        let curves = assemble_curves(&word, &coordinates, &control_points);
        render(&word, &coordinates, &curves).to_string()
    }

    #[test]
    fn test_document_has_background_and_group() {
        let markup = rendered(&[0, 1, 0, 1], 2);
        assert!(markup.contains("fill=\"white\""));
        assert!(markup.contains("id=\"graph\""));
    }

    #[test]
    fn test_element_counts_match_word() {
        // 3 distinct symbols -> 3 circles, word length 6 -> 5 paths.
        let markup = rendered(&[0, 1, 2, 0, 1, 2], 13);
        assert_eq!(markup.matches("<circle").count(), 3);
        assert_eq!(markup.matches("<path").count(), 5);
    }

    #[test]
    fn test_curves_come_before_markers() {
        let markup = rendered(&[0, 1, 2, 0, 1, 2], 13);
        let last_path = markup.rfind("<path").unwrap();
        let first_circle = markup.find("<circle").unwrap();
        assert!(last_path < first_circle);
    }

    #[test]
    fn test_word_endpoints_are_highlighted() {
        // word[0] = 0 and word[5] = 2 are red, symbol 1 stays white.
        let markup = rendered(&[0, 1, 2, 0, 1, 2], 13);
        assert_eq!(markup.matches(&format!("fill=\"{HIGHLIGHT_FILL}\"")).count(), 2);
    }

    #[test]
    fn test_self_loop_highlights_its_single_vertex() {
        let markup = rendered(&[0, 0], 1);
        assert_eq!(markup.matches("<circle").count(), 1);
        assert_eq!(markup.matches(&format!("fill=\"{HIGHLIGHT_FILL}\"")).count(), 1);
    }
}

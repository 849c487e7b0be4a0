//! Canvas footprints of placed objects
//!
//! Derives an ordered, clockwise canvas-space vertex list for any
//! furniture object regardless of its native geometry kind. Devices and
//! structures deliberately have no footprint here: only furniture
//! participates in boundary and area computations.

use crate::error::LayoutError;
use crate::geometry::{Geometry, Point, RadarPoint};
use crate::object::BaseObject;
use crate::transform::to_radar_coordinate;

/// Canvas-space vertices of an object, clockwise.
///
/// - point: empty (devices have no footprint)
/// - rectangle: stored `[TR, TL, BR, BL]` reordered to `[TL, TR, BR, BL]`
/// - circle: corners of the bounding square, clockwise from top-right
/// - line: `[start, end]`
/// - polygon: vertices as stored
/// - sector: empty (render-only shape)
///
/// Non-furniture objects always yield an empty list.
pub fn object_vertices(obj: &BaseObject) -> Vec<Point> {
    if !obj.is_furniture() {
        return Vec::new();
    }

    match &obj.geometry {
        Geometry::Point(_) => Vec::new(),
        Geometry::Rectangle(rect) => {
            let v = &rect.vertices;
            vec![v[1], v[0], v[2], v[3]]
        }
        Geometry::Circle(circle) => {
            let (c, r) = (circle.center, circle.radius);
            vec![
                Point::with_z(c.x + r, c.y - r, c.z),
                Point::with_z(c.x + r, c.y + r, c.z),
                Point::with_z(c.x - r, c.y + r, c.z),
                Point::with_z(c.x - r, c.y - r, c.z),
            ]
        }
        Geometry::Line(line) => vec![line.start, line.end],
        Geometry::Polygon(poly) => poly.vertices.clone(),
        Geometry::Sector(_) => Vec::new(),
    }
}

/// Arithmetic mean of the object's footprint vertices; the origin for
/// objects without a footprint.
pub fn object_center(obj: &BaseObject) -> Point {
    let vertices = object_vertices(obj);
    if vertices.is_empty() {
        return Point::default();
    }

    let n = vertices.len() as f64;
    let (sx, sy, sz) = vertices
        .iter()
        .fold((0.0, 0.0, 0.0), |(sx, sy, sz), v| (sx + v.x, sy + v.y, sz + v.z));
    Point {
        x: sx / n,
        y: sy / n,
        z: sz / n,
    }
}

/// Round to the nearest multiple of 10 cm, the radar's area resolution
fn round_to_ten(value: f64) -> f64 {
    (value / 10.0).round() * 10.0
}

/// The object's footprint in `radar`'s frame, quantized and sorted.
///
/// Each canvas vertex is converted to the radar frame, rounded to the
/// hardware's 10 cm grid, then sorted by v ascending and h ascending
/// within a v tie (ties closer than one unit in v count as equal).
pub fn object_vertices_in_radar(
    obj: &BaseObject,
    radar: &BaseObject,
) -> Result<Vec<RadarPoint>, LayoutError> {
    if !obj.is_furniture() {
        return Ok(Vec::new());
    }

    let mut vertices = object_vertices(obj)
        .iter()
        .map(|v| to_radar_coordinate(v.x, v.y, radar))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|p| RadarPoint {
            h: round_to_ten(p.h),
            v: round_to_ten(p.v),
            z: round_to_ten(p.z),
        })
        .collect::<Vec<_>>();

    vertices.sort_by(|a, b| {
        if (a.v - b.v).abs() < 1.0 {
            a.h.total_cmp(&b.h)
        } else {
            a.v.total_cmp(&b.v)
        }
    });

    Ok(vertices)
}

//! Geometry primitives for the layout canvas
//!
//! Canvas coordinate system: origin at the top centre of the room,
//! +x to the right, +y downwards, units in centimeters. The optional
//! z coordinate is elevation above the floor.
//!
//! Radar coordinate system: origin at the radar's own position, with a
//! "horizontal" H axis and "vertical" (depth) V axis whose sign
//! conventions depend on the install mode; see [`crate::transform`].

use serde::{Deserialize, Serialize};

/// A position on the canvas, in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Elevation, defaults to floor level
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }
}

/// A position in a radar's local frame, in centimeters relative to the
/// radar's own position. Never persisted outside radar configuration and
/// report structures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarPoint {
    /// Horizontal distance from the radar
    pub h: f64,
    /// Vertical (depth) distance from the radar
    pub v: f64,
    #[serde(default)]
    pub z: f64,
}

impl RadarPoint {
    pub fn new(h: f64, v: f64) -> Self {
        RadarPoint { h, v, z: 0.0 }
    }
}

/// A line segment, used for walls and other linear structures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub start: Point,
    pub end: Point,
    /// Stroke width for rendering, default 2
    #[serde(default = "default_thickness")]
    pub thickness: f64,
}

fn default_thickness() -> f64 {
    2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// A sector, used to render corner-mounted radar coverage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub center: Point,
    pub left_point: Point,
    pub right_point: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_angle: Option<f64>,
}

/// An axis-aligned or rotated rectangle.
///
/// The four vertices are stored in a fixed order:
/// `[top-right, top-left, bottom-right, bottom-left]`. Downstream edge
/// drawing and the footprint extraction rely on this exact ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub vertices: [Point; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    pub vertices: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
}

/// Shape of a placed object
///
/// Devices are always points; furniture and structures may take any of
/// the other shapes. Consumers must match exhaustively so a new shape
/// kind cannot silently fall through a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Sector(Sector),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Geometry {
    /// Shape name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Line(_) => "line",
            Geometry::Circle(_) => "circle",
            Geometry::Sector(_) => "sector",
            Geometry::Rectangle(_) => "rectangle",
            Geometry::Polygon(_) => "polygon",
        }
    }

    /// The anchor position if this is a point geometry
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }
}

/// Ray-casting point-in-polygon test.
///
/// Casts a horizontal ray to the right of `point` and toggles an inside
/// flag for every polygon edge it crosses. Needs at least 3 vertices;
/// fewer always yields `false`. Points exactly on an edge may be
/// classified either way depending on floating-point rounding.
pub fn point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;

    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        // Edge crosses the ray's y level?
        if (yi > y) != (yj > y) {
            let intersect_x = (xj - xi) * (y - yi) / (yj - yi) + xi;
            if x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

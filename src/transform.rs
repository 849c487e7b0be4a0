//! Canvas <-> radar coordinate transforms
//!
//! Canvas frame: origin at the top centre of the room, +x right, +y
//! down. Radar frame: origin at the radar's own position, +H pointing
//! toward canvas -x before rotation, +V toward canvas +y.
//!
//! The H axis mirror means the radar's externally-stated rotation angle
//! (degrees, counter-clockwise positive in canvas space) must be negated
//! before the standard rotation matrix is applied, otherwise the
//! counter-clockwise convention would flip after the mirror. Both
//! directions use theta = -angle so the round-trip is exact.

use nalgebra::{Rotation2, Vector2};

use crate::error::LayoutError;
use crate::geometry::{Point, RadarPoint};
use crate::object::BaseObject;

/// The radar's canvas position, i.e. the translation origin of its frame.
///
/// Only point-geometry objects can anchor a transform; anything else is
/// a caller-side invariant violation.
fn radar_center(radar: &BaseObject) -> Result<&Point, LayoutError> {
    radar
        .geometry
        .as_point()
        .ok_or_else(|| LayoutError::NotPointGeometry {
            id: radar.id.clone(),
            kind: radar.geometry.kind(),
        })
}

fn rotation(radar: &BaseObject) -> Rotation2<f64> {
    Rotation2::new(-radar.rotation_deg().to_radians())
}

/// Convert a radar-frame point to canvas coordinates.
///
/// Mirror H into x, keep V as y, rotate by the negated radar angle,
/// then translate by the radar position. Elevation carries the radar's
/// own z.
pub fn to_canvas_coordinate(
    radar_point: &RadarPoint,
    radar: &BaseObject,
) -> Result<Point, LayoutError> {
    let center = radar_center(radar)?;

    let local = Vector2::new(-radar_point.h, radar_point.v);
    let rotated = rotation(radar) * local;

    Ok(Point {
        x: center.x + rotated.x,
        y: center.y + rotated.y,
        z: center.z,
    })
}

/// Convert a canvas position to the radar's frame.
///
/// Exact inverse of [`to_canvas_coordinate`]: translate relative to the
/// radar, undo the rotation, then invert the axis mapping. Radar reports
/// carry no elevation, so z is always 0.
pub fn to_radar_coordinate(
    canvas_x: f64,
    canvas_y: f64,
    radar: &BaseObject,
) -> Result<RadarPoint, LayoutError> {
    let center = radar_center(radar)?;

    let local = Vector2::new(canvas_x - center.x, canvas_y - center.y);
    let unrotated = rotation(radar).inverse() * local;

    Ok(RadarPoint {
        h: -unrotated.x,
        v: unrotated.y,
        z: 0.0,
    })
}

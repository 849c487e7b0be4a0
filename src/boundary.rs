//! Radar field-of-view boundaries and containment queries
//!
//! Builds the per-install-mode boundary quadrilateral in canvas space
//! and answers "is this object inside this radar's field of view", both
//! exactly (true polygon containment) and with a tolerance-expanded
//! axis-aligned bounding box, which is the cheaper test used for area
//! membership.

use std::f64::consts::FRAC_PI_2;

use crate::error::LayoutError;
use crate::footprint::object_vertices;
use crate::geometry::{point_in_polygon, Point, RadarPoint};
use crate::object::{BaseObject, InstallMode};
use crate::transform::to_canvas_coordinate;

/// Margin added around the boundary box for area membership, cm
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 20.0;

/// The radar's field-of-view quadrilateral in canvas coordinates.
///
/// Ceiling mode surrounds the radar on all four sides; wall mode pins
/// the rear edge to the wall (rearV forced to 0); corner mode is a
/// leftH x rightH box anchored at the radar and rotated so its diagonal
/// points along +V.
///
/// A radar without a boundary configuration has a defined empty field
/// of view: the result is an empty list, not an error. Non-point radar
/// geometry is an error.
pub fn radar_boundary_vertices(radar: &BaseObject) -> Result<Vec<Point>, LayoutError> {
    let Some(config) = radar.radar_config() else {
        return Ok(Vec::new());
    };
    let Some(boundary) = config.boundary else {
        return Ok(Vec::new());
    };

    let radar_vertices: Vec<RadarPoint> = match config.install_model {
        InstallMode::Ceiling => vec![
            RadarPoint::new(-boundary.right_h, -boundary.rear_v),
            RadarPoint::new(boundary.left_h, -boundary.rear_v),
            RadarPoint::new(-boundary.right_h, boundary.front_v),
            RadarPoint::new(boundary.left_h, boundary.front_v),
        ],
        InstallMode::Wall => vec![
            RadarPoint::new(-boundary.right_h, 0.0),
            RadarPoint::new(boundary.left_h, 0.0),
            RadarPoint::new(-boundary.right_h, boundary.front_v),
            RadarPoint::new(boundary.left_h, boundary.front_v),
        ],
        InstallMode::Corner => {
            let (left_h, right_h) = (boundary.left_h, boundary.right_h);

            // Rotate the box about the radar so the corner diagonal
            // points along +V.
            let diagonal_angle = right_h.atan2(left_h);
            let rotation = FRAC_PI_2 - diagonal_angle;
            let (sin, cos) = rotation.sin_cos();

            [
                (left_h, 0.0),
                (0.0, 0.0),
                (left_h, right_h),
                (0.0, right_h),
            ]
            .iter()
            .map(|&(h, v)| RadarPoint::new(h * cos - v * sin, h * sin + v * cos))
            .collect()
        }
    };

    radar_vertices
        .iter()
        .map(|v| to_canvas_coordinate(v, radar))
        .collect()
}

/// Exact containment of a canvas point in the radar's field of view
pub fn is_point_in_radar_boundary(point: &Point, radar: &BaseObject) -> Result<bool, LayoutError> {
    let boundary = radar_boundary_vertices(radar)?;
    Ok(point_in_polygon(point, &boundary))
}

/// Exact containment: every footprint vertex inside the true FOV polygon.
///
/// Non-furniture objects and objects without a footprint are never
/// contained.
pub fn is_object_in_boundary(obj: &BaseObject, radar: &BaseObject) -> Result<bool, LayoutError> {
    if !obj.is_furniture() {
        return Ok(false);
    }

    let vertices = object_vertices(obj);
    if vertices.is_empty() {
        return Ok(false);
    }

    let boundary = radar_boundary_vertices(radar)?;
    Ok(vertices.iter().all(|v| point_in_polygon(v, &boundary)))
}

/// All furniture objects exactly inside the radar's field of view
pub fn objects_in_boundary<'a>(
    objects: &'a [BaseObject],
    radar: &BaseObject,
) -> Result<Vec<&'a BaseObject>, LayoutError> {
    let mut inside = Vec::new();
    for obj in objects {
        if is_object_in_boundary(obj, radar)? {
            inside.push(obj);
        }
    }
    Ok(inside)
}

/// Tolerance containment: every footprint vertex inside the boundary's
/// axis-aligned bounding box expanded by `tolerance` cm on each side.
///
/// Deliberately looser and cheaper than the exact polygon test; this is
/// the membership rule for area derivation, so an object hugging the
/// boundary edge still gets an area.
pub fn is_object_in_boundary_with_tolerance(
    obj: &BaseObject,
    radar: &BaseObject,
    tolerance: f64,
) -> Result<bool, LayoutError> {
    if !obj.is_furniture() {
        return Ok(false);
    }

    let vertices = object_vertices(obj);
    if vertices.is_empty() {
        return Ok(false);
    }

    let boundary = radar_boundary_vertices(radar)?;
    if boundary.is_empty() {
        return Ok(false);
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for v in &boundary {
        min_x = min_x.min(v.x);
        max_x = max_x.max(v.x);
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }
    min_x -= tolerance;
    max_x += tolerance;
    min_y -= tolerance;
    max_y += tolerance;

    Ok(vertices
        .iter()
        .all(|v| v.x >= min_x && v.x <= max_x && v.y >= min_y && v.y <= max_y))
}

/// All furniture objects inside the tolerance-expanded boundary box
pub fn objects_in_boundary_with_tolerance<'a>(
    objects: &'a [BaseObject],
    radar: &BaseObject,
    tolerance: f64,
) -> Result<Vec<&'a BaseObject>, LayoutError> {
    let mut inside = Vec::new();
    for obj in objects {
        if is_object_in_boundary_with_tolerance(obj, radar, tolerance)? {
            inside.push(obj);
        }
    }
    Ok(inside)
}

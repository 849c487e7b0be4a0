//! Detection-area derivation
//!
//! Turns the set of furniture objects inside a radar's field of view
//! into the bounded, id-stable list of detection areas the radar
//! firmware consumes: at most 16 areas, each tied to one furniture
//! object, classified by semantic type, with radar-frame vertices.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::boundary::{
    objects_in_boundary_with_tolerance, radar_boundary_vertices, DEFAULT_BOUNDARY_TOLERANCE,
};
use crate::error::LayoutError;
use crate::footprint::{object_vertices, object_vertices_in_radar};
use crate::geometry::{point_in_polygon, RadarPoint};
use crate::object::{
    AreaKind, BaseObject, Boundary, InstallMode, ObjectKind, RadarArea, MAX_AREAS,
};
use crate::transform::to_radar_coordinate;

/// Whether the radar's own mounting position lies inside the object's
/// footprint. Decides bed occupancy monitoring: a radar directly over a
/// bed reports it as a monitored bed.
pub fn is_radar_center_in_object(obj: &BaseObject, radar: &BaseObject) -> bool {
    if !obj.is_furniture() {
        return false;
    }
    let Some(center) = radar.geometry.as_point() else {
        return false;
    };

    let vertices = object_vertices(obj);
    point_in_polygon(center, &vertices)
}

/// First-available-slot area id assignment.
///
/// Scans ids 0-15 skipping any id the radar's existing area list still
/// uses, handing out up to `count` ids (never more than 16 in total).
pub fn assign_area_ids(count: usize, existing: &[RadarArea]) -> Vec<u8> {
    let mut used = [false; MAX_AREAS];
    for area in existing {
        if let Some(slot) = used.get_mut(area.area_id as usize) {
            *slot = true;
        }
    }

    let mut assigned = Vec::new();
    for _ in 0..count {
        if assigned.len() >= MAX_AREAS {
            break;
        }
        let Some(id) = (0..MAX_AREAS as u8).find(|&id| !used[id as usize]) else {
            break;
        };
        used[id as usize] = true;
        assigned.push(id);
    }
    assigned
}

/// Semantic area type for one in-boundary object.
///
/// Static classification from the furniture preset table, except the
/// two bed kinds: those are monitored (5) when the radar's center falls
/// inside the bed footprint, plain bed regions (2) otherwise.
fn classify_area(obj: &BaseObject, radar: &BaseObject) -> AreaKind {
    if obj.kind.is_bed() {
        return if is_radar_center_in_object(obj, radar) {
            AreaKind::MonitorBed
        } else {
            AreaKind::Bed
        };
    }
    obj.kind
        .furniture_style()
        .map(|s| s.area_kind)
        .unwrap_or(AreaKind::Custom)
}

/// Derive the full area list for one radar.
///
/// 1. Collect furniture inside the tolerance-expanded boundary box.
/// 2. Assign first-available area ids against the radar's current area
///    list; past 16 qualifying objects the remainder is dropped.
/// 3. Classify each area and emit its quantized radar-frame vertices.
///
/// The caller (normally the repository) stores the result back into the
/// radar's configuration; the list is recreated wholesale on every call.
pub fn update_radar_areas(
    radar: &BaseObject,
    all_objects: &[BaseObject],
) -> Result<Vec<RadarArea>, LayoutError> {
    let in_boundary =
        objects_in_boundary_with_tolerance(all_objects, radar, DEFAULT_BOUNDARY_TOLERANCE)?;

    let existing = radar
        .radar_config()
        .map(|c| c.areas.as_slice())
        .unwrap_or(&[]);
    let ids = assign_area_ids(in_boundary.len(), existing);

    if in_boundary.len() > ids.len() {
        debug!(
            "radar {}: {} objects qualify, keeping the first {}",
            radar.id,
            in_boundary.len(),
            ids.len()
        );
    }

    let mut areas = Vec::with_capacity(ids.len());
    for (obj, area_id) in in_boundary.into_iter().zip(ids) {
        let radar_vertices = object_vertices_in_radar(obj, radar)?;

        let mut vertices = [RadarPoint::default(); 4];
        for (slot, v) in vertices.iter_mut().zip(radar_vertices) {
            *slot = v;
        }

        areas.push(RadarArea {
            area_id,
            area_kind: classify_area(obj, radar),
            object_id: obj.id.clone(),
            object_kind: obj.kind,
            vertices,
        });
    }

    Ok(areas)
}

/// Hardware-facing snapshot of one radar: its boundary in its own frame
/// plus every in-boundary object, ready for the serialization layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarReport {
    pub id: String,
    pub type_value: i32,
    #[serde(rename = "typeName")]
    pub kind: ObjectKind,
    pub name: String,
    pub install_model: InstallMode,
    pub boundary: Boundary,
    /// Boundary corners in the radar frame, sorted by h then v
    pub boundary_vertices: [RadarPoint; 4],
    pub objects: Vec<ReportObject>,
}

/// One in-boundary object as reported to the hardware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportObject {
    pub type_value: i32,
    #[serde(rename = "typeName")]
    pub kind: ObjectKind,
    pub id: String,
    pub name: String,
    pub radar_vertices: Vec<RadarPoint>,
}

/// Build the configuration report for one radar.
///
/// `None` when the object is not a radar or has no boundary configured
/// yet (nothing to push in either case).
pub fn radar_report(
    radar: &BaseObject,
    objects: &[BaseObject],
) -> Result<Option<RadarReport>, LayoutError> {
    if !radar.is_radar() {
        return Ok(None);
    }
    let Some(config) = radar.radar_config() else {
        return Ok(None);
    };
    let Some(boundary) = config.boundary else {
        return Ok(None);
    };
    let install_model = config.install_model;

    let in_boundary =
        objects_in_boundary_with_tolerance(objects, radar, DEFAULT_BOUNDARY_TOLERANCE)?;
    let mut report_objects = Vec::with_capacity(in_boundary.len());
    for obj in in_boundary {
        report_objects.push(ReportObject {
            type_value: obj.type_value,
            kind: obj.kind,
            id: obj.id.clone(),
            name: obj.name.clone(),
            radar_vertices: object_vertices_in_radar(obj, radar)?,
        });
    }

    let canvas_vertices = radar_boundary_vertices(radar)?;
    let mut corners = Vec::with_capacity(canvas_vertices.len());
    for v in &canvas_vertices {
        corners.push(to_radar_coordinate(v.x, v.y, radar)?);
    }
    corners.sort_by(|a, b| a.h.total_cmp(&b.h).then(a.v.total_cmp(&b.v)));

    let mut boundary_vertices = [RadarPoint::default(); 4];
    for (slot, v) in boundary_vertices.iter_mut().zip(corners) {
        *slot = v;
    }

    Ok(Some(RadarReport {
        id: radar.id.clone(),
        type_value: radar.type_value,
        kind: radar.kind,
        name: radar.name.clone(),
        install_model,
        boundary,
        boundary_vertices,
        objects: report_objects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Point, Rectangle};
    use crate::object::InstallMode;

    fn ceiling_radar(x: f64, y: f64) -> BaseObject {
        let mut radar = BaseObject::new_radar("r1", Point::new(x, y), InstallMode::Ceiling);
        radar.angle = Some(0.0);
        radar.radar_config_mut().unwrap().boundary = Some(Boundary {
            left_h: 300.0,
            right_h: 300.0,
            front_v: 200.0,
            rear_v: 200.0,
        });
        radar
    }

    fn rect_object(id: &str, kind: ObjectKind, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BaseObject {
        BaseObject::new_furniture(
            id,
            kind,
            Geometry::Rectangle(Rectangle {
                vertices: [
                    Point::new(max_x, min_y),
                    Point::new(min_x, min_y),
                    Point::new(max_x, max_y),
                    Point::new(min_x, max_y),
                ],
            }),
        )
    }

    #[test]
    fn test_assign_ids_first_free_slot() {
        assert_eq!(assign_area_ids(3, &[]), vec![0, 1, 2]);

        let existing = vec![
            RadarArea {
                area_id: 0,
                area_kind: AreaKind::Custom,
                object_id: "a".into(),
                object_kind: ObjectKind::Table,
                vertices: [RadarPoint::default(); 4],
            },
            RadarArea {
                area_id: 2,
                area_kind: AreaKind::Custom,
                object_id: "b".into(),
                object_kind: ObjectKind::Table,
                vertices: [RadarPoint::default(); 4],
            },
        ];
        assert_eq!(assign_area_ids(3, &existing), vec![1, 3, 4]);
    }

    #[test]
    fn test_assign_ids_capped_at_sixteen() {
        let ids = assign_area_ids(40, &[]);
        assert_eq!(ids.len(), 16);
        assert_eq!(ids[15], 15);
    }

    #[test]
    fn test_area_ids_unique_and_in_range() {
        let radar = ceiling_radar(0.0, 0.0);
        let objects: Vec<BaseObject> = (0..20)
            .map(|i| {
                rect_object(
                    &format!("t{i}"),
                    ObjectKind::Table,
                    -50.0,
                    -50.0,
                    50.0,
                    50.0,
                )
            })
            .collect();

        let areas = update_radar_areas(&radar, &objects).unwrap();
        assert_eq!(areas.len(), 16);

        let mut seen = [false; 16];
        for area in &areas {
            assert!(area.area_id < 16);
            assert!(!seen[area.area_id as usize], "duplicate area id");
            seen[area.area_id as usize] = true;
        }
    }

    #[test]
    fn test_bed_monitored_when_radar_above_it() {
        // Radar at the canvas origin; bed spans y in [-50, 150] so its
        // polygon contains the radar position.
        let radar = ceiling_radar(0.0, 0.0);
        let bed = rect_object("bed1", ObjectKind::Bed, -75.0, -50.0, 75.0, 150.0);

        let areas = update_radar_areas(&radar, &[bed]).unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].area_kind, AreaKind::MonitorBed);
        assert_eq!(areas[0].object_id, "bed1");
    }

    #[test]
    fn test_bed_not_monitored_when_radar_outside() {
        // 150x100 bed centred at (0, 100) does not contain the origin
        let radar = ceiling_radar(0.0, 0.0);
        let bed = rect_object("bed1", ObjectKind::Bed, -75.0, 50.0, 75.0, 150.0);

        let areas = update_radar_areas(&radar, &[bed]).unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].area_kind, AreaKind::Bed);
    }

    #[test]
    fn test_static_classification() {
        let radar = ceiling_radar(0.0, 0.0);
        let objects = vec![
            rect_object("door", ObjectKind::Door, -250.0, -150.0, -150.0, -100.0),
            rect_object("can", ObjectKind::MetalCan, 100.0, 100.0, 150.0, 150.0),
            rect_object("table", ObjectKind::Table, -100.0, 100.0, -50.0, 150.0),
        ];

        let areas = update_radar_areas(&radar, &objects).unwrap();
        assert_eq!(areas.len(), 3);
        let kind_of = |id: &str| {
            areas
                .iter()
                .find(|a| a.object_id == id)
                .map(|a| a.area_kind)
                .unwrap()
        };
        assert_eq!(kind_of("door"), AreaKind::Entrance);
        assert_eq!(kind_of("can"), AreaKind::Interference);
        assert_eq!(kind_of("table"), AreaKind::Custom);
    }

    #[test]
    fn test_devices_and_structures_get_no_area() {
        let radar = ceiling_radar(0.0, 0.0);
        let other_radar = BaseObject::new_radar("r2", Point::new(50.0, 50.0), InstallMode::Wall);
        let mut wall = rect_object("wall", ObjectKind::Wall, -50.0, -50.0, 50.0, 50.0);
        wall.device.category = crate::object::Category::Structure;

        let areas = update_radar_areas(&radar, &[other_radar, wall]).unwrap();
        assert!(areas.is_empty());
    }

    #[test]
    fn test_areas_empty_without_boundary() {
        let mut radar = BaseObject::new_radar("r1", Point::new(0.0, 0.0), InstallMode::Ceiling);
        radar.radar_config_mut().unwrap().boundary = None;
        let bed = rect_object("bed1", ObjectKind::Bed, -50.0, -50.0, 50.0, 50.0);

        let areas = update_radar_areas(&radar, &[bed]).unwrap();
        assert!(areas.is_empty());
    }

    #[test]
    fn test_area_vertices_quantized() {
        let radar = ceiling_radar(0.0, 0.0);
        let bed = rect_object("bed1", ObjectKind::Bed, -73.0, 48.0, 77.0, 152.0);

        let areas = update_radar_areas(&radar, &[bed]).unwrap();
        for v in &areas[0].vertices {
            assert_eq!(v.h % 10.0, 0.0);
            assert_eq!(v.v % 10.0, 0.0);
        }
    }

    #[test]
    fn test_radar_report() {
        let radar = ceiling_radar(0.0, 0.0);
        let bed = rect_object("bed1", ObjectKind::Bed, -75.0, 50.0, 75.0, 150.0);

        let report = radar_report(&radar, &[bed.clone()]).unwrap().unwrap();
        assert_eq!(report.install_model, InstallMode::Ceiling);
        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].id, "bed1");

        // Corners sorted by h then v
        let bv = &report.boundary_vertices;
        for pair in bv.windows(2) {
            assert!(pair[0].h < pair[1].h || (pair[0].h == pair[1].h && pair[0].v <= pair[1].v));
        }

        // Non-radar objects produce no report
        assert_eq!(radar_report(&bed, &[]).unwrap(), None);
    }
}

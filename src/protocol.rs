//! Radar key/value configuration schema
//!
//! The hardware is configured over a messaging channel with flat
//! key/value pairs: `install_model`, `height`, `boundary_left/right/
//! front/rear`, and `area_{id}_{field}` for the 16 area slots. Values
//! travel in decimeters while the whole canvas works in centimeters, so
//! every length is divided by 10 and rounded at this boundary (and
//! multiplied back by 10 when parsing a device response).
//!
//! This module only builds and parses the payloads; transporting them
//! is the caller's concern.

use serde_json::{json, Map, Value};

use crate::error::LayoutError;
use crate::object::{AreaKind, Boundary, InstallMode, RadarArea, RadarConfig, MAX_AREAS};

pub const KEY_INSTALL_MODEL: &str = "install_model";
pub const KEY_HEIGHT: &str = "height";
pub const KEY_BOUNDARY_LEFT: &str = "boundary_left";
pub const KEY_BOUNDARY_RIGHT: &str = "boundary_right";
pub const KEY_BOUNDARY_FRONT: &str = "boundary_front";
pub const KEY_BOUNDARY_REAR: &str = "boundary_rear";

/// Marker value for `area_{id}_id` that clears the slot on the device
pub const AREA_DELETED: i64 = -1;

/// One key/value pair destined for the device
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl KeyValue {
    fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// `area_{id}_{field}` key for one area slot
pub fn area_key(area_id: u8, field: &str) -> String {
    format!("area_{area_id}_{field}")
}

/// Centimeters to device decimeters, rounded
fn cm_to_dm(cm: f64) -> i64 {
    (cm / 10.0).round() as i64
}

/// Device decimeters back to centimeters
fn dm_to_cm(dm: f64) -> f64 {
    dm * 10.0
}

pub fn convert_install_model(mode: InstallMode) -> KeyValue {
    KeyValue::new(KEY_INSTALL_MODEL, mode.wire_value())
}

pub fn convert_height(height_cm: f64) -> KeyValue {
    KeyValue::new(KEY_HEIGHT, cm_to_dm(height_cm))
}

pub fn convert_boundary(boundary: &Boundary) -> Vec<KeyValue> {
    vec![
        KeyValue::new(KEY_BOUNDARY_LEFT, cm_to_dm(boundary.left_h)),
        KeyValue::new(KEY_BOUNDARY_RIGHT, cm_to_dm(boundary.right_h)),
        KeyValue::new(KEY_BOUNDARY_FRONT, cm_to_dm(boundary.front_v)),
        KeyValue::new(KEY_BOUNDARY_REAR, cm_to_dm(boundary.rear_v)),
    ]
}

/// Key/value pairs for one area slot.
///
/// The four vertices map in their sorted order to `x1,y1 .. x4,y4`,
/// with x carrying h and y carrying v, both in decimeters. The slot id
/// must fit the hardware range 0-15.
pub fn convert_area(area: &RadarArea) -> Result<Vec<KeyValue>, LayoutError> {
    let id = area.area_id;
    if id >= MAX_AREAS as u8 {
        return Err(LayoutError::AreaIdOutOfRange(id));
    }

    let mut pairs = vec![
        KeyValue::new(area_key(id, "id"), i64::from(id)),
        KeyValue::new(area_key(id, "type"), area.area_kind as u8),
    ];
    for (i, v) in area.vertices.iter().enumerate() {
        let n = i + 1;
        pairs.push(KeyValue::new(area_key(id, &format!("x{n}")), cm_to_dm(v.h)));
        pairs.push(KeyValue::new(area_key(id, &format!("y{n}")), cm_to_dm(v.v)));
    }
    Ok(pairs)
}

/// Key/value pairs that clear one area slot on the device
pub fn delete_area(area_id: u8) -> Vec<KeyValue> {
    let mut pairs = vec![KeyValue::new(area_key(area_id, "id"), AREA_DELETED)];
    for n in 1..=4 {
        pairs.push(KeyValue::new(area_key(area_id, &format!("x{n}")), 0));
        pairs.push(KeyValue::new(area_key(area_id, &format!("y{n}")), 0));
    }
    pairs
}

/// The full push set for one radar: install mode, height, boundary, and
/// all 16 area slots (occupied slots written, the rest cleared).
pub fn full_config_key_values(config: &RadarConfig) -> Result<Vec<KeyValue>, LayoutError> {
    let mut pairs = vec![convert_install_model(config.install_model)];
    if let Some(height) = config.height {
        pairs.push(convert_height(height));
    }
    if let Some(boundary) = &config.boundary {
        pairs.extend(convert_boundary(boundary));
    }

    for slot in 0..MAX_AREAS as u8 {
        match config.areas.iter().find(|a| a.area_id == slot) {
            Some(area) => pairs.extend(convert_area(area)?),
            None => pairs.extend(delete_area(slot)),
        }
    }
    Ok(pairs)
}

/// Every key a full device query must read
pub fn all_config_keys() -> Vec<String> {
    let mut keys = vec![
        KEY_INSTALL_MODEL.to_string(),
        KEY_HEIGHT.to_string(),
        KEY_BOUNDARY_LEFT.to_string(),
        KEY_BOUNDARY_RIGHT.to_string(),
        KEY_BOUNDARY_FRONT.to_string(),
        KEY_BOUNDARY_REAR.to_string(),
    ];
    for id in 0..MAX_AREAS as u8 {
        keys.push(area_key(id, "id"));
        keys.push(area_key(id, "type"));
        for n in 1..=4 {
            keys.push(area_key(id, &format!("x{n}")));
            keys.push(area_key(id, &format!("y{n}")));
        }
    }
    keys
}

/// Wrap key/value pairs in an update command payload
pub fn build_update_command(pairs: &[KeyValue], request_id: &str) -> Value {
    let mut data = Map::new();
    for kv in pairs {
        data.insert(kv.key.clone(), kv.value.clone());
    }
    json!({
        "cmd": "update",
        "requestId": request_id,
        "data": data,
    })
}

/// Wrap a key list in a read command payload
pub fn build_read_command(keys: &[String], request_id: &str) -> Value {
    json!({
        "cmd": "read",
        "requestId": request_id,
        "data": { "key": keys },
    })
}

/// Radar configuration decoded from a device read response
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRadarConfig {
    pub install_model: InstallMode,
    /// Mounting height, cm
    pub height: f64,
    pub boundary: Boundary,
    pub areas: Vec<ParsedArea>,
}

/// One occupied area slot from a device read response, centimeters
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArea {
    pub area_id: u8,
    pub area_kind: AreaKind,
    /// Vertex coordinates as (h, v) pairs in slot order
    pub vertices: [(f64, f64); 4],
}

fn number(data: &Map<String, Value>, key: &str) -> Option<f64> {
    data.get(key)?.as_f64()
}

/// Decode a read response into canvas units.
///
/// Missing keys fall back the way the device does: wall install mode,
/// 170 cm height, zero extents; area slots whose id key is absent or
/// holds the deletion marker are skipped.
pub fn parse_read_response(data: &Map<String, Value>) -> ParsedRadarConfig {
    let install_model = number(data, KEY_INSTALL_MODEL)
        .and_then(|v| InstallMode::from_wire(v as u8))
        .unwrap_or(InstallMode::Wall);

    let height = dm_to_cm(number(data, KEY_HEIGHT).unwrap_or(17.0));

    let boundary = Boundary {
        left_h: dm_to_cm(number(data, KEY_BOUNDARY_LEFT).unwrap_or(0.0)),
        right_h: dm_to_cm(number(data, KEY_BOUNDARY_RIGHT).unwrap_or(0.0)),
        front_v: dm_to_cm(number(data, KEY_BOUNDARY_FRONT).unwrap_or(0.0)),
        rear_v: dm_to_cm(number(data, KEY_BOUNDARY_REAR).unwrap_or(0.0)),
    };

    let mut areas = Vec::new();
    for id in 0..MAX_AREAS as u8 {
        let Some(slot_id) = number(data, &area_key(id, "id")) else {
            continue;
        };
        if slot_id as i64 == AREA_DELETED {
            continue;
        }

        let area_kind = number(data, &area_key(id, "type"))
            .map(|v| AreaKind::from_wire(v as u8))
            .unwrap_or(AreaKind::Invalid);

        let mut vertices = [(0.0, 0.0); 4];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            let n = i + 1;
            vertex.0 = dm_to_cm(number(data, &area_key(id, &format!("x{n}"))).unwrap_or(0.0));
            vertex.1 = dm_to_cm(number(data, &area_key(id, &format!("y{n}"))).unwrap_or(0.0));
        }

        areas.push(ParsedArea {
            area_id: id,
            area_kind,
            vertices,
        });
    }

    ParsedRadarConfig {
        install_model,
        height,
        boundary,
        areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RadarPoint;
    use crate::object::ObjectKind;

    fn sample_area() -> RadarArea {
        RadarArea {
            area_id: 3,
            area_kind: AreaKind::Bed,
            object_id: "bed1".to_string(),
            object_kind: ObjectKind::Bed,
            vertices: [
                RadarPoint::new(-100.0, 50.0),
                RadarPoint::new(100.0, 50.0),
                RadarPoint::new(-100.0, 150.0),
                RadarPoint::new(100.0, 150.0),
            ],
        }
    }

    #[test]
    fn test_cm_to_dm_rounds() {
        assert_eq!(cm_to_dm(300.0), 30);
        assert_eq!(cm_to_dm(154.0), 15);
        assert_eq!(cm_to_dm(155.0), 16);
        assert_eq!(cm_to_dm(-154.0), -15);
    }

    #[test]
    fn test_install_model_and_height_pairs() {
        let kv = convert_install_model(InstallMode::Corner);
        assert_eq!(kv.key, "install_model");
        assert_eq!(kv.value, json!(2));

        let kv = convert_height(175.0);
        assert_eq!(kv.key, "height");
        assert_eq!(kv.value, json!(18));
    }

    #[test]
    fn test_boundary_pairs() {
        let pairs = convert_boundary(&Boundary {
            left_h: 300.0,
            right_h: 300.0,
            front_v: 400.0,
            rear_v: 0.0,
        });
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].key, "boundary_left");
        assert_eq!(pairs[0].value, json!(30));
        assert_eq!(pairs[3].key, "boundary_rear");
        assert_eq!(pairs[3].value, json!(0));
    }

    #[test]
    fn test_area_pairs() {
        let pairs = convert_area(&sample_area()).unwrap();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[0].key, "area_3_id");
        assert_eq!(pairs[0].value, json!(3));
        assert_eq!(pairs[1].key, "area_3_type");
        assert_eq!(pairs[1].value, json!(2));
        assert_eq!(pairs[2].key, "area_3_x1");
        assert_eq!(pairs[2].value, json!(-10));
        assert_eq!(pairs[3].key, "area_3_y1");
        assert_eq!(pairs[3].value, json!(5));
    }

    #[test]
    fn test_area_id_out_of_range_rejected() {
        let mut area = sample_area();
        area.area_id = 16;
        assert_eq!(
            convert_area(&area),
            Err(LayoutError::AreaIdOutOfRange(16))
        );
    }

    #[test]
    fn test_delete_area_marker() {
        let pairs = delete_area(7);
        assert_eq!(pairs[0].key, "area_7_id");
        assert_eq!(pairs[0].value, json!(-1));
        assert_eq!(pairs.len(), 9);
    }

    #[test]
    fn test_full_config_covers_all_slots() {
        let config = RadarConfig {
            install_model: InstallMode::Ceiling,
            height: Some(300.0),
            boundary: Some(Boundary {
                left_h: 300.0,
                right_h: 300.0,
                front_v: 200.0,
                rear_v: 200.0,
            }),
            signal_radius: None,
            areas: vec![sample_area()],
        };

        let pairs = full_config_key_values(&config).unwrap();
        let find = |key: &str| pairs.iter().find(|kv| kv.key == key).map(|kv| &kv.value);

        assert_eq!(find("install_model"), Some(&json!(0)));
        assert_eq!(find("height"), Some(&json!(30)));
        assert_eq!(find("area_3_id"), Some(&json!(3)));
        // Unoccupied slots carry the deletion marker
        assert_eq!(find("area_0_id"), Some(&json!(-1)));
        assert_eq!(find("area_15_id"), Some(&json!(-1)));
    }

    #[test]
    fn test_all_config_keys_count() {
        // 6 base keys + 16 slots x (id + type + 8 coordinates)
        assert_eq!(all_config_keys().len(), 6 + 16 * 10);
    }

    #[test]
    fn test_update_command_shape() {
        let pairs = vec![convert_install_model(InstallMode::Wall)];
        let cmd = build_update_command(&pairs, "req_1");
        assert_eq!(cmd["cmd"], "update");
        assert_eq!(cmd["requestId"], "req_1");
        assert_eq!(cmd["data"]["install_model"], json!(1));
    }

    #[test]
    fn test_read_command_shape() {
        let cmd = build_read_command(&["height".to_string()], "req_2");
        assert_eq!(cmd["cmd"], "read");
        assert_eq!(cmd["data"]["key"][0], "height");
    }

    #[test]
    fn test_parse_read_response_round_trip() {
        let response = json!({
            "install_model": 0,
            "height": 30,
            "boundary_left": 30,
            "boundary_right": 30,
            "boundary_front": 20,
            "boundary_rear": 20,
            "area_2_id": 2,
            "area_2_type": 5,
            "area_2_x1": -10,
            "area_2_y1": 5,
            "area_2_x2": 10,
            "area_2_y2": 5,
            "area_2_x3": -10,
            "area_2_y3": 15,
            "area_2_x4": 10,
            "area_2_y4": 15,
            "area_5_id": -1,
        });

        let parsed = parse_read_response(response.as_object().unwrap());
        assert_eq!(parsed.install_model, InstallMode::Ceiling);
        assert_eq!(parsed.height, 300.0);
        assert_eq!(parsed.boundary.left_h, 300.0);
        assert_eq!(parsed.areas.len(), 1);

        let area = &parsed.areas[0];
        assert_eq!(area.area_id, 2);
        assert_eq!(area.area_kind, AreaKind::MonitorBed);
        assert_eq!(area.vertices[0], (-100.0, 50.0));
        assert_eq!(area.vertices[3], (100.0, 150.0));
    }

    #[test]
    fn test_parse_read_response_defaults() {
        let parsed = parse_read_response(&Map::new());
        assert_eq!(parsed.install_model, InstallMode::Wall);
        assert_eq!(parsed.height, 170.0);
        assert_eq!(parsed.boundary.left_h, 0.0);
        assert!(parsed.areas.is_empty());
    }
}

//! Placed-object data model
//!
//! Everything on the canvas is a [`BaseObject`]: IoT devices (radar,
//! sleep pad, sensor), furniture, and room structures. Radar devices
//! additionally carry a [`RadarConfig`] with the user-configured
//! detection boundary and the derived area list.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::geometry::{Geometry, Point, RadarPoint};

/// Standard material reflectivity presets (percent)
pub const REFLECTIVITY_WOOD: u8 = 30;
pub const REFLECTIVITY_GLASS: u8 = 60;
pub const REFLECTIVITY_METAL: u8 = 90;

/// Hard limit of the radar firmware: at most 16 areas per radar
pub const MAX_AREAS: usize = 16;

/// Broad object category. Only `furniture` objects participate in
/// boundary and area computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Iot,
    Furniture,
    Structure,
}

/// Concrete object kind, serialized with its display spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    // IoT devices
    Radar,
    Sleepad,
    Sensor,
    // Furniture
    Bed,
    MonitorBed,
    Door,
    Wall,
    Interfere,
    Enter,
    Furniture,
    Other,
    #[serde(rename = "GlassTV")]
    GlassTv,
    Table,
    Chair,
    Curtain,
    MetalCan,
    WheelChair,
}

/// Semantic area type consumed by the radar firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum AreaKind {
    Invalid = 0,
    Custom = 1,
    Bed = 2,
    Interference = 3,
    Entrance = 4,
    MonitorBed = 5,
}

impl AreaKind {
    /// Map a firmware value back to an area kind; unknown values are Invalid
    pub fn from_wire(value: u8) -> AreaKind {
        match value {
            1 => AreaKind::Custom,
            2 => AreaKind::Bed,
            3 => AreaKind::Interference,
            4 => AreaKind::Entrance,
            5 => AreaKind::MonitorBed,
            _ => AreaKind::Invalid,
        }
    }
}

/// Default visual and classification presets for a furniture kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnitureStyle {
    pub area_kind: AreaKind,
    /// Default fill color (hex)
    pub color: &'static str,
    /// Radar reflectivity preset (0-100)
    pub reflectivity: u8,
    pub description: &'static str,
}

impl ObjectKind {
    /// Static preset for furniture and structure kinds; devices have none
    pub fn furniture_style(&self) -> Option<FurnitureStyle> {
        use AreaKind::*;
        let style = match self {
            ObjectKind::Bed => FurnitureStyle {
                area_kind: Bed,
                color: "#d7d7a0",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Normal Bed",
            },
            ObjectKind::MonitorBed => FurnitureStyle {
                area_kind: MonitorBed,
                color: "#F0E68C",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Monitor Bed",
            },
            ObjectKind::Interfere => FurnitureStyle {
                area_kind: Interference,
                color: "#F5F5F5",
                reflectivity: REFLECTIVITY_METAL,
                description: "Interfere Area",
            },
            ObjectKind::Enter => FurnitureStyle {
                area_kind: Entrance,
                color: "#A9EAA9",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Entrance",
            },
            ObjectKind::Door => FurnitureStyle {
                area_kind: Entrance,
                color: "#a0eda0",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Door",
            },
            ObjectKind::Wall => FurnitureStyle {
                area_kind: Custom,
                color: "#000000",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Wall",
            },
            ObjectKind::Furniture => FurnitureStyle {
                area_kind: Custom,
                color: "#d3d3d3",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Generic Furniture",
            },
            ObjectKind::GlassTv => FurnitureStyle {
                area_kind: Custom,
                color: "#e0e0e0",
                reflectivity: REFLECTIVITY_GLASS,
                description: "Glass/TV",
            },
            ObjectKind::Other => FurnitureStyle {
                area_kind: Custom,
                color: "#d3d3d3",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Other Object",
            },
            ObjectKind::Table => FurnitureStyle {
                area_kind: Custom,
                color: "#c19a6b",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Table",
            },
            ObjectKind::Chair => FurnitureStyle {
                area_kind: Custom,
                color: "#a0522d",
                reflectivity: REFLECTIVITY_WOOD,
                description: "Chair",
            },
            ObjectKind::Curtain => FurnitureStyle {
                area_kind: Custom,
                color: "#82BBEB",
                reflectivity: REFLECTIVITY_GLASS,
                description: "Curtain",
            },
            ObjectKind::MetalCan => FurnitureStyle {
                area_kind: Interference,
                color: "#F5F5F5",
                reflectivity: REFLECTIVITY_METAL,
                description: "Metal Can",
            },
            ObjectKind::WheelChair => FurnitureStyle {
                area_kind: Interference,
                color: "#a0826d",
                reflectivity: REFLECTIVITY_METAL,
                description: "Wheel Chair",
            },
            ObjectKind::Radar | ObjectKind::Sleepad | ObjectKind::Sensor => return None,
        };
        Some(style)
    }

    /// True for the two bed kinds that Bed-State Propagation manages
    pub fn is_bed(&self) -> bool {
        matches!(self, ObjectKind::Bed | ObjectKind::MonitorBed)
    }
}

/// Physical mounting orientation of a radar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Overhead mount, detection both in front of and behind the radar
    Ceiling,
    /// Flush against a wall, forward detection only
    Wall,
    /// Corner mount, quarter-plane detection
    #[serde(rename = "corn")]
    Corner,
}

impl Default for InstallMode {
    fn default() -> Self {
        InstallMode::Ceiling
    }
}

impl InstallMode {
    /// Firmware encoding: 0=ceiling, 1=wall, 2=corner
    pub fn wire_value(&self) -> u8 {
        match self {
            InstallMode::Ceiling => 0,
            InstallMode::Wall => 1,
            InstallMode::Corner => 2,
        }
    }

    pub fn from_wire(value: u8) -> Option<InstallMode> {
        match value {
            0 => Some(InstallMode::Ceiling),
            1 => Some(InstallMode::Wall),
            2 => Some(InstallMode::Corner),
            _ => None,
        }
    }

    /// Factory defaults applied when a radar is placed in this mode
    pub fn defaults(&self) -> RadarDefaults {
        match self {
            InstallMode::Wall => RadarDefaults {
                height: 170.0,
                rotation: 0.0,
                signal_radius: 500.0,
                boundary: Boundary {
                    left_h: 300.0,
                    right_h: 300.0,
                    front_v: 400.0,
                    rear_v: 0.0,
                },
            },
            InstallMode::Ceiling => RadarDefaults {
                height: 300.0,
                rotation: 0.0,
                signal_radius: 400.0,
                boundary: Boundary {
                    left_h: 300.0,
                    right_h: 300.0,
                    front_v: 200.0,
                    rear_v: 200.0,
                },
            },
            // Corner boundary is a leftH x rightH box anchored at the
            // radar; frontV/rearV are unused in this mode.
            InstallMode::Corner => RadarDefaults {
                height: 200.0,
                rotation: 45.0,
                signal_radius: 800.0,
                boundary: Boundary {
                    left_h: 600.0,
                    right_h: 600.0,
                    front_v: 0.0,
                    rear_v: 0.0,
                },
            },
        }
    }
}

/// Factory defaults for one install mode, centimeters and degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarDefaults {
    pub height: f64,
    pub rotation: f64,
    pub signal_radius: f64,
    pub boundary: Boundary,
}

/// User-configured detection extents, centimeters, all >= 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    pub left_h: f64,
    pub right_h: f64,
    pub front_v: f64,
    pub rear_v: f64,
}

/// One derived detection area tied to a furniture object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarArea {
    /// Slot 0-15, unique within one radar
    pub area_id: u8,
    #[serde(rename = "areaType")]
    pub area_kind: AreaKind,
    /// The furniture object this area was derived from
    pub object_id: String,
    #[serde(rename = "objectType")]
    pub object_kind: ObjectKind,
    /// Radar-frame vertices, quantized to 10 cm, sorted by v then h
    pub vertices: [RadarPoint; 4],
}

/// Radar device configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarConfig {
    #[serde(default)]
    pub install_model: InstallMode,
    /// Mounting height above the floor, cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Detection extents; `None` means not yet configured, which yields
    /// an empty field of view rather than an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_radius: Option<f64>,
    /// Derived detection areas, recomputed on every layout change
    #[serde(default)]
    pub areas: Vec<RadarArea>,
}

/// IoT-device-specific properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IotProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar: Option<RadarConfig>,
}

/// Category plus device payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iot: Option<IotProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualProperties {
    pub color: String,
    /// Outline-only rendering
    #[serde(default)]
    pub transparent: bool,
    /// Radar reflectivity 0-100
    pub reflectivity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveProperties {
    #[serde(default)]
    pub selected: bool,
    /// Locked objects cannot be dragged, rotated, or edited
    #[serde(default)]
    pub locked: bool,
}

/// The universal placed-object entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseObject {
    pub id: String,
    pub name: String,
    #[serde(rename = "typeName")]
    pub kind: ObjectKind,
    #[serde(default)]
    pub type_value: i32,
    pub geometry: Geometry,
    pub visual: VisualProperties,
    #[serde(default)]
    pub interactive: InteractiveProperties,
    pub device: DeviceProperties,
    /// Rotation in degrees, counter-clockwise positive in canvas space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Links this canvas shape to a real hardware device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binded_device_id: Option<String>,
}

impl BaseObject {
    /// Rotation angle normalized to [0, 360)
    pub fn rotation_deg(&self) -> f64 {
        let angle = self.angle.unwrap_or(0.0) % 360.0;
        if angle < 0.0 {
            angle + 360.0
        } else {
            angle
        }
    }

    pub fn is_furniture(&self) -> bool {
        self.device.category == Category::Furniture
    }

    pub fn is_structure(&self) -> bool {
        self.device.category == Category::Structure
    }

    pub fn is_device(&self) -> bool {
        self.device.category == Category::Iot
    }

    pub fn is_radar(&self) -> bool {
        self.kind == ObjectKind::Radar
    }

    /// Radar configuration, if this object is a configured radar device
    pub fn radar_config(&self) -> Option<&RadarConfig> {
        self.device.iot.as_ref()?.radar.as_ref()
    }

    pub fn radar_config_mut(&mut self) -> Option<&mut RadarConfig> {
        self.device.iot.as_mut()?.radar.as_mut()
    }

    /// Build a furniture object with its kind's preset styling
    pub fn new_furniture(id: impl Into<String>, kind: ObjectKind, geometry: Geometry) -> Self {
        let style = kind.furniture_style();
        let (color, reflectivity) = style
            .map(|s| (s.color.to_string(), s.reflectivity))
            .unwrap_or_else(|| ("#d3d3d3".to_string(), REFLECTIVITY_WOOD));
        let id = id.into();
        BaseObject {
            name: id.clone(),
            id,
            kind,
            type_value: 0,
            geometry,
            visual: VisualProperties {
                color,
                transparent: false,
                reflectivity,
            },
            interactive: InteractiveProperties::default(),
            device: DeviceProperties {
                category: Category::Furniture,
                kind,
                iot: None,
            },
            angle: None,
            z_index: None,
            binded_device_id: None,
        }
    }

    /// Build a radar device at `position` with the factory defaults of
    /// `mode` (boundary extents, rotation, mount height)
    pub fn new_radar(id: impl Into<String>, position: Point, mode: InstallMode) -> Self {
        let defaults = mode.defaults();
        let id = id.into();
        BaseObject {
            name: id.clone(),
            id,
            kind: ObjectKind::Radar,
            type_value: 0,
            geometry: Geometry::Point(position),
            visual: VisualProperties {
                color: "#4a90d9".to_string(),
                transparent: false,
                reflectivity: 0,
            },
            interactive: InteractiveProperties::default(),
            device: DeviceProperties {
                category: Category::Iot,
                kind: ObjectKind::Radar,
                iot: Some(IotProperties {
                    device_id: None,
                    is_online: false,
                    status_message: None,
                    radar: Some(RadarConfig {
                        install_model: mode,
                        height: Some(defaults.height),
                        boundary: Some(defaults.boundary),
                        signal_radius: Some(defaults.signal_radius),
                        areas: Vec::new(),
                    }),
                }),
            },
            angle: Some(defaults.rotation),
            z_index: None,
            binded_device_id: None,
        }
    }
}

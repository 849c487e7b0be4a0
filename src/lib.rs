//! # Roomsense Core
//!
//! Platform-independent room-layout and detection-zone library for
//! radar-based patient monitoring installations.
//!
//! Users lay out furniture, structures, and radar devices on a
//! floor-plan canvas; this crate derives the detection-area
//! configuration the physical radars must receive, and answers the
//! geometric queries the editor and simulation layers need. It contains
//! **zero I/O**: no async, no sockets, no timers; every function is a
//! pure computation over already-resident data, which makes the crate
//! equally at home in a native backend or a WASM canvas frontend.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  roomsense-core (platform-independent, no I/O)           │
//! │  ├── geometry/   (points, shapes, point-in-polygon)      │
//! │  ├── transform/  (canvas <-> radar frame)                │
//! │  ├── boundary/   (per-install-mode field of view)        │
//! │  ├── footprint/  (object vertex extraction)              │
//! │  ├── area/       (detection-area derivation, reports)    │
//! │  ├── store/      (object repository + bed propagation)   │
//! │  └── protocol/   (key/value device schema, cm <-> dm)    │
//! └───────────────────────────────────────────────────────────┘
//!                 ▲                        ▲
//!    ┌────────────┴──────────┐   ┌─────────┴─────────┐
//!    │  canvas editor UI     │   │ device messaging  │
//!    │  (rendering, input)   │   │ (MQTT transport)  │
//!    └───────────────────────┘   └───────────────────┘
//! ```
//!
//! ## Coordinate frames
//!
//! The canvas frame has its origin at the top centre of the room, +x
//! right, +y down, in centimeters. Each radar has a local H/V frame
//! anchored at its own position; +H points toward canvas -x before
//! rotation. [`transform`] converts between the two, accounting for the
//! radar's rotation and the H-axis mirror.
//!
//! ## Example: deriving areas for a layout
//!
//! ```rust
//! use roomsense_core::{
//!     BaseObject, Geometry, InstallMode, ObjectKind, ObjectStore, Point, Rectangle,
//! };
//!
//! let mut store = ObjectStore::new();
//! store.add_object(BaseObject::new_radar(
//!     "radar1",
//!     Point::new(0.0, 0.0),
//!     InstallMode::Ceiling,
//! ));
//! store.add_object(BaseObject::new_furniture(
//!     "bed1",
//!     ObjectKind::Bed,
//!     Geometry::Rectangle(Rectangle {
//!         vertices: [
//!             Point::new(75.0, -50.0),
//!             Point::new(-75.0, -50.0),
//!             Point::new(75.0, 150.0),
//!             Point::new(-75.0, 150.0),
//!         ],
//!     }),
//! ));
//!
//! // The radar sits over the bed, so the bed was promoted and its
//! // area reports type 5 (monitored bed).
//! let radar = store.get("radar1").unwrap();
//! let areas = &radar.radar_config().unwrap().areas;
//! assert_eq!(areas.len(), 1);
//! ```

pub mod area;
pub mod boundary;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod object;
pub mod protocol;
pub mod store;
pub mod transform;

pub use area::{radar_report, update_radar_areas, RadarReport, ReportObject};
pub use boundary::{
    is_object_in_boundary, is_object_in_boundary_with_tolerance, is_point_in_radar_boundary,
    objects_in_boundary, objects_in_boundary_with_tolerance, radar_boundary_vertices,
    DEFAULT_BOUNDARY_TOLERANCE,
};
pub use error::LayoutError;
pub use footprint::{object_center, object_vertices, object_vertices_in_radar};
pub use geometry::{
    point_in_polygon, Circle, Geometry, Line, Point, Polygon, RadarPoint, Rectangle, Sector,
};
pub use object::{
    AreaKind, BaseObject, Boundary, Category, DeviceProperties, FurnitureStyle, InstallMode,
    InteractiveProperties, IotProperties, ObjectKind, RadarArea, RadarConfig, VisualProperties,
    MAX_AREAS,
};
pub use store::ObjectStore;
pub use transform::{to_canvas_coordinate, to_radar_coordinate};

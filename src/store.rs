//! The object repository
//!
//! Owns the full list of placed objects and keeps every radar's derived
//! area list consistent with the layout: any mutation of a radar's
//! geometry, boundary, or rotation, or of a furniture object's geometry,
//! synchronously recomputes *all* radars' areas and then runs Bed-State
//! Propagation. Recompute-everything is deliberate: object counts are
//! small and it keeps the invariants simple.
//!
//! The repository is an explicit handle, single-owner and
//! single-threaded; the core never reaches for ambient global state.

use std::collections::HashMap;

use log::{debug, warn};

use crate::area::{radar_report, update_radar_areas, RadarReport};
use crate::error::LayoutError;
use crate::geometry::Geometry;
use crate::object::{BaseObject, Boundary, InstallMode, ObjectKind};

#[derive(Debug, Default)]
struct BedStatus {
    should_be_monitor: bool,
    in_any_boundary: bool,
}

/// In-memory repository of all placed objects
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: Vec<BaseObject>,
    selected: Option<String>,
    counter: u64,
}

impl ObjectStore {
    pub fn new() -> Self {
        ObjectStore::default()
    }

    /// Build a repository from a loaded layout and bring every radar's
    /// area list up to date.
    pub fn with_objects(objects: Vec<BaseObject>) -> Self {
        let mut store = ObjectStore {
            objects,
            selected: None,
            counter: 0,
        };
        store.refresh_areas();
        store
    }

    pub fn objects(&self) -> &[BaseObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn radars(&self) -> impl Iterator<Item = &BaseObject> {
        self.objects.iter().filter(|o| o.is_radar())
    }

    pub fn furniture(&self) -> impl Iterator<Item = &BaseObject> {
        self.objects.iter().filter(|o| o.is_furniture())
    }

    pub fn structures(&self) -> impl Iterator<Item = &BaseObject> {
        self.objects.iter().filter(|o| o.is_structure())
    }

    pub fn iot_devices(&self) -> impl Iterator<Item = &BaseObject> {
        self.objects.iter().filter(|o| o.is_device())
    }

    pub fn get(&self, id: &str) -> Option<&BaseObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut BaseObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_object(&self) -> Option<&BaseObject> {
        let id = self.selected.as_deref()?;
        self.get(id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Select one object (or none), syncing every object's selected flag
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
        for obj in &mut self.objects {
            obj.interactive.selected = id.is_some_and(|id| obj.id == id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.clear_selection();
        } else {
            self.select(Some(id));
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Unique object id with a kind prefix
    pub fn generate_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}_{}", prefix, self.counter)
    }

    /// Add an object, auto-selecting it. Radar and furniture additions
    /// trigger a full area refresh. Returns the (possibly generated) id.
    pub fn add_object(&mut self, mut obj: BaseObject) -> String {
        if obj.id.is_empty() {
            obj.id = self.generate_id(&format!("{:?}", obj.kind).to_lowercase());
        }
        let id = obj.id.clone();

        for other in &mut self.objects {
            other.interactive.selected = false;
        }
        obj.interactive.selected = true;
        let needs_refresh = obj.is_radar() || obj.is_furniture();

        debug!("add {:?} ({})", obj.kind, id);
        self.objects.push(obj);
        self.selected = Some(id.clone());

        if needs_refresh {
            self.refresh_areas();
        }
        id
    }

    /// Remove an object by id, clearing its selection if it held one
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        let obj = self.objects.remove(index);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        debug!("remove {:?} ({})", obj.kind, id);
        if obj.is_radar() || obj.is_furniture() {
            self.refresh_areas();
        }
        true
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.remove_object(&id),
            None => false,
        }
    }

    /// Clone an object under a new id, nudging point geometry 20 cm so
    /// the copy is visible next to the original
    pub fn duplicate_object(&mut self, id: &str) -> Option<String> {
        let mut copy = self.get(id)?.clone();
        copy.id = self.generate_id(&format!("{:?}", copy.kind).to_lowercase());
        if let Geometry::Point(p) = &mut copy.geometry {
            p.x += 20.0;
            p.y += 20.0;
        }
        Some(self.add_object(copy))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
    }

    /// First-free-slot device naming: `Radar01`, `Radar02`, ...
    pub fn temp_device_id(&self, kind: ObjectKind) -> String {
        let prefix = format!("{kind:?}");
        let mut used = Vec::new();
        for obj in &self.objects {
            if obj.kind != kind {
                continue;
            }
            let Some(device_id) = obj.device.iot.as_ref().and_then(|iot| iot.device_id.as_deref())
            else {
                continue;
            };
            if let Some(rest) = device_id.strip_prefix(&prefix) {
                if let Ok(n) = rest.parse::<u32>() {
                    used.push(n);
                }
            }
        }

        let mut number = 1;
        while used.contains(&number) {
            number += 1;
        }
        format!("{prefix}{number:02}")
    }

    // ------------------------------------------------------------------
    // Mutations that re-derive areas
    // ------------------------------------------------------------------

    /// Replace an object's geometry. Triggers a refresh for radars and
    /// furniture; structure edits don't affect areas.
    pub fn set_geometry(&mut self, id: &str, geometry: Geometry) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        obj.geometry = geometry;
        let needs_refresh = obj.is_radar() || obj.is_furniture();
        if needs_refresh {
            self.refresh_areas();
        }
        true
    }

    /// Set an object's rotation angle in degrees. Radar rotations swing
    /// the field of view; furniture rotations re-derive areas like any
    /// other furniture edit.
    pub fn set_angle(&mut self, id: &str, angle: f64) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        obj.angle = Some(angle);
        let needs_refresh = obj.is_radar() || obj.is_furniture();
        if needs_refresh {
            self.refresh_areas();
        }
        true
    }

    /// Set a radar's detection boundary
    pub fn set_boundary(&mut self, id: &str, boundary: Boundary) -> bool {
        let Some(config) = self.get_mut(id).and_then(|o| o.radar_config_mut()) else {
            return false;
        };
        config.boundary = Some(boundary);
        self.refresh_areas();
        true
    }

    /// Switch a radar's install mode
    pub fn set_install_mode(&mut self, id: &str, mode: InstallMode) -> bool {
        let Some(config) = self.get_mut(id).and_then(|o| o.radar_config_mut()) else {
            return false;
        };
        config.install_model = mode;
        self.refresh_areas();
        true
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// Recompute every radar's area list, then propagate bed state.
    ///
    /// Runs automatically after any relevant mutation; callers only need
    /// it after mutating objects through other means (e.g. deserializing
    /// a layout edited elsewhere).
    pub fn refresh_areas(&mut self) {
        let radar_ids: Vec<String> = self.radars().map(|r| r.id.clone()).collect();
        debug!("refreshing areas for {} radars", radar_ids.len());

        let mut computed = Vec::with_capacity(radar_ids.len());
        for id in &radar_ids {
            let Some(radar) = self.get(id) else { continue };
            match update_radar_areas(radar, &self.objects) {
                Ok(areas) => computed.push((id.clone(), areas)),
                Err(err) => warn!("skipping radar {id}: {err}"),
            }
        }

        for (id, areas) in computed {
            if let Some(config) = self.get_mut(&id).and_then(|o| o.radar_config_mut()) {
                config.areas = areas;
            }
        }

        self.propagate_bed_state();
    }

    /// Promote/demote beds from the aggregated area lists.
    ///
    /// A bed reported as a monitored-bed area (type 5) by any radar
    /// becomes a MonitorBed; a MonitorBed inside some radar's boundary
    /// but monitored by none reverts to Bed. Beds covered by no radar at
    /// all are left as they are: absence of a report is not evidence of
    /// non-occupancy.
    fn propagate_bed_state(&mut self) {
        let mut beds: HashMap<String, BedStatus> = self
            .objects
            .iter()
            .filter(|o| o.kind.is_bed())
            .map(|o| (o.id.clone(), BedStatus::default()))
            .collect();

        for radar in self.radars() {
            let Some(config) = radar.radar_config() else {
                continue;
            };
            for area in &config.areas {
                if let Some(status) = beds.get_mut(&area.object_id) {
                    status.in_any_boundary = true;
                    if area.area_kind == crate::object::AreaKind::MonitorBed {
                        status.should_be_monitor = true;
                    }
                }
            }
        }

        for (bed_id, status) in beds {
            let Some(bed) = self.get_mut(&bed_id) else {
                continue;
            };
            if status.should_be_monitor && bed.kind != ObjectKind::MonitorBed {
                debug!("promote bed {bed_id} to MonitorBed");
                bed.kind = ObjectKind::MonitorBed;
                bed.device.kind = ObjectKind::MonitorBed;
                if let Some(style) = ObjectKind::MonitorBed.furniture_style() {
                    bed.visual.color = style.color.to_string();
                }
            } else if status.in_any_boundary
                && !status.should_be_monitor
                && bed.kind == ObjectKind::MonitorBed
            {
                debug!("demote bed {bed_id} to Bed");
                bed.kind = ObjectKind::Bed;
                bed.device.kind = ObjectKind::Bed;
                if let Some(style) = ObjectKind::Bed.furniture_style() {
                    bed.visual.color = style.color.to_string();
                }
            }
        }
    }

    /// Hardware-facing reports for every radar with a configured boundary
    pub fn radar_reports(&self) -> Result<Vec<RadarReport>, LayoutError> {
        let mut reports = Vec::new();
        for radar in self.radars() {
            if let Some(report) = radar_report(radar, &self.objects)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }
}

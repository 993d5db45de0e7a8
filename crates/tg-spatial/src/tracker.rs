//! Zone entry / exit / dwell tracking for location fixes.
//!
//! The `ZoneTracker` is the stateful consumer of
//! [`get_containing_zones`]: feed it each tourist's fixes in time order and it
//! reports the transitions the zones' [`AlertConfig`](crate::AlertConfig)s
//! ask for.
//!
//! Occupancy is tracked for every zone regardless of alert flags, so turning
//! on `alert_on_exit` later still reports exits from zones entered earlier.

use rustc_hash::FxHashMap;
use tracing::debug;

use tg_core::{Coordinate, TouristId, ZoneId};

use crate::containment::get_containing_zones;
use crate::zone::GeofenceZone;

// ── Events ────────────────────────────────────────────────────────────────────

/// What happened to a tourist relative to one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ZoneEventKind {
    Entered,
    Exited { dwell_secs: u64 },
    DwellExceeded { dwell_secs: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneEvent {
    pub tourist: TouristId,
    pub zone:    ZoneId,
    pub at_secs: u64,
    pub kind:    ZoneEventKind,
}

// ── Tracker ───────────────────────────────────────────────────────────────────

/// One zone visit in progress.
#[derive(Debug, Clone, Copy)]
struct Visit {
    entered_at:   u64,
    dwell_raised: bool,
}

/// Per-tourist zone occupancy.
///
/// The outer map is sparse: only tourists currently inside at least one zone
/// have an entry.
#[derive(Debug, Default)]
pub struct ZoneTracker {
    visits: FxHashMap<TouristId, FxHashMap<ZoneId, Visit>>,
}

impl ZoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one fix for `tourist` at unix time `at_secs` against `zones`.
    ///
    /// Events come out exits first, then entries, then dwell alerts; within
    /// each group they follow the order of `zones`.  A zone missing from
    /// `zones` that the tourist was inside is dropped without an event.
    pub fn update(
        &mut self,
        tourist: TouristId,
        coord:   Coordinate,
        at_secs: u64,
        zones:   &[GeofenceZone],
    ) -> Vec<ZoneEvent> {
        let inside = get_containing_zones(coord, zones);
        let visits = self.visits.entry(tourist).or_default();
        let mut events = Vec::new();
        let event = |zone: ZoneId, kind: ZoneEventKind| ZoneEvent { tourist, zone, at_secs, kind };

        // ── Exits ─────────────────────────────────────────────────────────
        for zone in zones {
            if inside.iter().any(|z| z.id == zone.id) {
                continue;
            }
            if let Some(visit) = visits.remove(&zone.id) {
                let dwell_secs = at_secs.saturating_sub(visit.entered_at);
                debug!(%tourist, zone = %zone.id, dwell_secs, "exited zone");
                if zone.alerts.alert_on_exit {
                    events.push(event(zone.id, ZoneEventKind::Exited { dwell_secs }));
                }
            }
        }
        visits.retain(|id, _| zones.iter().any(|z| z.id == *id));

        // ── Entries ───────────────────────────────────────────────────────
        for zone in &inside {
            if visits.contains_key(&zone.id) {
                continue;
            }
            visits.insert(zone.id, Visit { entered_at: at_secs, dwell_raised: false });
            debug!(%tourist, zone = %zone.id, "entered zone");
            if zone.alerts.alert_on_entry {
                events.push(event(zone.id, ZoneEventKind::Entered));
            }
        }

        // ── Dwell ─────────────────────────────────────────────────────────
        for zone in &inside {
            let Some(limit) = zone.alerts.dwell_time_limit_secs else { continue };
            let Some(visit) = visits.get_mut(&zone.id) else { continue };
            let dwell_secs = at_secs.saturating_sub(visit.entered_at);
            if !visit.dwell_raised && dwell_secs > limit {
                visit.dwell_raised = true;
                events.push(event(zone.id, ZoneEventKind::DwellExceeded { dwell_secs }));
            }
        }

        if visits.is_empty() {
            self.visits.remove(&tourist);
        }
        events
    }

    /// Zones `tourist` is currently inside, sorted by `ZoneId`.
    pub fn zones_of(&self, tourist: TouristId) -> Vec<ZoneId> {
        let mut ids: Vec<ZoneId> = self
            .visits
            .get(&tourist)
            .map(|v| v.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Seconds `tourist` has spent in `zone` as of `now_secs`, if inside.
    pub fn dwell_secs(&self, tourist: TouristId, zone: ZoneId, now_secs: u64) -> Option<u64> {
        self.visits
            .get(&tourist)?
            .get(&zone)
            .map(|v| now_secs.saturating_sub(v.entered_at))
    }

    /// Drop all state for `tourist` (e.g. on check-out).  No exit events.
    pub fn forget(&mut self, tourist: TouristId) {
        self.visits.remove(&tourist);
    }

    /// Number of tourists currently inside at least one zone.
    pub fn tracked_count(&self) -> usize {
        self.visits.len()
    }
}

#![forbid(unsafe_code)]

//! Diagnostic log and telemetry hooks for inspector instances.
//!
//! Entries are plain structs with builder setters and a JSONL encoding. A
//! [`DiagnosticLog`] keeps a bounded history; [`TelemetryHooks`] let an
//! embedder observe events as they happen (the wasm demo forwards them to the
//! browser console).

use std::sync::atomic::{AtomicU64, Ordering};
use web_time::Instant;

use crate::geometry::{Geometry, Size};
use crate::placement::PanelPlacement;
use crate::state::{InspectionState, InspectorEvent};

/// Env var switching timestamps to `seq * 1000` for reproducible logs.
pub const ENV_DETERMINISTIC: &str = "STYLELENS_DETERMINISTIC";

/// Global monotonic event counter for deterministic ordering.
static EVENT_COUNTER: AtomicU64 = AtomicU64::new(0);

#[inline]
fn next_event_seq() -> u64 {
    EVENT_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Check if deterministic timestamps are requested.
pub fn is_deterministic_mode() -> bool {
    std::env::var(ENV_DETERMINISTIC)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Diagnostic event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticEventKind {
    /// The inspection state changed.
    StateChanged,
    /// A computed-style snapshot was taken.
    SnapshotCaptured,
    /// Target geometry was (re)captured.
    GeometryCaptured,
    /// The panel reported a new rendered size.
    PanelMeasured,
    /// Panel placement was recomputed.
    PlacementComputed,
    /// A click inside the panel was swallowed.
    PanelClickSwallowed,
    /// Inspection was requested without a rendered target.
    TargetUnavailable,
}

impl DiagnosticEventKind {
    /// Get the JSONL event type string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StateChanged => "state_changed",
            Self::SnapshotCaptured => "snapshot_captured",
            Self::GeometryCaptured => "geometry_captured",
            Self::PanelMeasured => "panel_measured",
            Self::PlacementComputed => "placement_computed",
            Self::PanelClickSwallowed => "panel_click_swallowed",
            Self::TargetUnavailable => "target_unavailable",
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    /// Monotonic sequence number.
    pub seq: u64,
    /// Timestamp in microseconds.
    pub timestamp_us: u64,
    pub kind: DiagnosticEventKind,
    /// Event that caused the entry, if any.
    pub event: Option<InspectorEvent>,
    pub state: Option<InspectionState>,
    pub previous_state: Option<InspectionState>,
    /// Number of properties in a captured snapshot.
    pub property_count: Option<usize>,
    pub geometry: Option<Geometry>,
    pub panel_size: Option<Size>,
    pub placement: Option<PanelPlacement>,
    pub context: Option<String>,
    /// Checksum for determinism verification.
    pub checksum: u64,
}

impl DiagnosticEntry {
    /// Create a new entry with the current timestamp.
    pub fn new(kind: DiagnosticEventKind) -> Self {
        let seq = next_event_seq();
        let timestamp_us = if is_deterministic_mode() {
            seq.saturating_mul(1_000)
        } else {
            static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
            let start = START.get_or_init(Instant::now);
            start.elapsed().as_micros() as u64
        };

        Self {
            seq,
            timestamp_us,
            kind,
            event: None,
            state: None,
            previous_state: None,
            property_count: None,
            geometry: None,
            panel_size: None,
            placement: None,
            context: None,
            checksum: 0,
        }
    }

    #[must_use]
    pub fn with_event(mut self, event: InspectorEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Set previous and current state.
    #[must_use]
    pub fn with_states(mut self, previous: InspectionState, current: InspectionState) -> Self {
        self.previous_state = Some(previous);
        self.state = Some(current);
        self
    }

    #[must_use]
    pub fn with_property_count(mut self, count: usize) -> Self {
        self.property_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_panel_size(mut self, size: Size) -> Self {
        self.panel_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PanelPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Compute and set checksum.
    #[must_use]
    pub fn with_checksum(mut self) -> Self {
        self.checksum = self.compute_checksum();
        self
    }

    /// FNV-1a over the payload fields (sequence and timestamp excluded).
    fn compute_checksum(&self) -> u64 {
        let mut hash: u64 = 0xcbf29ce484222325;
        let payload = format!(
            "{}|{}|{}|{}|{:?}|{:?}|{:?}|{:?}|{}",
            self.kind.as_str(),
            self.event.map(InspectorEvent::as_str).unwrap_or(""),
            self.previous_state.map(InspectionState::as_str).unwrap_or(""),
            self.state.map(InspectionState::as_str).unwrap_or(""),
            self.property_count,
            self.geometry,
            self.panel_size,
            self.placement,
            self.context.as_deref().unwrap_or("")
        );
        for &b in payload.as_bytes() {
            hash ^= b as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash
    }

    /// Format as a single JSON line.
    pub fn to_jsonl(&self) -> String {
        let mut parts = vec![
            format!("\"seq\":{}", self.seq),
            format!("\"ts_us\":{}", self.timestamp_us),
            format!("\"kind\":\"{}\"", self.kind.as_str()),
        ];

        if let Some(event) = self.event {
            parts.push(format!("\"event\":\"{}\"", event.as_str()));
        }
        if let Some(state) = self.previous_state {
            parts.push(format!("\"prev_state\":\"{}\"", state.as_str()));
        }
        if let Some(state) = self.state {
            parts.push(format!("\"state\":\"{}\"", state.as_str()));
        }
        if let Some(count) = self.property_count {
            parts.push(format!("\"properties\":{count}"));
        }
        if let Some(g) = self.geometry {
            parts.push(format!("\"target_top\":{}", g.top));
            parts.push(format!("\"target_left\":{}", g.left));
            parts.push(format!("\"target_w\":{}", g.width));
            parts.push(format!("\"target_h\":{}", g.height));
        }
        if let Some(size) = self.panel_size {
            parts.push(format!("\"panel_w\":{}", size.width));
            parts.push(format!("\"panel_h\":{}", size.height));
        }
        if let Some(p) = self.placement {
            parts.push(format!("\"panel_top\":{}", p.top));
            parts.push(format!("\"panel_left\":{}", p.left));
            parts.push(format!("\"flipped\":{}", p.flipped));
            parts.push(format!("\"clamped\":{}", p.clamped));
        }
        if let Some(ref ctx) = self.context {
            let escaped = ctx.replace('\\', "\\\\").replace('"', "\\\"");
            parts.push(format!("\"context\":\"{escaped}\""));
        }
        parts.push(format!("\"checksum\":\"{:016x}\"", self.checksum));

        format!("{{{}}}", parts.join(","))
    }
}

/// Bounded diagnostic history.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
    max_entries: usize,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 1000,
        }
    }

    /// Set maximum entries to keep (0 = unbounded).
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn record(&mut self, entry: DiagnosticEntry) {
        if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn entries_of_kind(&self, kind: DiagnosticEventKind) -> Vec<&DiagnosticEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export all entries as JSONL.
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(DiagnosticEntry::to_jsonl)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Callback type for telemetry hooks.
pub type TelemetryCallback = Box<dyn Fn(&DiagnosticEntry) + Send + Sync>;

/// Observers for inspector events.
#[derive(Default)]
pub struct TelemetryHooks {
    on_state_change: Option<TelemetryCallback>,
    on_snapshot: Option<TelemetryCallback>,
    on_placement: Option<TelemetryCallback>,
    on_any_event: Option<TelemetryCallback>,
}

impl std::fmt::Debug for TelemetryHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryHooks")
            .field("on_state_change", &self.on_state_change.is_some())
            .field("on_snapshot", &self.on_snapshot.is_some())
            .field("on_placement", &self.on_placement.is_some())
            .field("on_any_event", &self.on_any_event.is_some())
            .finish()
    }
}

impl TelemetryHooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_state_change(mut self, f: impl Fn(&DiagnosticEntry) + Send + Sync + 'static) -> Self {
        self.on_state_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_snapshot(mut self, f: impl Fn(&DiagnosticEntry) + Send + Sync + 'static) -> Self {
        self.on_snapshot = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_placement(mut self, f: impl Fn(&DiagnosticEntry) + Send + Sync + 'static) -> Self {
        self.on_placement = Some(Box::new(f));
        self
    }

    /// Set catch-all callback.
    #[must_use]
    pub fn on_any(mut self, f: impl Fn(&DiagnosticEntry) + Send + Sync + 'static) -> Self {
        self.on_any_event = Some(Box::new(f));
        self
    }

    /// Dispatch an entry to relevant hooks.
    pub(crate) fn dispatch(&self, entry: &DiagnosticEntry) {
        if let Some(ref cb) = self.on_any_event {
            cb(entry);
        }

        let specific = match entry.kind {
            DiagnosticEventKind::StateChanged => &self.on_state_change,
            DiagnosticEventKind::SnapshotCaptured => &self.on_snapshot,
            DiagnosticEventKind::PlacementComputed => &self.on_placement,
            _ => return,
        };
        if let Some(cb) = specific {
            cb(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn jsonl_has_kind_and_fields() {
        let entry = DiagnosticEntry::new(DiagnosticEventKind::StateChanged)
            .with_event(InspectorEvent::Click)
            .with_states(
                InspectionState::Hovering,
                InspectionState::Inspecting {
                    pointer_inside: true,
                },
            )
            .with_checksum();
        let line = entry.to_jsonl();
        assert!(line.starts_with('{') && line.ends_with('}'));
        assert!(line.contains("\"kind\":\"state_changed\""));
        assert!(line.contains("\"event\":\"click\""));
        assert!(line.contains("\"prev_state\":\"hovering\""));
        assert!(line.contains("\"state\":\"inspecting\""));
        assert!(line.contains(&format!("\"checksum\":\"{:016x}\"", entry.checksum)));
    }

    #[test]
    fn placement_fields_serialized() {
        let entry = DiagnosticEntry::new(DiagnosticEventKind::PlacementComputed).with_placement(
            PanelPlacement {
                top: 10.0,
                left: 20.5,
                flipped: true,
                clamped: false,
            },
        );
        let line = entry.to_jsonl();
        assert!(line.contains("\"panel_top\":10"));
        assert!(line.contains("\"panel_left\":20.5"));
        assert!(line.contains("\"flipped\":true"));
        assert!(line.contains("\"clamped\":false"));
    }

    #[test]
    fn context_is_escaped() {
        let line = DiagnosticEntry::new(DiagnosticEventKind::TargetUnavailable)
            .with_context("say \"hi\"\\")
            .to_jsonl();
        assert!(line.contains(r#""context":"say \"hi\"\\""#));
    }

    #[test]
    fn checksum_ignores_sequence() {
        let a = DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured)
            .with_property_count(3)
            .with_checksum();
        let b = DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured)
            .with_property_count(3)
            .with_checksum();
        assert_ne!(a.seq, b.seq);
        assert_eq!(a.checksum, b.checksum);

        let c = DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured)
            .with_property_count(4)
            .with_checksum();
        assert_ne!(a.checksum, c.checksum);
    }

    #[test]
    fn log_is_bounded() {
        let mut log = DiagnosticLog::new().with_max_entries(2);
        for count in 0..3 {
            log.record(
                DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured)
                    .with_property_count(count),
            );
        }
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].property_count, Some(1));
        assert_eq!(log.to_jsonl().lines().count(), 2);
        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn hooks_dispatch_to_specific_and_catch_all() {
        let any = Arc::new(AtomicUsize::new(0));
        let snapshots = Arc::new(AtomicUsize::new(0));
        let hooks = TelemetryHooks::new()
            .on_any({
                let any = Arc::clone(&any);
                move |_| {
                    any.fetch_add(1, Ordering::Relaxed);
                }
            })
            .on_snapshot({
                let snapshots = Arc::clone(&snapshots);
                move |_| {
                    snapshots.fetch_add(1, Ordering::Relaxed);
                }
            });

        hooks.dispatch(&DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured));
        hooks.dispatch(&DiagnosticEntry::new(DiagnosticEventKind::PanelMeasured));

        assert_eq!(any.load(Ordering::Relaxed), 2);
        assert_eq!(snapshots.load(Ordering::Relaxed), 1);
    }
}

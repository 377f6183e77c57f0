#![forbid(unsafe_code)]

//! Inspector controller.
//!
//! [`Inspector`] owns one instance's state, the snapshot and geometry taken
//! when inspection starts, the panel's measured size, and the resulting
//! placement. Hosts forward pointer events to it and read back what to
//! render.
//!
//! # Usage
//!
//! ```
//! use stylelens_core::{ClientRect, GeometrySource, Inspector, InspectorConfig, Size, StyleSource, Viewport};
//!
//! struct Element;
//! impl StyleSource for Element {
//!     fn computed_properties(&self) -> Vec<(String, String)> {
//!         vec![("display".into(), "block".into())]
//!     }
//! }
//! impl GeometrySource for Element {
//!     fn client_rect(&self) -> ClientRect {
//!         ClientRect::new(50.0, 100.0, 200.0, 40.0)
//!     }
//!     fn viewport(&self) -> Viewport {
//!         Viewport::new(1024.0, 768.0)
//!     }
//! }
//!
//! let mut inspector = Inspector::new(InspectorConfig::default());
//! inspector.pointer_enter();
//! assert!(inspector.badge_visible());
//! inspector.click(Some(&Element)).unwrap();
//! assert!(inspector.panel_visible());
//! inspector.set_panel_size(Size::new(350.0, 300.0));
//! assert_eq!(inspector.placement().map(|p| p.top), Some(150.0));
//! ```

use crate::config::InspectorConfig;
use crate::diagnostics::{DiagnosticEntry, DiagnosticEventKind, DiagnosticLog, TelemetryHooks};
use crate::error::InspectError;
use crate::geometry::{Geometry, Size, Viewport};
use crate::host::{GeometrySource, InspectionTarget};
use crate::panel::PanelModel;
use crate::placement::{PanelPlacement, place_panel_with};
use crate::snapshot::ComputedStyleSnapshot;
use crate::state::{InspectionState, InspectorEvent, Transition};

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

/// Controller for one wrapped element.
#[derive(Debug, Default)]
pub struct Inspector {
    config: InspectorConfig,
    state: InspectionState,
    snapshot: Option<ComputedStyleSnapshot>,
    geometry: Option<Geometry>,
    viewport: Option<Viewport>,
    panel_size: Option<Size>,
    placement: Option<PanelPlacement>,
    diagnostic_log: Option<DiagnosticLog>,
    telemetry_hooks: Option<TelemetryHooks>,
}

impl Inspector {
    /// Create an idle inspector.
    ///
    /// Invalid spacing or height values in `config` are replaced by their
    /// defaults.
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        #[cfg(feature = "tracing")]
        if let Err(err) = config.validate() {
            warn!(%err, "replacing invalid config values with defaults");
        }
        let config = config.sanitized();
        let diagnostic_log = config.diagnostics.then(DiagnosticLog::new);
        Self {
            config,
            diagnostic_log,
            ..Default::default()
        }
    }

    /// Attach telemetry hooks.
    #[must_use]
    pub fn with_telemetry_hooks(mut self, hooks: TelemetryHooks) -> Self {
        self.telemetry_hooks = Some(hooks);
        self
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    #[inline]
    pub fn state(&self) -> InspectionState {
        self.state
    }

    /// The snapshot taken when the current inspection started.
    pub fn snapshot(&self) -> Option<&ComputedStyleSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn panel_size(&self) -> Option<Size> {
        self.panel_size
    }

    /// Panel placement; `None` until the panel has been measured.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement
    }

    #[inline]
    pub fn badge_visible(&self) -> bool {
        self.enabled() && self.state.shows_badge()
    }

    #[inline]
    pub fn panel_visible(&self) -> bool {
        self.enabled() && self.state.is_inspecting()
    }

    /// Panel contents while inspecting.
    pub fn panel(&self) -> Option<PanelModel> {
        if !self.panel_visible() {
            return None;
        }
        let snapshot = self.snapshot.as_ref()?;
        let geometry = self.geometry.unwrap_or_default();
        Some(PanelModel::build(snapshot, &geometry, &self.config))
    }

    pub fn diagnostic_log(&self) -> Option<&DiagnosticLog> {
        self.diagnostic_log.as_ref()
    }

    /// Pointer entered the wrapper.
    pub fn pointer_enter(&mut self) -> Transition {
        self.apply(InspectorEvent::PointerEnter)
    }

    /// Pointer left the wrapper.
    pub fn pointer_leave(&mut self) -> Transition {
        self.apply(InspectorEvent::PointerLeave)
    }

    /// Click on the wrapper.
    ///
    /// When the click opens the panel, the computed style and geometry of
    /// `target` are captured synchronously. A missing target leaves the state
    /// untouched and reports [`InspectError::TargetUnavailable`].
    pub fn click<T: InspectionTarget + ?Sized>(
        &mut self,
        target: Option<&T>,
    ) -> Result<Transition, InspectError> {
        if !self.enabled() {
            return Err(InspectError::Disabled);
        }
        let next = self.state.on(InspectorEvent::Click);
        if next.started_inspecting() {
            let Some(target) = target else {
                #[cfg(feature = "tracing")]
                warn!("inspection requested without a rendered target");
                if self.diagnostics_active() {
                    self.record_diagnostic(
                        DiagnosticEntry::new(DiagnosticEventKind::TargetUnavailable)
                            .with_event(InspectorEvent::Click),
                    );
                }
                return Err(InspectError::TargetUnavailable);
            };
            self.capture(target);
        }
        Ok(self.commit(InspectorEvent::Click, next))
    }

    /// Click inside the panel. Always swallowed; never changes the state.
    pub fn panel_click(&mut self) -> Transition {
        let transition = self.apply(InspectorEvent::PanelClick);
        if transition.handled && self.diagnostics_active() {
            self.record_diagnostic(
                DiagnosticEntry::new(DiagnosticEventKind::PanelClickSwallowed)
                    .with_event(InspectorEvent::PanelClick),
            );
        }
        transition
    }

    /// The panel's close control.
    pub fn close(&mut self) -> Transition {
        self.apply(InspectorEvent::Close)
    }

    /// Record the panel's rendered size and recompute placement.
    ///
    /// Returns whether the placement changed. Ignored unless inspecting.
    pub fn set_panel_size(&mut self, size: Size) -> bool {
        if !self.panel_visible() || self.panel_size == Some(size) {
            return false;
        }
        self.panel_size = Some(size);
        if self.diagnostics_active() {
            self.record_diagnostic(
                DiagnosticEntry::new(DiagnosticEventKind::PanelMeasured).with_panel_size(size),
            );
        }
        self.update_placement()
    }

    /// Re-measure the target (the snapshot is kept) and recompute placement.
    ///
    /// Returns whether the placement changed. Ignored unless inspecting.
    pub fn refresh_geometry<T: GeometrySource + ?Sized>(&mut self, target: &T) -> bool {
        if !self.panel_visible() {
            return false;
        }
        self.measure(target);
        self.update_placement()
    }

    fn apply(&mut self, event: InspectorEvent) -> Transition {
        if !self.enabled() {
            return Transition::ignored(self.state);
        }
        let next = self.state.on(event);
        self.commit(event, next)
    }

    fn commit(&mut self, event: InspectorEvent, transition: Transition) -> Transition {
        self.state = transition.to;
        if transition.stopped_inspecting() {
            self.snapshot = None;
            self.geometry = None;
            self.viewport = None;
            self.panel_size = None;
            self.placement = None;
        }
        if transition.changed() {
            #[cfg(feature = "tracing")]
            debug!(
                event = event.as_str(),
                from = transition.from.as_str(),
                to = transition.to.as_str(),
                "inspector state changed"
            );
            if self.diagnostics_active() {
                self.record_diagnostic(
                    DiagnosticEntry::new(DiagnosticEventKind::StateChanged)
                        .with_event(event)
                        .with_states(transition.from, transition.to),
                );
            }
        }
        transition
    }

    fn capture<T: InspectionTarget + ?Sized>(&mut self, target: &T) {
        let snapshot = target.snapshot();
        #[cfg(feature = "tracing")]
        trace!(properties = snapshot.len(), "captured computed style");
        if self.diagnostics_active() {
            self.record_diagnostic(
                DiagnosticEntry::new(DiagnosticEventKind::SnapshotCaptured)
                    .with_property_count(snapshot.len()),
            );
        }
        self.snapshot = Some(snapshot);
        self.panel_size = None;
        self.placement = None;
        self.measure(target);
    }

    fn measure<T: GeometrySource + ?Sized>(&mut self, target: &T) {
        let viewport = target.viewport();
        let geometry = Geometry::from_client_rect(target.client_rect(), &viewport);
        self.viewport = Some(viewport);
        self.geometry = Some(geometry);
        if self.diagnostics_active() {
            self.record_diagnostic(
                DiagnosticEntry::new(DiagnosticEventKind::GeometryCaptured).with_geometry(geometry),
            );
        }
    }

    fn update_placement(&mut self) -> bool {
        let (Some(geometry), Some(size), Some(viewport)) =
            (self.geometry, self.panel_size, self.viewport)
        else {
            return false;
        };
        let placement = place_panel_with(
            &geometry,
            size,
            &viewport,
            self.config.gap,
            self.config.edge_margin,
        );
        if self.placement == Some(placement) {
            return false;
        }
        self.placement = Some(placement);
        #[cfg(feature = "tracing")]
        trace!(
            top = placement.top,
            left = placement.left,
            flipped = placement.flipped,
            clamped = placement.clamped,
            "panel placed"
        );
        if self.diagnostics_active() {
            self.record_diagnostic(
                DiagnosticEntry::new(DiagnosticEventKind::PlacementComputed)
                    .with_placement(placement),
            );
        }
        true
    }

    #[inline]
    fn diagnostics_active(&self) -> bool {
        self.diagnostic_log.is_some() || self.telemetry_hooks.is_some()
    }

    fn record_diagnostic(&mut self, entry: DiagnosticEntry) {
        let entry = entry.with_checksum();
        if let Some(ref hooks) = self.telemetry_hooks {
            hooks.dispatch(&entry);
        }
        if let Some(ref mut log) = self.diagnostic_log {
            log.record(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::geometry::ClientRect;
    use crate::host::StyleSource;
    use std::cell::Cell;

    struct FakeTarget {
        properties: Vec<(&'static str, &'static str)>,
        rect: ClientRect,
        viewport: Viewport,
        reads: Cell<usize>,
    }

    impl FakeTarget {
        fn new() -> Self {
            Self {
                properties: vec![
                    ("display", "none"),
                    ("position", "relative"),
                    ("color", "rgb(255, 0, 0)"),
                ],
                rect: ClientRect::new(50.0, 100.0, 200.0, 40.0),
                viewport: Viewport::new(1024.0, 768.0),
                reads: Cell::new(0),
            }
        }
    }

    impl StyleSource for FakeTarget {
        fn computed_properties(&self) -> Vec<(String, String)> {
            self.reads.set(self.reads.get() + 1);
            self.properties
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect()
        }
    }

    impl GeometrySource for FakeTarget {
        fn client_rect(&self) -> ClientRect {
            self.rect
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }
    }

    fn inspecting(target: &FakeTarget) -> Inspector {
        let mut inspector = Inspector::new(InspectorConfig::default().with_diagnostics(true));
        inspector.pointer_enter();
        inspector.click(Some(target)).unwrap();
        inspector
    }

    #[test]
    fn hover_shows_badge() {
        let mut inspector = Inspector::new(InspectorConfig::default());
        assert!(!inspector.badge_visible());
        inspector.pointer_enter();
        assert!(inspector.badge_visible());
        inspector.pointer_leave();
        assert!(!inspector.badge_visible());
        assert_eq!(inspector.state(), InspectionState::Idle);
    }

    #[test]
    fn click_captures_snapshot_and_geometry() {
        let target = FakeTarget::new();
        let inspector = inspecting(&target);
        assert!(inspector.panel_visible());
        assert!(!inspector.badge_visible());
        assert_eq!(inspector.snapshot().map(|s| s.len()), Some(3));
        assert_eq!(
            inspector.geometry(),
            Some(Geometry::new(100.0, 50.0, 200.0, 40.0))
        );
        assert_eq!(target.reads.get(), 1);
        assert_eq!(inspector.placement(), None);
    }

    #[test]
    fn click_while_idle_propagates() {
        let target = FakeTarget::new();
        let mut inspector = Inspector::new(InspectorConfig::default());
        let t = inspector.click(Some(&target)).unwrap();
        assert!(!t.handled);
        assert_eq!(inspector.state(), InspectionState::Idle);
        assert_eq!(target.reads.get(), 0);
    }

    #[test]
    fn missing_target_is_reported_and_state_kept() {
        let mut inspector = Inspector::new(InspectorConfig::default().with_diagnostics(true));
        inspector.pointer_enter();
        let err = inspector.click::<FakeTarget>(None).unwrap_err();
        assert_eq!(err, InspectError::TargetUnavailable);
        assert_eq!(inspector.state(), InspectionState::Hovering);
        let log = inspector.diagnostic_log().unwrap();
        assert_eq!(
            log.entries_of_kind(DiagnosticEventKind::TargetUnavailable).len(),
            1
        );
    }

    #[test]
    fn missing_target_is_fine_when_not_starting() {
        let mut inspector = Inspector::new(InspectorConfig::default());
        let t = inspector.click::<FakeTarget>(None).unwrap();
        assert!(!t.changed());
    }

    #[test]
    fn panel_click_is_swallowed() {
        let target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        let before = inspector.state();
        let t = inspector.panel_click();
        assert!(t.handled);
        assert_eq!(inspector.state(), before);
        assert!(inspector.panel_visible());
        let log = inspector.diagnostic_log().unwrap();
        assert_eq!(
            log.entries_of_kind(DiagnosticEventKind::PanelClickSwallowed).len(),
            1
        );
    }

    #[test]
    fn close_goes_idle_and_drops_snapshot() {
        let target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        inspector.set_panel_size(Size::new(350.0, 300.0));
        let t = inspector.close();
        assert_eq!(t.to, InspectionState::Idle);
        assert!(inspector.snapshot().is_none());
        assert!(inspector.placement().is_none());
        assert!(inspector.panel().is_none());
    }

    #[test]
    fn leaving_keeps_panel_and_second_click_toggles_off() {
        let target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        inspector.pointer_leave();
        assert!(inspector.panel_visible());
        assert!(!inspector.badge_visible());

        inspector.pointer_enter();
        let t = inspector.click(Some(&target)).unwrap();
        assert!(t.handled);
        assert_eq!(inspector.state(), InspectionState::Hovering);
        assert!(inspector.badge_visible());
        assert_eq!(target.reads.get(), 1);
    }

    #[test]
    fn reinspecting_takes_a_new_snapshot() {
        let mut target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        inspector.close();
        target.properties.push(("opacity", "0.5"));
        inspector.pointer_leave();
        inspector.pointer_enter();
        inspector.click(Some(&target)).unwrap();
        assert_eq!(inspector.snapshot().map(|s| s.get("opacity")), Some(Some("0.5")));
        assert_eq!(target.reads.get(), 2);
    }

    #[test]
    fn panel_size_drives_placement() {
        let target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        assert!(inspector.set_panel_size(Size::new(350.0, 300.0)));
        let placement = inspector.placement().unwrap();
        assert_eq!((placement.top, placement.left), (150.0, 50.0));

        // Same size again is a no-op.
        assert!(!inspector.set_panel_size(Size::new(350.0, 300.0)));

        // A taller panel no longer fits below the target.
        assert!(inspector.set_panel_size(Size::new(350.0, 700.0)));
        let placement = inspector.placement().unwrap();
        assert!(placement.flipped);
        assert_eq!(placement.top, 10.0);
    }

    #[test]
    fn refresh_geometry_recomputes_without_new_snapshot() {
        let mut target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        inspector.set_panel_size(Size::new(350.0, 300.0));

        target.viewport = Viewport::new(300.0, 768.0);
        assert!(inspector.refresh_geometry(&target));
        assert_eq!(inspector.placement().map(|p| p.left), Some(10.0));
        assert_eq!(target.reads.get(), 1);
    }

    #[test]
    fn size_updates_ignored_when_not_inspecting() {
        let mut inspector = Inspector::new(InspectorConfig::default());
        assert!(!inspector.set_panel_size(Size::new(1.0, 1.0)));
        assert!(!inspector.refresh_geometry(&FakeTarget::new()));
        assert_eq!(inspector.panel_size(), None);
    }

    #[test]
    fn invalid_spacing_falls_back_to_defaults() {
        let config = InspectorConfig {
            gap: f64::NAN,
            edge_margin: -25.0,
            ..InspectorConfig::default()
        };
        let mut inspector = Inspector::new(config);
        assert_eq!(inspector.config().gap, 10.0);
        assert_eq!(inspector.config().edge_margin, 10.0);

        let target = FakeTarget::new();
        inspector.pointer_enter();
        inspector.click(Some(&target)).unwrap();
        inspector.set_panel_size(Size::new(300.0, 200.0));
        let placement = inspector.placement().unwrap();
        assert_eq!((placement.top, placement.left), (150.0, 50.0));
    }

    #[test]
    fn panel_model_reflects_snapshot() {
        let target = FakeTarget::new();
        let inspector = inspecting(&target);
        let panel = inspector.panel().unwrap();
        assert_eq!(panel.summary.display, "none");
        assert_eq!(panel.summary.width, 200);
        let layout = panel.section(Category::Layout).unwrap();
        assert_eq!(layout.entries, vec![("position".into(), "relative".into())]);
        assert_eq!(panel.raw.len(), 3);
    }

    #[test]
    fn disabled_inspector_ignores_everything() {
        let target = FakeTarget::new();
        let mut inspector = Inspector::new(InspectorConfig::default().with_enabled(false));
        assert!(!inspector.pointer_enter().changed());
        assert_eq!(
            inspector.click(Some(&target)).unwrap_err(),
            InspectError::Disabled
        );
        assert!(!inspector.panel_click().handled);
        assert!(!inspector.close().handled);
        assert_eq!(inspector.state(), InspectionState::Idle);
        assert!(!inspector.badge_visible());
        assert!(!inspector.panel_visible());
        assert_eq!(target.reads.get(), 0);
    }

    #[test]
    fn diagnostics_trace_full_session() {
        let target = FakeTarget::new();
        let mut inspector = inspecting(&target);
        inspector.set_panel_size(Size::new(350.0, 300.0));
        inspector.close();

        let kinds: Vec<DiagnosticEventKind> = inspector
            .diagnostic_log()
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                DiagnosticEventKind::StateChanged,
                DiagnosticEventKind::SnapshotCaptured,
                DiagnosticEventKind::GeometryCaptured,
                DiagnosticEventKind::StateChanged,
                DiagnosticEventKind::PanelMeasured,
                DiagnosticEventKind::PlacementComputed,
                DiagnosticEventKind::StateChanged,
            ]
        );
    }

    #[test]
    fn telemetry_hooks_see_placements() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let placements = Arc::new(AtomicUsize::new(0));
        let hooks = TelemetryHooks::new().on_placement({
            let placements = Arc::clone(&placements);
            move |_| {
                placements.fetch_add(1, Ordering::Relaxed);
            }
        });
        let target = FakeTarget::new();
        let mut inspector = Inspector::new(InspectorConfig::default()).with_telemetry_hooks(hooks);
        inspector.pointer_enter();
        inspector.click(Some(&target)).unwrap();
        inspector.set_panel_size(Size::new(100.0, 100.0));
        inspector.set_panel_size(Size::new(100.0, 120.0));
        assert_eq!(placements.load(Ordering::Relaxed), 1);
        assert!(inspector.diagnostic_log().is_none());
    }
}

#![forbid(unsafe_code)]

//! Floating panel placement.
//!
//! The panel prefers to sit below the target, left-aligned with it. If it
//! would overflow the bottom of the viewport it flips above the target; if it
//! would overflow the right edge it is clamped against it. Each axis is
//! checked once: there is no iterative fitting, so a panel larger than the
//! viewport may still overflow.
//!
//! Inputs and outputs are document coordinates. The overflow checks subtract
//! the scroll offsets, so on an unscrolled page they reduce to
//! `top + panel.height > viewport.height` and
//! `left + panel.width > viewport.width`.

use crate::geometry::{Geometry, Size, Viewport};

/// Distance between the target and the panel.
pub const DEFAULT_GAP: f64 = 10.0;
/// Minimum distance kept from the viewport edge after a flip or clamp.
pub const DEFAULT_EDGE_MARGIN: f64 = 10.0;

/// Where the panel goes, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelPlacement {
    pub top: f64,
    pub left: f64,
    /// The panel was moved above the target.
    pub flipped: bool,
    /// The panel was pulled back from the right edge.
    pub clamped: bool,
}

impl PanelPlacement {
    /// Offset this placement into the coordinate space of a positioned
    /// ancestor whose document box is `origin`.
    #[must_use]
    pub fn relative_to(&self, origin: &Geometry) -> Self {
        Self {
            top: self.top - origin.top,
            left: self.left - origin.left,
            ..*self
        }
    }
}

/// Place a panel of `panel` size next to `target` with the default gap and
/// edge margin.
pub fn place_panel(target: &Geometry, panel: Size, viewport: &Viewport) -> PanelPlacement {
    place_panel_with(target, panel, viewport, DEFAULT_GAP, DEFAULT_EDGE_MARGIN)
}

/// Place a panel with an explicit gap and edge margin.
pub fn place_panel_with(
    target: &Geometry,
    panel: Size,
    viewport: &Viewport,
    gap: f64,
    margin: f64,
) -> PanelPlacement {
    let mut placement = PanelPlacement {
        top: target.bottom() + gap,
        left: target.left,
        flipped: false,
        clamped: false,
    };

    if placement.top - viewport.scroll_y + panel.height > viewport.height {
        let above = target.top - viewport.scroll_y - panel.height - gap;
        placement.top = viewport.scroll_y + above.max(margin);
        placement.flipped = true;
    }

    if placement.left - viewport.scroll_x + panel.width > viewport.width {
        let clamped = viewport.width - panel.width - margin;
        placement.left = viewport.scroll_x + clamped.max(margin);
        placement.clamped = true;
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Geometry {
        Geometry::new(100.0, 50.0, 200.0, 40.0)
    }

    const PANEL: Size = Size::new(350.0, 300.0);

    #[test]
    fn preferred_below_left_when_it_fits() {
        let placement = place_panel(&target(), PANEL, &Viewport::new(1024.0, 768.0));
        assert_eq!(placement.top, 150.0);
        assert_eq!(placement.left, 50.0);
        assert!(!placement.flipped);
        assert!(!placement.clamped);
    }

    #[test]
    fn flips_above_when_bottom_overflows() {
        // 150 + 300 = 450 > 400
        let placement = place_panel(&target(), PANEL, &Viewport::new(1024.0, 400.0));
        assert_eq!(placement.top, 10.0);
        assert!(placement.flipped);
        assert_eq!(placement.left, 50.0);
    }

    #[test]
    fn exact_fit_does_not_flip() {
        // 150 + 300 = 450, not greater than 450
        let placement = place_panel(&target(), PANEL, &Viewport::new(1024.0, 450.0));
        assert_eq!(placement.top, 150.0);
        assert!(!placement.flipped);
    }

    #[test]
    fn viewport_of_500_keeps_preferred_top() {
        let placement = place_panel(&target(), PANEL, &Viewport::new(1024.0, 500.0));
        assert_eq!(placement.top, 150.0);
        assert!(!placement.flipped);
    }

    #[test]
    fn clamps_left_when_right_overflows() {
        // 50 + 350 = 400 > 300; max(10, 300 - 350 - 10) = 10
        let placement = place_panel(&target(), PANEL, &Viewport::new(300.0, 768.0));
        assert_eq!(placement.left, 10.0);
        assert!(placement.clamped);
        assert!(!placement.flipped);
    }

    #[test]
    fn clamp_keeps_panel_against_right_edge() {
        let target = Geometry::new(100.0, 600.0, 100.0, 40.0);
        let placement = place_panel(&target, PANEL, &Viewport::new(800.0, 768.0));
        assert_eq!(placement.left, 800.0 - 350.0 - 10.0);
    }

    #[test]
    fn flip_uses_space_above_target() {
        let target = Geometry::new(500.0, 20.0, 100.0, 50.0);
        let placement = place_panel(&target, PANEL, &Viewport::new(1024.0, 600.0));
        assert_eq!(placement.top, 500.0 - 300.0 - 10.0);
        assert!(placement.flipped);
    }

    #[test]
    fn pathological_panel_still_overflows() {
        let placement = place_panel(&target(), Size::new(2000.0, 2000.0), &Viewport::new(300.0, 300.0));
        assert_eq!(placement.top, 10.0);
        assert_eq!(placement.left, 10.0);
        assert!(placement.flipped && placement.clamped);
    }

    #[test]
    fn scrolled_page_compares_in_viewport_space() {
        // Target sits 100px below the top of a viewport scrolled by 1000px.
        let target = Geometry::new(1100.0, 50.0, 200.0, 40.0);
        let viewport = Viewport::new(1024.0, 768.0).with_scroll(0.0, 1000.0);
        let placement = place_panel(&target, PANEL, &viewport);
        assert_eq!(placement.top, 1150.0);
        assert!(!placement.flipped);

        let short = Viewport::new(1024.0, 400.0).with_scroll(0.0, 1000.0);
        let placement = place_panel(&target, PANEL, &short);
        assert_eq!(placement.top, 1010.0);
        assert!(placement.flipped);
    }

    #[test]
    fn custom_gap_and_margin() {
        let placement = place_panel_with(&target(), PANEL, &Viewport::new(300.0, 400.0), 4.0, 2.0);
        assert_eq!(placement.top, 2.0);
        assert_eq!(placement.left, 2.0);

        let placement = place_panel_with(&target(), PANEL, &Viewport::new(1024.0, 768.0), 4.0, 2.0);
        assert_eq!(placement.top, 144.0);
    }

    #[test]
    fn relative_to_origin() {
        let placement = place_panel(&target(), PANEL, &Viewport::new(1024.0, 768.0));
        let relative = placement.relative_to(&Geometry::new(100.0, 50.0, 200.0, 40.0));
        assert_eq!(relative.top, 50.0);
        assert_eq!(relative.left, 0.0);
    }
}

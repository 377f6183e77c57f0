#![forbid(unsafe_code)]

//! Demo elements and a scripted inspection against a simulated host.
//!
//! The browser page renders [`DEMO_ELEMENTS`] for real. Natively each one is
//! backed by a [`SimulatedElement`]: initial values overridden by the
//! element's declarations, with a fixed document box.

use std::fmt::Write as _;

use stylelens_core::{
    ClientRect, ComputedStyleSnapshot, DiagnosticLog, Geometry, GeometrySource, InspectError,
    Inspector, InspectorConfig, PanelModel, PanelPlacement, Size, StyleSource, Viewport,
};

/// One wrapped element of the demo page.
#[derive(Debug)]
pub struct DemoElement {
    pub id: &'static str,
    pub label: &'static str,
    pub text: &'static str,
    /// Longhand declarations applied on top of the initial values.
    pub declarations: &'static [(&'static str, &'static str)],
    /// Document-absolute box used by the simulated host.
    pub document_box: Geometry,
}

impl DemoElement {
    /// Inline `style` attribute for the browser page.
    pub fn inline_style(&self) -> String {
        let mut style = String::new();
        for (name, value) in self.declarations {
            let _ = write!(style, "{name}:{value};");
        }
        let _ = write!(
            style,
            "width:{}px;height:{}px;",
            self.document_box.width, self.document_box.height
        );
        style
    }
}

pub static DEMO_ELEMENTS: [DemoElement; 3] = [
    DemoElement {
        id: "save-button",
        label: "Button",
        text: "Save changes",
        declarations: &[
            ("display", "inline-block"),
            ("padding-top", "8px"),
            ("padding-right", "16px"),
            ("padding-bottom", "8px"),
            ("padding-left", "16px"),
            ("font-size", "14px"),
            ("font-weight", "600"),
            ("color", "rgb(255, 255, 255)"),
            ("background-color", "rgb(45, 108, 223)"),
            ("border-top-left-radius", "4px"),
            ("border-top-right-radius", "4px"),
            ("border-bottom-right-radius", "4px"),
            ("border-bottom-left-radius", "4px"),
            ("cursor", "pointer"),
        ],
        document_box: Geometry::new(100.0, 50.0, 200.0, 40.0),
    },
    DemoElement {
        id: "profile-card",
        label: "Flex card",
        text: "Ada Lovelace · Analyst",
        declarations: &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("align-items", "flex-start"),
            ("row-gap", "8px"),
            ("column-gap", "8px"),
            ("margin-top", "24px"),
            ("padding-top", "16px"),
            ("padding-right", "16px"),
            ("padding-bottom", "16px"),
            ("padding-left", "16px"),
            ("background-color", "rgb(255, 255, 255)"),
            ("border-top-width", "1px"),
            ("border-top-style", "solid"),
            ("border-top-color", "rgb(221, 221, 221)"),
            ("border-top-left-radius", "8px"),
            ("box-shadow", "rgba(0, 0, 0, 0.15) 0px 2px 8px 0px"),
            ("transform", "matrix(1, 0, 0, 1, 0, -2)"),
        ],
        document_box: Geometry::new(200.0, 320.0, 360.0, 180.0),
    },
    DemoElement {
        id: "gallery-grid",
        label: "Grid",
        text: "Gallery",
        declarations: &[
            ("display", "grid"),
            ("position", "relative"),
            ("grid-template-columns", "192px 192px 192px"),
            ("grid-template-rows", "114px 114px"),
            ("row-gap", "12px"),
            ("column-gap", "12px"),
            ("justify-items", "center"),
        ],
        document_box: Geometry::new(460.0, 40.0, 600.0, 240.0),
    },
];

/// Initial values reported for every simulated element.
const INITIAL_VALUES: &[(&str, &str)] = &[
    ("display", "inline"),
    ("position", "static"),
    ("top", "auto"),
    ("right", "auto"),
    ("bottom", "auto"),
    ("left", "auto"),
    ("min-width", "auto"),
    ("min-height", "auto"),
    ("max-width", "none"),
    ("max-height", "none"),
    ("box-sizing", "content-box"),
    ("overflow-x", "visible"),
    ("overflow-y", "visible"),
    ("float", "none"),
    ("z-index", "auto"),
    ("margin-top", "0px"),
    ("margin-right", "0px"),
    ("margin-bottom", "0px"),
    ("margin-left", "0px"),
    ("padding-top", "0px"),
    ("padding-right", "0px"),
    ("padding-bottom", "0px"),
    ("padding-left", "0px"),
    ("font-family", "system-ui, sans-serif"),
    ("font-size", "16px"),
    ("font-weight", "400"),
    ("font-style", "normal"),
    ("line-height", "normal"),
    ("letter-spacing", "normal"),
    ("text-align", "start"),
    ("text-decoration-line", "none"),
    ("text-transform", "none"),
    ("white-space", "normal"),
    ("color", "rgb(0, 0, 0)"),
    ("background-color", "rgba(0, 0, 0, 0)"),
    ("background-image", "none"),
    ("border-top-width", "0px"),
    ("border-right-width", "0px"),
    ("border-bottom-width", "0px"),
    ("border-left-width", "0px"),
    ("border-top-style", "none"),
    ("border-top-color", "rgb(0, 0, 0)"),
    ("border-top-left-radius", "0px"),
    ("border-top-right-radius", "0px"),
    ("border-bottom-right-radius", "0px"),
    ("border-bottom-left-radius", "0px"),
    ("box-shadow", "none"),
    ("opacity", "1"),
    ("visibility", "visible"),
    ("cursor", "auto"),
    ("flex-direction", "row"),
    ("flex-wrap", "nowrap"),
    ("justify-content", "normal"),
    ("align-items", "normal"),
    ("align-content", "normal"),
    ("align-self", "auto"),
    ("flex-grow", "0"),
    ("flex-shrink", "1"),
    ("flex-basis", "auto"),
    ("order", "0"),
    ("row-gap", "normal"),
    ("column-gap", "normal"),
    ("grid-template-columns", "none"),
    ("grid-template-rows", "none"),
    ("grid-template-areas", "none"),
    ("grid-auto-flow", "row"),
    ("grid-auto-columns", "auto"),
    ("grid-auto-rows", "auto"),
    ("grid-column-start", "auto"),
    ("grid-column-end", "auto"),
    ("grid-row-start", "auto"),
    ("grid-row-end", "auto"),
    ("justify-items", "normal"),
    ("justify-self", "auto"),
    ("transform", "none"),
    ("perspective", "none"),
    ("translate", "none"),
    ("rotate", "none"),
    ("scale", "none"),
    ("transition-property", "all"),
    ("transition-duration", "0s"),
    ("animation-name", "none"),
    ("pointer-events", "auto"),
    ("user-select", "auto"),
    ("outline-style", "none"),
];

/// A demo element resolved without a browser.
#[derive(Debug, Clone)]
pub struct SimulatedElement {
    style: ComputedStyleSnapshot,
    rect: ClientRect,
    viewport: Viewport,
}

impl SimulatedElement {
    pub fn new(element: &DemoElement, viewport: Viewport) -> Self {
        let mut style: ComputedStyleSnapshot = INITIAL_VALUES.iter().copied().collect();
        for &(name, value) in element.declarations {
            style.insert(name, value);
        }
        let doc = element.document_box;
        style.insert("width", format!("{}px", doc.width));
        style.insert("height", format!("{}px", doc.height));
        style.insert(
            "transform-origin",
            format!("{}px {}px", doc.width / 2.0, doc.height / 2.0),
        );
        let rect = ClientRect::new(
            doc.left - viewport.scroll_x,
            doc.top - viewport.scroll_y,
            doc.width,
            doc.height,
        );
        Self {
            style,
            rect,
            viewport,
        }
    }
}

impl StyleSource for SimulatedElement {
    fn computed_properties(&self) -> Vec<(String, String)> {
        self.style
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect()
    }

    fn snapshot(&self) -> ComputedStyleSnapshot {
        self.style.clone()
    }
}

impl GeometrySource for SimulatedElement {
    fn client_rect(&self) -> ClientRect {
        self.rect
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Panel width used when there is no layout engine to measure it.
pub const PANEL_WIDTH: f64 = 320.0;
const LINE_HEIGHT: f64 = 18.0;
const PANEL_CHROME: f64 = 40.0;

/// Approximate rendered size of `model`: one line per header, summary row,
/// section heading and entry, capped at `max_height`.
pub fn estimate_panel_size(model: &PanelModel, max_height: f64) -> Size {
    // Title, size, position and display rows, plus the raw disclosure summary.
    let mut lines = 5;
    for section in &model.sections {
        lines += 1 + section.entries.len();
    }
    if model.raw_open {
        lines += model.raw.len();
    }
    let height = PANEL_CHROME + lines as f64 * LINE_HEIGHT;
    Size::new(PANEL_WIDTH, height.min(max_height))
}

/// One scripted inspection: hover, click, measure.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub element: &'static DemoElement,
    pub viewport: Viewport,
    pub config: InspectorConfig,
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct Report {
    pub element: &'static DemoElement,
    pub target: Geometry,
    pub panel: PanelModel,
    pub panel_size: Size,
    pub placement: PanelPlacement,
    /// JSONL diagnostic log, when diagnostics are enabled.
    pub diagnostics: Option<String>,
}

/// Hover the element, click it, and place the panel.
pub fn run(scenario: &Scenario) -> Result<Report, InspectError> {
    let target = SimulatedElement::new(scenario.element, scenario.viewport);
    let mut inspector = Inspector::new(scenario.config.clone());

    inspector.pointer_enter();
    inspector.click(Some(&target))?;
    let Some(panel) = inspector.panel() else {
        return Err(InspectError::TargetUnavailable);
    };
    let panel_size = estimate_panel_size(&panel, scenario.config.panel_max_height);
    inspector.set_panel_size(panel_size);

    tracing::info!(
        element = scenario.element.id,
        properties = panel.raw.len(),
        "inspected demo element"
    );

    Ok(Report {
        element: scenario.element,
        target: inspector.geometry().unwrap_or_default(),
        placement: inspector.placement().unwrap_or_default(),
        diagnostics: inspector.diagnostic_log().map(DiagnosticLog::to_jsonl),
        panel,
        panel_size,
    })
}

impl Report {
    /// Plain-text rendering of the run.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} (#{})", self.element.label, self.element.id);
        let _ = writeln!(
            out,
            "target: top {} left {} ({} x {})",
            self.target.top, self.target.left, self.target.width, self.target.height
        );
        let mut notes = String::new();
        if self.placement.flipped {
            notes.push_str(" flipped");
        }
        if self.placement.clamped {
            notes.push_str(" clamped");
        }
        let _ = writeln!(
            out,
            "panel: {} x {} at top {} left {}{notes}",
            self.panel_size.width, self.panel_size.height, self.placement.top, self.placement.left
        );
        out.push('\n');
        out.push_str(&self.panel.to_text());
        if let Some(jsonl) = &self.diagnostics {
            out.push('\n');
            out.push_str(jsonl);
        }
        out
    }
}

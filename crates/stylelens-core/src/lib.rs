#![forbid(unsafe_code)]

//! Core of the stylelens computed-style inspector.
//!
//! Everything here is host-independent: the browser component in
//! `stylelens-web` and the simulated host in `stylelens-demo` both drive the
//! same [`Inspector`] controller through the [`host`] traits.
//!
//! - [`state`]: the Idle / Hovering / Inspecting state machine.
//! - [`snapshot`]: the computed-style snapshot taken when inspection starts.
//! - [`geometry`] and [`placement`]: target measurement and panel placement.
//! - [`category`] and [`panel`]: grouping and the panel view model.
//! - [`config`], [`diagnostics`], [`error`]: the ambient pieces.

pub mod category;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod host;
pub mod inspector;
pub mod panel;
pub mod placement;
pub mod snapshot;
pub mod state;

pub use category::{CATEGORY_TABLE, Category, is_uninteresting};
pub use config::{EmptyCategories, InspectorConfig};
pub use diagnostics::{DiagnosticEntry, DiagnosticEventKind, DiagnosticLog, TelemetryHooks};
pub use error::{ConfigError, InspectError};
pub use geometry::{ClientRect, Geometry, Size, Viewport};
pub use host::{GeometrySource, InspectionTarget, StyleSource};
pub use inspector::Inspector;
pub use panel::{CategorySection, PanelModel, PanelSummary};
pub use placement::{PanelPlacement, place_panel};
pub use snapshot::ComputedStyleSnapshot;
pub use state::{InspectionState, InspectorEvent, Transition};

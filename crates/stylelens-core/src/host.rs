#![forbid(unsafe_code)]

//! Host collaborators.
//!
//! A host binds these traits to one rendered element. The browser binding
//! reads `getComputedStyle` and `getBoundingClientRect`; tests and the native
//! demo use simulated elements.

use crate::geometry::{ClientRect, Viewport};
use crate::snapshot::ComputedStyleSnapshot;

/// Resolves the computed style of the bound element.
pub trait StyleSource {
    /// Every applicable property name with its resolved value, in the host's
    /// enumeration order. The count is not fixed in advance.
    fn computed_properties(&self) -> Vec<(String, String)>;

    /// Capture a snapshot of [`Self::computed_properties`].
    fn snapshot(&self) -> ComputedStyleSnapshot {
        ComputedStyleSnapshot::from_pairs(self.computed_properties())
    }
}

/// Measures the bound element and the environment around it.
pub trait GeometrySource {
    /// Viewport-relative bounding box of the element.
    fn client_rect(&self) -> ClientRect;

    /// Current viewport size and scroll offsets.
    fn viewport(&self) -> Viewport;
}

/// Everything the inspector needs from a rendered element.
pub trait InspectionTarget: StyleSource + GeometrySource {}

impl<T: StyleSource + GeometrySource + ?Sized> InspectionTarget for T {}

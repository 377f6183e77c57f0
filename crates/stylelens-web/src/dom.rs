#![forbid(unsafe_code)]

//! DOM bindings for the host traits.
//!
//! Failed reads are not errors: a missing window or a rejected call yields an
//! empty property list or a zero box, which the panel renders as omitted
//! fields.

use stylelens_core::{ClientRect, Geometry, GeometrySource, Size, StyleSource, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, ResizeObserver};

/// Marks elements rendered by the inspector itself inside the wrapper.
pub(crate) const OVERLAY_ATTR: &str = "data-stylelens-overlay";

/// A rendered element bound to the host traits.
#[derive(Debug, Clone)]
pub struct DomTarget {
    element: Element,
}

impl DomTarget {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// The element wrapped by `wrapper`: its first element child that is not
    /// an inspector overlay, or the wrapper itself when there is none.
    pub fn wrapped_by(wrapper: &Element) -> Self {
        let mut child = wrapper.first_element_child();
        while let Some(el) = child {
            if !el.has_attribute(OVERLAY_ATTR) {
                return Self::new(el);
            }
            child = el.next_element_sibling();
        }
        Self::new(wrapper.clone())
    }

    /// Document-absolute box of the element.
    pub fn document_box(&self) -> Geometry {
        Geometry::from_client_rect(self.client_rect(), &self.viewport())
    }
}

impl StyleSource for DomTarget {
    fn computed_properties(&self) -> Vec<(String, String)> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let Ok(Some(style)) = window.get_computed_style(&self.element) else {
            return Vec::new();
        };
        (0..style.length())
            .map(|index| {
                let name = style.item(index);
                let value = style.get_property_value(&name).unwrap_or_default();
                (name, value)
            })
            .collect()
    }
}

impl GeometrySource for DomTarget {
    fn client_rect(&self) -> ClientRect {
        let rect = self.element.get_bounding_client_rect();
        ClientRect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        current_viewport()
    }
}

/// Size of the window's layout viewport and its scroll offsets.
pub fn current_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let px = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(px(window.inner_width()), px(window.inner_height())).with_scroll(
        window.scroll_x().unwrap_or(0.0),
        window.scroll_y().unwrap_or(0.0),
    )
}

/// Rendered size of an element (border box, after transforms).
pub(crate) fn rendered_size(element: &Element) -> Size {
    let rect = element.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

/// Runs a callback whenever an element's rendered size changes. Observation
/// stops when the watch is dropped.
pub(crate) struct SizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl SizeWatch {
    /// Watch `element`; `None` when the platform has no `ResizeObserver`.
    pub(crate) fn new(element: &Element, on_resize: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(element);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

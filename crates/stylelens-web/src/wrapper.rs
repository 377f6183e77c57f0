#![forbid(unsafe_code)]

//! The `InspectorWrapper` component.
//!
//! Rendering is reactive over an [`Inspector`] held in a signal. Pointer,
//! click and resize handling is done by native listeners on the wrapper (and
//! window), attached once the wrapper is mounted and dropped with the
//! component's owner. The open panel is re-measured whenever its rendered
//! size changes.

use gloo::events::EventListener;
use leptos::html;
use leptos::prelude::*;
use stylelens_core::{Geometry, Inspector, InspectorConfig, PanelModel, PanelSummary, TelemetryHooks};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlDivElement, Node};

use crate::dom::{DomTarget, SizeWatch, rendered_size};
use crate::style;

/// Wraps `children` with a hover badge and a click-to-open computed style
/// panel.
///
/// With `enabled` false (or a config that disables the inspector) the
/// children are rendered alone: no wrapper element, no listeners.
#[component]
pub fn InspectorWrapper(
    /// The element to inspect. The first rendered element is the target.
    children: Children,
    #[prop(default = true)] enabled: bool,
    /// Labels, spacing and panel options.
    #[prop(optional)]
    config: Option<InspectorConfig>,
    /// Callbacks for diagnostic entries.
    #[prop(optional)]
    telemetry: Option<TelemetryHooks>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    if !(enabled && config.enabled) {
        return children().into_any();
    }

    let badge_label = config.badge_label.clone();
    let max_height = config.panel_max_height;
    let mut inspector = Inspector::new(config);
    if let Some(hooks) = telemetry {
        inspector = inspector.with_telemetry_hooks(hooks);
    }

    let wiring = Wiring {
        inspector: RwSignal::new(inspector),
        wrapper: NodeRef::new(),
        panel: NodeRef::new(),
        close: NodeRef::new(),
        origin: RwSignal::new(Geometry::default()),
    };

    let listeners = StoredValue::new_local(Vec::<EventListener>::new());
    Effect::new(move |_| {
        if let Some(wrapper) = wiring.wrapper.get() {
            debug!("attaching inspector listeners");
            listeners.set_value(wiring.attach(&wrapper));
        }
    });
    // A fresh panel element is mounted each time inspection starts. Its width
    // depends on where it is placed, so measuring once is not enough.
    let panel_watch = StoredValue::new_local(None::<SizeWatch>);
    Effect::new(move |_| {
        let watch = wiring.panel.get().and_then(|panel| {
            wiring.measure_panel();
            SizeWatch::new(&panel, move || wiring.measure_panel())
        });
        panel_watch.set_value(watch);
    });

    let badge_visible = Memo::new(move |_| wiring.inspector.with(Inspector::badge_visible));
    let panel = Memo::new(move |_| wiring.inspector.with(Inspector::panel));
    let offset = Memo::new(move |_| {
        let origin = wiring.origin.get();
        wiring
            .inspector
            .with(Inspector::placement)
            .map(|placement| {
                let local = placement.relative_to(&origin);
                (local.top, local.left)
            })
    });

    let wrapper_ref = wiring.wrapper;
    view! {
        <div class="stylelens-wrapper" style=style::WRAPPER node_ref=wrapper_ref>
            {children()}
            <Show when=move || badge_visible.get()>
                <div class="stylelens-badge" data-stylelens-overlay="" style=style::BADGE>
                    {badge_label.clone()}
                </div>
            </Show>
            {move || panel.get().map(|model| panel_view(model, wiring, offset, max_height))}
        </div>
    }
    .into_any()
}

/// Signals and node refs shared by the listeners of one wrapper.
#[derive(Clone, Copy)]
struct Wiring {
    inspector: RwSignal<Inspector>,
    wrapper: NodeRef<html::Div>,
    panel: NodeRef<html::Div>,
    close: NodeRef<html::Button>,
    /// Document box of the wrapper, the panel's containing block.
    origin: RwSignal<Geometry>,
}

impl Wiring {
    fn attach(self, wrapper: &HtmlDivElement) -> Vec<EventListener> {
        let mut listeners = vec![
            EventListener::new(wrapper, "mouseenter", move |_| self.pointer_enter()),
            EventListener::new(wrapper, "mouseleave", move |_| self.pointer_leave()),
            EventListener::new(wrapper, "click", move |event| self.click(event)),
        ];
        if let Some(window) = web_sys::window() {
            listeners.push(EventListener::new(&window, "resize", move |_| {
                self.viewport_resized()
            }));
        }
        listeners
    }

    fn target(self) -> Option<DomTarget> {
        self.wrapper
            .get_untracked()
            .map(|wrapper| DomTarget::wrapped_by(&wrapper))
    }

    fn in_panel(self, node: &Node) -> bool {
        self.panel
            .get_untracked()
            .is_some_and(|panel| panel.contains(Some(node)))
    }

    fn on_close_control(self, node: &Node) -> bool {
        self.close
            .get_untracked()
            .is_some_and(|close| close.contains(Some(node)))
    }

    fn pointer_enter(self) {
        self.inspector.maybe_update(|i| i.pointer_enter().changed());
    }

    fn pointer_leave(self) {
        self.inspector.maybe_update(|i| i.pointer_leave().changed());
    }

    fn click(self, event: &Event) {
        let node = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        if let Some(node) = node.as_ref().filter(|n| self.in_panel(n)) {
            event.stop_propagation();
            if self.on_close_control(node) {
                self.inspector.maybe_update(|i| i.close().changed());
            } else {
                self.inspector.maybe_update(|i| {
                    i.panel_click();
                    false
                });
            }
            return;
        }

        let target = self.target();
        let mut handled = false;
        self.inspector.maybe_update(|i| match i.click(target.as_ref()) {
            Ok(transition) => {
                handled = transition.handled;
                transition.changed()
            }
            Err(err) => {
                warn!(%err, "click ignored");
                false
            }
        });
        if handled {
            event.stop_propagation();
        }
    }

    fn measure_panel(self) {
        let (Some(panel), Some(wrapper)) = (self.panel.get_untracked(), self.wrapper.get_untracked())
        else {
            return;
        };
        if !panel.is_connected() {
            return;
        }
        let origin = DomTarget::new(wrapper.into()).document_box();
        self.origin.maybe_update(|current| {
            let moved = *current != origin;
            *current = origin;
            moved
        });
        let size = rendered_size(&panel);
        self.inspector.maybe_update(|i| i.set_panel_size(size));
    }

    fn viewport_resized(self) {
        let Some(target) = self.target() else {
            return;
        };
        self.inspector.maybe_update(|i| i.refresh_geometry(&target) || i.panel_visible());
        self.measure_panel();
    }
}

fn panel_view(
    model: PanelModel,
    wiring: Wiring,
    offset: Memo<Option<(f64, f64)>>,
    max_height: f64,
) -> impl IntoView {
    let raw_heading = model.raw_heading();
    let PanelModel {
        title,
        summary,
        sections,
        raw,
        raw_open,
    } = model;
    let PanelSummary {
        width,
        height,
        position,
        display,
    } = summary;

    let sections = sections
        .into_iter()
        .map(|section| {
            let heading = section.heading();
            view! {
                <div class="stylelens-section" data-category=section.category.as_str()>
                    <div style=style::SECTION_HEADING>{heading}</div>
                    {entries_view(section.entries)}
                </div>
            }
        })
        .collect_view();

    let panel_ref = wiring.panel;
    let close_ref = wiring.close;
    view! {
        <div
            class="stylelens-panel"
            data-stylelens-overlay=""
            node_ref=panel_ref
            style=move || style::panel(max_height, offset.get())
        >
            <div style=style::HEADER>
                <span>{title}</span>
                <button
                    type="button"
                    class="stylelens-close"
                    aria-label="Close"
                    style=style::CLOSE
                    node_ref=close_ref
                >
                    "×"
                </button>
            </div>
            <div class="stylelens-summary">
                <div>{format!("size: {width} × {height} px")}</div>
                {(!position.is_empty()).then(|| view! { <div>"position: "{position}</div> })}
                {(!display.is_empty()).then(|| view! { <div>"display: "{display}</div> })}
            </div>
            {sections}
            <details class="stylelens-raw" open=raw_open style=style::RAW>
                <summary>{raw_heading}</summary>
                {entries_view(raw)}
            </details>
        </div>
    }
}

fn entries_view(entries: Vec<(String, String)>) -> impl IntoView {
    entries
        .into_iter()
        .map(|(name, value)| {
            view! {
                <div class="stylelens-entry">
                    <span style=style::ENTRY_NAME>{name}</span>
                    ": "
                    {value}
                </div>
            }
        })
        .collect_view()
}

#![forbid(unsafe_code)]

//! Browser demo page: the three demo elements, each wrapped in an
//! inspector, with a switch to disable them all.

use leptos::prelude::*;
use stylelens_core::{DiagnosticEntry, InspectorConfig, TelemetryHooks};
use stylelens_web::InspectorWrapper;

use crate::scenario::{DEMO_ELEMENTS, DemoElement};

#[component]
pub fn DemoApp() -> impl IntoView {
    let enabled = RwSignal::new(true);

    view! {
        <main style="font-family:system-ui,sans-serif;padding:24px;">
            <h1>"stylelens"</h1>
            <p>"Hover an element, then click it to see its computed style."</p>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || enabled.get()
                    on:change=move |ev| enabled.set(event_target_checked(&ev))
                />
                " Inspector enabled"
            </label>
            <div style="display:flex;flex-direction:column;align-items:flex-start;gap:32px;margin-top:24px;">
                {move || {
                    let on = enabled.get();
                    DEMO_ELEMENTS
                        .iter()
                        .map(|element| {
                            view! {
                                <section>
                                    <h2>{element.label}</h2>
                                    <InspectorWrapper
                                        enabled=on
                                        config=InspectorConfig::default().with_diagnostics(true)
                                        telemetry=console_hooks()
                                    >
                                        {element_view(element)}
                                    </InspectorWrapper>
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </main>
    }
}

fn element_view(element: &'static DemoElement) -> AnyView {
    let style = element.inline_style();
    match element.id {
        "save-button" => view! { <button id=element.id style=style>{element.text}</button> }.into_any(),
        "gallery-grid" => view! {
            <div id=element.id style=style>
                {(1..=6)
                    .map(|n| view! { <div class="cell">{format!("{} {n}", element.text)}</div> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        _ => view! {
            <div id=element.id style=style>
                <strong>{element.text}</strong>
                <span>"Click to open the panel"</span>
            </div>
        }
        .into_any(),
    }
}

fn console_hooks() -> TelemetryHooks {
    TelemetryHooks::new().on_any(log_entry)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn log_entry(entry: &DiagnosticEntry) {
    web_sys::console::debug_1(&entry.to_jsonl().into());
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn log_entry(entry: &DiagnosticEntry) {
    tracing::debug!(entry = %entry.to_jsonl(), "inspector diagnostic");
}

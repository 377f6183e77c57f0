#![forbid(unsafe_code)]

//! Inline styles for the inspector chrome. The host page loads no stylesheet
//! for it.

pub(crate) const WRAPPER: &str = "position:relative;display:inline-block;";

pub(crate) const BADGE: &str = "position:absolute;right:0;bottom:0;\
    padding:2px 6px;border-radius:3px;\
    background:#2d6cdf;color:#fff;\
    font:11px/1.4 ui-monospace,monospace;white-space:nowrap;\
    pointer-events:none;z-index:10000;";

pub(crate) const PANEL: &str = "position:absolute;z-index:10001;\
    min-width:260px;max-width:420px;overflow:auto;\
    padding:8px 10px;border:1px solid #3a3f4b;border-radius:4px;\
    background:#1e2129;color:#d7dae0;\
    font:12px/1.45 ui-monospace,monospace;text-align:left;\
    box-shadow:0 4px 14px rgba(0,0,0,.35);cursor:default;";

pub(crate) const HEADER: &str = "display:flex;justify-content:space-between;\
    align-items:center;margin-bottom:6px;font-weight:bold;";

pub(crate) const CLOSE: &str = "border:none;background:none;color:inherit;\
    font:inherit;font-size:14px;cursor:pointer;padding:0 2px;";

pub(crate) const SECTION_HEADING: &str = "margin:8px 0 2px;color:#7fb0ff;";

pub(crate) const ENTRY_NAME: &str = "color:#c9a26d;";

pub(crate) const RAW: &str = "margin-top:8px;";

/// Panel style with a measured offset applied.
pub(crate) fn panel(max_height: f64, offset: Option<(f64, f64)>) -> String {
    let mut style = format!("{PANEL}max-height:{max_height}px;");
    if let Some((top, left)) = offset {
        style.push_str(&format!("top:{top}px;left:{left}px;"));
    }
    style
}

#![forbid(unsafe_code)]

//! Browser frontend for stylelens.
//!
//! [`InspectorWrapper`] wraps arbitrary children; hovering shows a badge and
//! clicking opens a panel with the computed style of the wrapped element.
//!
//! ```ignore
//! use leptos::prelude::*;
//! use stylelens_web::InspectorWrapper;
//!
//! view! {
//!     <InspectorWrapper>
//!         <button>"Save"</button>
//!     </InspectorWrapper>
//! }
//! ```
//!
//! The component reads the browser through [`DomTarget`], which implements
//! the `stylelens-core` host traits. All listeners are native DOM listeners
//! on the wrapper element so that stopping propagation holds against
//! ancestors outside Leptos as well.

mod dom;
mod style;
mod wrapper;

pub use dom::{DomTarget, current_viewport};
pub use wrapper::InspectorWrapper;

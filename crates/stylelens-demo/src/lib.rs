#![forbid(unsafe_code)]

//! Demo harness for stylelens.
//!
//! - [`app`]: the Leptos page mounted by the wasm build.
//! - [`scenario`]: demo elements and the simulated host used natively.
//! - [`cli`]: argument parsing for the native binary.
//! - [`console`]: tracing output for the browser console.

pub mod app;
pub mod cli;
pub mod console;
pub mod scenario;

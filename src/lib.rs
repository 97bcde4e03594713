// asascan - lib.rs
//
// Library entry point, exposing the scanner and its supporting layers for
// integration testing and programmatic use. The CLI lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

// asascan - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, regex, tracing.
// Must NOT depend on: platform, app, or touch the filesystem directly.

pub mod model;
pub mod patterns;
pub mod report;
pub mod scanner;

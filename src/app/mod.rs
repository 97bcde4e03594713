// asascan - app/mod.rs
//
// Application layer: wiring config into the scanner and driving a run.
// Dependencies: core, platform.

pub mod run;

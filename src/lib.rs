// src/lib.rs
// Library surface of the extractor; the binary in main.rs and the
// integration tests both drive the pipeline through these modules.

pub mod config;
pub mod db;
pub mod export;
pub mod format;

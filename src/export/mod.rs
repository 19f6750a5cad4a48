// export/mod.rs

pub mod exporter;

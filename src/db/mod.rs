// db/mod.rs

pub mod gateway;
pub mod inspector;
pub mod models;

// src/data_analysis/mod.rs

pub mod butterworth;
pub mod derived_signals;

// src/data_analysis/mod.rs

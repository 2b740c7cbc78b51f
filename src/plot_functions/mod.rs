// src/plot_functions/mod.rs

pub mod plot_sample_intervals;
pub mod plot_window;

// src/plot_functions/mod.rs

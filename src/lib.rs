// src/lib.rs - Library interface for internal module access

pub mod channel_names;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod report;

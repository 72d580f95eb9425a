//! Configuration and shared data types

pub mod cold_start;
pub mod config;
pub mod models;

pub use cold_start::ColdStart;

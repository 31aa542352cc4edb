// Shared data models for the engine and the chart front-end.
pub mod models;
pub mod utils;

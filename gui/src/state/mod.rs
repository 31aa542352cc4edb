// Front-end state
pub mod app_state;

// Presentation components: chart payload adapters and viewport plumbing
pub mod chart;
pub mod viewport;

// Front-end services
pub mod feed;

pub mod analytics;
pub mod core;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod stores;
pub mod utils;

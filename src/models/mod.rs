pub mod api;
pub mod lead;
pub mod org;
pub mod user;

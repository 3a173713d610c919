pub mod analytics;
pub mod fallback;
pub mod health;
pub mod leads;
pub mod session;
pub mod users;

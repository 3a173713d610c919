pub mod org_store;
pub mod session;

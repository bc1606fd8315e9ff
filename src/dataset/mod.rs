pub mod store;
pub mod projection;

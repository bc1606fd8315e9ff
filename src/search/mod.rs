pub mod prefix_cache;
pub mod engine;
pub mod results;

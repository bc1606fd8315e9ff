pub mod token;
pub mod normalizer;

pub mod model;
pub mod normalizer;
pub mod platform;
pub mod quote;
pub mod trust;

pub mod consolidate;
pub mod model;

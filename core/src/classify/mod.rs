pub mod category;
pub mod signal;

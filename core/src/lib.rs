pub mod classify;
pub mod config;
pub mod determinism;
pub mod evidence;
pub mod insight;
pub mod lenient;
pub mod pipeline;
pub mod quality;
pub mod rank;

pub mod error;

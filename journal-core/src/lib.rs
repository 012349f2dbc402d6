pub mod collector;
pub mod conf;
pub mod importance;
pub mod journal;
pub mod logging;

pub use importance::Importance;

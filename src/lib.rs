pub mod artifacts;
pub mod config;
pub mod pipeline;
pub mod tools;

pub use config::Config;

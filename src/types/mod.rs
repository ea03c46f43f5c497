pub mod config;
pub mod gem;
pub mod signal;

pub mod config;
pub mod logging;

pub mod bootstrap;
pub mod fetch;
pub mod pipeline;
pub mod render;

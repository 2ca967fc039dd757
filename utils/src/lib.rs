pub mod config;
pub mod dirs;
pub mod email;
pub mod log;
pub mod math;
pub mod pipeline;
pub mod pool;
pub mod report;
pub mod stats;
pub mod store;
pub mod template;
pub mod window;

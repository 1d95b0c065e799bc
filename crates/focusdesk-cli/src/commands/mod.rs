pub mod assistant;
pub mod config;
pub mod name;
pub mod quote;
pub mod task;
pub mod timer;

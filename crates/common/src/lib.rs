pub mod config;
pub mod observability;
pub mod types;
pub mod upstream;

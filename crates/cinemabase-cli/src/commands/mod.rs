pub mod config;
pub mod context;
pub mod dashboard;
pub mod director;
pub mod movie;
pub mod prompts;
pub mod remote;

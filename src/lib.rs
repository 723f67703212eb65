pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod intent;
pub mod recommend;
pub mod server;
pub mod session;

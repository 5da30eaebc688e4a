pub mod config;
pub mod database;
pub mod errors;
pub mod resources;
pub mod schemas;
pub mod server;

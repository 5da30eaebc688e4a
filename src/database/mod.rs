pub mod connection;
pub mod entities;
pub mod seed_data;

pub use connection::*;

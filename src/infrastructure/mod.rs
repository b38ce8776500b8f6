pub mod config;
pub mod csv;

//! Employee directory server: configuration, HTTP layer, demo seed data.
//! The binary entry point lives in `main.rs`.

pub mod config;
pub mod http;
pub mod seed;

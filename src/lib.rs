//! Basic Server - minimal static file server
//!
//! Core library for HTTP parsing, file resolution and the accept loop.

pub mod config;
pub mod files;
pub mod http;
pub mod server;

//! trove application library
//!
//! Book, job, and product resource modules plus the bootstrap that wires them
//! to the document store and the HTTP server.

pub mod app;
pub mod modules;
pub mod utils;

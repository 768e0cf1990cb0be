//! Configuration, shared data model, and handler responses

pub mod config;
pub mod models;
pub mod response;

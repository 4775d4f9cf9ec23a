//! bookshelf - a small in-memory library catalog with a JSON HTTP API

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;

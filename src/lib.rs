//! Track Catalog Library
//!
//! HTTP endpoints for listing and uploading music tracks. Modules are
//! exposed for integration testing.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod state;
pub mod storage;
pub mod test_utils;

//! msx-sprite - MSX sprite converter
//!
//! PNG decoding and encoding, configuration, and the HTTP service around the
//! `msx-quant` conversion core. This library exposes modules for the binary
//! and for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;

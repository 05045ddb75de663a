//! Public API for the msx-quant crate.
//!
//! This module provides the high-level API: [`SpriteConverter`] builder and
//! [`ConvertError`] unified error type.

mod builder;
mod error;

pub use builder::{convert_msx, SpriteConverter, DEFAULT_SPRITE_SIZE};
pub use error::ConvertError;

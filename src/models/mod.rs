pub mod config;
pub mod sprite_spec;

pub use config::{AppConfig, ConfigError, LimitsConfig, OutputConfig, SpriteConfig};
pub use sprite_spec::{parse_dimension, SpriteSpec};

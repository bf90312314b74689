//! # Bestiary Configuration
//!
//! Configuration loading and defaults for the Bestiary services.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults (`service`)
//! 2. an optional TOML file, `config/services.toml` unless a path is given
//! 3. environment variables such as `BESTIARY_SERVER__PORT=8080`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bestiary_config::load_config;
//!
//! let config = load_config(None).unwrap();
//! println!("listening on {}", config.server.socket_addr());
//! ```

pub mod service;
pub mod service_config;

pub use service_config::{
    load_config, LogFormat, LoggingConfig, ModerationConfig, PaginationConfig, SecurityConfig,
    ServerConfig, ServiceConfig,
};

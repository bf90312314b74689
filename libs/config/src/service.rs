//! Service defaults
//!
//! Values used when neither the config file nor the environment set a key.

/// HTTP server defaults
pub mod server {
    pub const BIND_ADDRESS: &str = "127.0.0.1";

    pub const PORT: u16 = 3000;

    pub const ENABLE_CORS: bool = true;
}

/// Logging defaults
pub mod logging {
    /// Used unless `RUST_LOG` is set
    pub const LEVEL: &str = "info";
}

/// Listing defaults
pub mod pagination {
    /// Page size for `GET /users` when no limit is given
    pub const DEFAULT_USER_LIMIT: usize = 10;
}

/// Credential storage defaults
pub mod security {
    /// bcrypt work factor for stored passwords
    pub const BCRYPT_COST: u32 = 12;
}

/// Where the loader looks when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/services.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BESTIARY";

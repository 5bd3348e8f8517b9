//! Configuration module for careermap
//!
//! Configuration resolves in three layers: built-in defaults (the binary runs
//! with no config file at all), an optional TOML file, and environment
//! variables on top — the env layer exists because deployments of this
//! crawler are driven almost entirely by container environment.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_leagues, Config, CrawlConfig, LeagueEntry, OutputConfig, ProxyConfig, ServerConfig,
    SiteConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, default_config, load_config, load_config_with_hash,
};

// src/config/consts.rs

// Stored record
pub const DEFAULT_STORE_PATH: &str = "data/portfolio.json";

// Debug log
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Extraction
pub const DEFAULT_SKILLS_CATEGORY: &str = "Technical Skills";

// Config file looked up in the working directory when --config is not given
pub const CONFIG_FILE: &str = "profile_sync.toml";

/// Database connection and schema creation
pub mod database;

/// Server settings from config.toml and environment variables
pub mod settings;

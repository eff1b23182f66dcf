/// Database connection and table creation
pub mod database;

/// Application settings from the TOML settings file
pub mod settings;

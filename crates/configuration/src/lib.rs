// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ApiConfig, Config};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `JOURNAL__`-prefixed environment variables on
/// top (e.g. `JOURNAL__API__API_KEY`), and deserializes the result into our
/// strongly-typed `Config` struct.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .add_source(config::Environment::with_prefix("JOURNAL").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;

    if config.api.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url must not be empty".to_string(),
        ));
    }

    Ok(config)
}

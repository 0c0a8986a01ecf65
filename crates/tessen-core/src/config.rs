use config::Config;
use serde::Deserialize;

use crate::constants;
use crate::error::CoreResult;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub codec: CodecConfig,
    pub logging: LoggingConfig,
}

/// Caller-facing codec knobs. These are passed through to the codec as
/// explicit options at call time; nothing in the codec reads them
/// globally.
#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    /// Maximum note size in bytes on decode; zero means unbounded.
    pub truncation_size: usize,
    /// Synthesize FN from name parts even when an explicit file-as is set.
    pub always_override_file_as: bool,
    /// Product identifier emitted on generated vCards.
    pub prod_id: String,
    /// Populate the typed note body instead of the legacy plain body.
    pub typed_note_body: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Ok(Config::builder()
            .set_default("codec.truncation_size", 0)?
            .set_default("codec.always_override_file_as", false)?
            .set_default("codec.prod_id", constants::PROD_ID)?
            .set_default("codec.typed_note_body", true)?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings.codec, "configuration loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.codec.truncation_size, 0);
        assert!(!settings.codec.always_override_file_as);
        assert!(settings.codec.typed_note_body);
        assert_eq!(settings.codec.prod_id, constants::PROD_ID);
        assert_eq!(settings.logging.level, "debug");
    }
}

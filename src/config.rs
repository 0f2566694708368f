use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable prefix for every configuration key.
const ENV_PREFIX: &str = "TUNEFUL";

/// Named set of defaults, picked with `TUNEFUL_PROFILE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Development,
    Testing,
}

impl Profile {
    pub fn from_env() -> Result<Self> {
        match env::var(format!("{}_PROFILE", ENV_PREFIX)) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::Development),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
        }
    }

    fn default_database_url(self) -> &'static str {
        match self {
            Self::Development => "postgres://localhost:5432/tuneful",
            Self::Testing => "sqlite::memory:",
        }
    }

    fn default_upload_folder(self) -> &'static str {
        match self {
            Self::Development => "uploads",
            Self::Testing => "test-uploads",
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            other => bail!("Unknown configuration profile: {}", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub profile: Profile,
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub upload_folder: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let profile = Profile::from_env()?;
        Self::load(profile, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Layers `environment` over the defaults of `profile`.
    pub fn load(profile: Profile, environment: config::Environment) -> Result<Self> {
        config::Config::builder()
            .set_default("profile", profile.as_str())?
            .set_default("database_url", profile.default_database_url())?
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 8080)?
            .set_default("upload_folder", profile.default_upload_folder())?
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Location of an uploaded file inside the upload folder.
    pub fn upload_path(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.upload_folder.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_development_defaults() {
        let config = Config::load(Profile::Development, environment(&[])).unwrap();

        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.database_url, "postgres://localhost:5432/tuneful");
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.upload_folder, PathBuf::from("uploads"));
    }

    #[test]
    fn test_testing_profile_uses_in_memory_store() {
        let config = Config::load(Profile::Testing, environment(&[])).unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.upload_folder, PathBuf::from("test-uploads"));
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = Config::load(
            Profile::Development,
            environment(&[
                ("TUNEFUL_DATABASE_URL", "sqlite://catalog.db"),
                ("TUNEFUL_SERVER_PORT", "9000"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database_url, "sqlite://catalog.db");
        assert_eq!(config.server_port, 9000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::load(
            Profile::Development,
            environment(&[("TUNEFUL_SERVER_PORT", "not-a-port")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("Testing".parse::<Profile>().unwrap(), Profile::Testing);
        assert_eq!(
            "development".parse::<Profile>().unwrap(),
            Profile::Development
        );
        assert!("staging".parse::<Profile>().is_err());
    }

    #[test]
    fn test_upload_path() {
        let config = Config::load(Profile::Testing, environment(&[])).unwrap();
        assert_eq!(
            config.upload_path("song.mp3"),
            PathBuf::from("test-uploads").join("song.mp3")
        );
    }
}

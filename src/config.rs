use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_IMAGE_DIR: &str = "public/images";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Absolute directory holding uploaded images.
    pub image_dir: PathBuf,
    pub bind_address: String,
    pub max_payload_bytes: usize,
}

impl Config {
    /// Reads settings from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError("DATABASE_URL must be set".to_string()))?;

        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| ConfigError("JWT_SECRET must be set".to_string()))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError("JWT_SECRET cannot be empty".to_string()));
        }

        let image_dir = PathBuf::from(lookup("IMAGE_DIR").unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()));
        let image_dir = if image_dir.is_absolute() {
            image_dir
        } else {
            env::current_dir()
                .map_err(|err| ConfigError(format!("cannot resolve IMAGE_DIR: {}", err)))?
                .join(image_dir)
        };

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let max_payload_bytes = match lookup("MAX_PAYLOAD_BYTES") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError(format!("MAX_PAYLOAD_BYTES is not a number: {}", raw)))?,
            None => DEFAULT_MAX_PAYLOAD_BYTES,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            image_dir,
            bind_address,
            max_payload_bytes,
        })
    }
}

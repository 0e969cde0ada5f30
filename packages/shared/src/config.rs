use std::env;
use std::fmt;
use std::str::FromStr;

pub const USERNAME_VAR: &str = "AUTH_USERNAME";
pub const PASSWORD_VAR: &str = "AUTH_PASSWORD";
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const TOKEN_SOURCE_VAR: &str = "TOKEN_SOURCE";
pub const BIND_ADDRESS_VAR: &str = "BIND_ADDRESS";
pub const MAX_UPLOAD_BYTES_VAR: &str = "MAX_UPLOAD_BYTES";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "Required environment variable {} is not set", name)
            }
            ConfigError::InvalidVar { name, value } => {
                write!(f, "Environment variable {} has invalid value '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the authorization guard looks for the token on an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSource {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `X-Token: <token>`, no scheme prefix
    Header,
}

impl FromStr for TokenSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(TokenSource::Bearer),
            "header" | "x-token" => Ok(TokenSource::Header),
            _ => Err(()),
        }
    }
}

/// The single username/password pair allowed to log in.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Process-wide settings, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub credentials: Credentials,
    jwt_secret: String,
    pub token_source: TokenSource,
    pub bind_address: String,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// The username, password and signing secret are required; an unset or
    /// empty value for any of them is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let username = required(USERNAME_VAR)?;
        let password = required(PASSWORD_VAR)?;
        let jwt_secret = required(JWT_SECRET_VAR)?;

        let token_source = match lookup(TOKEN_SOURCE_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                name: TOKEN_SOURCE_VAR,
                value,
            })?,
            None => TokenSource::default(),
        };

        let max_upload_bytes = match lookup(MAX_UPLOAD_BYTES_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                name: MAX_UPLOAD_BYTES_VAR,
                value,
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            credentials: Credentials::new(username, password),
            jwt_secret,
            token_source,
            bind_address: lookup(BIND_ADDRESS_VAR)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            max_upload_bytes,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials)
            .field("jwt_secret", &"<redacted>")
            .field("token_source", &self.token_source)
            .field("bind_address", &self.bind_address)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

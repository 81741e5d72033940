//! Settings / Configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Names of environments for mailcode-server.
/// Overrides serialization to force lower case in settings and
/// environment variables
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local environment (local testing). Codes are logged, not mailed.
    Local,
    /// Official Develop environment.
    Dev,
    /// Official environment.
    Staging,
    /// Official Production environment.
    Prod,
}

impl AppEnvironment {
    /// Whether codes are delivered over SMTP. The local environment only
    /// logs them.
    pub fn sends_mail(&self) -> bool {
        !matches!(self, AppEnvironment::Local)
    }
}

/// Implement display to force environment to lower case
impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Server settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    /// Server [AppEnvironment].
    pub environment: AppEnvironment,
    /// Server port.
    pub port: u16,
    /// Server timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Verification code settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Verification {
    /// Whether the issued code is included in the send response.
    ///
    /// Anyone who can read the response then has the code without reading
    /// the email, so only enable this where clients depend on it.
    pub echo_code: bool,
}

/// SMTP submission settings.
#[derive(Clone, Deserialize)]
pub struct Smtp {
    /// SMTP relay host, contacted with STARTTLS.
    pub host: String,
    /// SMTP submission port.
    pub port: u16,
    /// Username for SMTP authentication.
    pub username: String,
    /// Password for SMTP authentication.
    pub password: String,
    /// From Address
    pub from_address: String,
    /// From Name
    pub from_name: String,
    /// Timeout for a single delivery in milliseconds.
    pub timeout_ms: u64,
}

impl Smtp {
    /// Convert `timeout_ms` to [Duration].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::fmt::Debug for Smtp {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Smtp")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Application settings.
pub struct Settings {
    /// Server settings
    pub server: Server,
    /// Verification code settings
    pub verification: Verification,
    /// SMTP settings
    pub smtp: Smtp,
    /// The path where the settings file resides.
    /// This can't actually be configured in the settings file itself, for obvious reasons.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(Self::default_path);
        // inject environment variables naming them properly on the settings
        // e.g. [smtp] password="foo"
        // would be injected with environment variable MAILCODE_SMTP__PASSWORD="foo"
        let s = Config::builder()
            .add_source(File::with_name(&path.as_path().display().to_string()))
            .add_source(
                Environment::with_prefix("MAILCODE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        let mut settings: Self = s.try_deserialize()?;
        settings.path = Some(path);
        Ok(settings)
    }

    /// The settings file shipped with the crate.
    pub fn default_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/settings.toml")
    }
}

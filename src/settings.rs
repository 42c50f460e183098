use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Auth flow used for password-grant requests against a Cognito user pool
pub const DEFAULT_AUTH_FLOW: &str = "USER_PASSWORD_AUTH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSettings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default = "ProviderSettings::legacy_default")]
    pub legacy_provider: ProviderSettings,
    #[serde(default = "ProviderSettings::new_provider_default")]
    pub new_provider: ProviderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Connection details for one Cognito user pool app client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub name: String,

    /// AWS region, used to derive the endpoint when `endpoint` is not set
    pub region: Option<String>,
    pub endpoint: Option<String>,

    // Direct value (can be overridden by environment variable)
    pub client_id: Option<String>,

    // Environment variable name for override
    pub client_id_env: Option<String>,

    #[serde(default = "default_auth_flow")]
    pub auth_flow: String,
}

fn default_auth_flow() -> String {
    DEFAULT_AUTH_FLOW.to_string()
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            application: ApplicationSettings::default(),
            legacy_provider: ProviderSettings::legacy_default(),
            new_provider: ProviderSettings::new_provider_default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Logger configured from `level`, which takes `RUST_LOG` filter syntax
    #[must_use]
    pub fn logger_builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&self.level);
        builder
    }
}

impl ProviderSettings {
    /// Defaults for the user pool being migrated away from
    #[must_use]
    pub fn legacy_default() -> Self {
        Self {
            name: "legacy".to_string(),
            region: Some("ap-southeast-2".to_string()),
            endpoint: None,
            client_id: None,
            client_id_env: Some("LEGACY_CLIENT_ID".to_string()),
            auth_flow: default_auth_flow(),
        }
    }

    /// Defaults for the user pool receiving migrated users
    #[must_use]
    pub fn new_provider_default() -> Self {
        Self {
            name: "new".to_string(),
            region: Some("ap-southeast-2".to_string()),
            endpoint: None,
            client_id: None,
            client_id_env: Some("NEW_CLIENT_ID".to_string()),
            auth_flow: default_auth_flow(),
        }
    }

    /// Get the client ID, checking environment variable first, then falling back to direct value
    #[must_use]
    pub fn get_client_id(&self) -> Option<String> {
        if let Some(env_var) = &self.client_id_env {
            if let Ok(value) = std::env::var(env_var) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
        self.client_id.clone().filter(|id| !id.is_empty())
    }

    /// Resolve the `InitiateAuth` endpoint: explicit endpoint wins, otherwise
    /// the regional Cognito IdP endpoint
    #[must_use]
    pub fn get_endpoint(&self) -> Option<String> {
        self.endpoint.clone().or_else(|| {
            self.region
                .as_ref()
                .map(|region| format!("https://cognito-idp.{region}.amazonaws.com/"))
        })
    }

    /// Check that the provider resolves to a usable endpoint and client ID
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint can be resolved, the endpoint is not a
    /// valid URL, or no client ID is configured.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self
            .get_endpoint()
            .ok_or_else(|| anyhow!("Provider {} has neither endpoint nor region", self.name))?;
        url::Url::parse(&endpoint)
            .with_context(|| format!("Provider {} has an invalid endpoint: {endpoint}", self.name))?;

        if self.get_client_id().is_none() {
            let hint = self.client_id_env.as_deref().unwrap_or("client_id");
            return Err(anyhow!(
                "Provider {} is missing a client ID (set {hint} or client_id in Settings.toml)",
                self.name
            ));
        }
        Ok(())
    }
}

impl BridgeSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    /// - A provider is missing its endpoint or client ID
    pub fn load() -> Result<Self> {
        Self::load_env_file();

        let (mut settings, sources) = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        settings
            .logging
            .logger_builder()
            .try_init()
            .context("Failed to initialize logger")?;
        for source in &sources {
            log::info!("{source}");
        }
        settings.validate()?;

        Ok(settings)
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `USERBRIDGE_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// The logger is not running yet, so the sources consulted are returned
    /// as messages for the caller to log.
    fn load_base_settings() -> Result<(Self, Vec<String>)> {
        let mut settings = Self::default();
        let mut sources = Vec::new();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_file(&default_config_path)?;
            sources.push(format!(
                "Loaded base settings from {}",
                default_config_path.display()
            ));
        }

        if let Ok(secrets_dir) = std::env::var("USERBRIDGE_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::from_file(&secrets_path)?;
                sources.push(format!("Overriding settings from {}", secrets_path.display()));
            } else {
                sources.push(format!(
                    "USERBRIDGE_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                ));
            }
        }

        Ok((settings, sources))
    }

    /// Parse a settings file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let toml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        basic_toml::from_str(&toml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_provider_env_overrides(&mut settings.legacy_provider, "LEGACY_PROVIDER");
        Self::apply_provider_env_overrides(&mut settings.new_provider, "NEW_PROVIDER");
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    /// Apply `{prefix}_ENDPOINT` and `{prefix}_REGION` overrides
    fn apply_provider_env_overrides(provider: &mut ProviderSettings, prefix: &str) {
        if let Ok(endpoint) = std::env::var(format!("{prefix}_ENDPOINT")) {
            provider.endpoint = Some(endpoint);
        }
        if let Ok(region) = std::env::var(format!("{prefix}_REGION")) {
            provider.region = Some(region);
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Validate both providers
    ///
    /// # Errors
    ///
    /// Returns the first provider validation error
    pub fn validate(&self) -> Result<()> {
        self.legacy_provider.validate()?;
        self.new_provider.validate()?;
        Ok(())
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

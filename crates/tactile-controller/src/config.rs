//! Configuration types for the vibration controller.
//!
//! A [`ControllerConfig`] selects the backend and the controller policies.
//! It can be built in code or loaded from YAML or JSON:
//!
//! ```yaml
//! backend: simulated
//! simulated:
//!   has_vibrator: true
//!   has_amplitude_control: false
//! cache_capabilities: true
//! require_vibrator: true
//! amplitude_fallback: default_strength
//! ```

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tactile_backend::{BackendProvider, BackendSelection, SimulatedCapabilities, provider_for};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON.
    #[error("unsupported config format for {} (expected .yaml, .yml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized `Result` type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do with amplitudes when the motor cannot vary its strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplitudeFallback {
    /// Pass amplitudes to the driver unchanged and let it ignore them.
    #[default]
    Forward,
    /// Strip amplitudes and use the amplitude-free backend calls.
    ///
    /// Waveform slots with amplitude 0 stay off, every other slot plays at
    /// the default strength.
    DefaultStrength,
}

impl AmplitudeFallback {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::DefaultStrength => "default_strength",
        }
    }
}

impl fmt::Display for AmplitudeFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Backend to acquire at startup.
    ///
    /// Default: `simulated`. In YAML, quote `'null'` so it is not read as
    /// an empty value.
    pub backend: BackendSelection,

    /// Capabilities reported by the simulated backend.
    ///
    /// Ignored by the other backends.
    pub simulated: SimulatedCapabilities,

    /// Query capabilities once per controller instead of on every call.
    ///
    /// Default: true.
    pub cache_capabilities: bool,

    /// Treat a backend without a motor as no controller at all.
    ///
    /// Default: true.
    pub require_vibrator: bool,

    /// Amplitude policy for motors without amplitude control.
    pub amplitude_fallback: AmplitudeFallback,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            backend: BackendSelection::default(),
            simulated: SimulatedCapabilities::default(),
            cache_capabilities: true,
            require_vibrator: true,
            amplitude_fallback: AmplitudeFallback::default(),
        }
    }
}

impl ControllerConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, does not parse or fails validation.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> ConfigResult<Self> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulated capabilities are inconsistent.
    pub fn validate(&self) -> ConfigResult<()> {
        self.simulated
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Provider for the configured backend.
    #[must_use]
    pub fn provider(&self) -> Box<dyn BackendProvider> {
        provider_for(self.backend, self.simulated)
    }
}

/// Builder for `ControllerConfig`.
#[derive(Debug, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    #[must_use]
    pub fn backend(mut self, backend: BackendSelection) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the capabilities the simulated backend reports.
    #[must_use]
    pub fn simulated(mut self, capabilities: SimulatedCapabilities) -> Self {
        self.config.simulated = capabilities;
        self
    }

    #[must_use]
    pub fn cache_capabilities(mut self, enabled: bool) -> Self {
        self.config.cache_capabilities = enabled;
        self
    }

    #[must_use]
    pub fn require_vibrator(mut self, required: bool) -> Self {
        self.config.require_vibrator = required;
        self
    }

    #[must_use]
    pub fn amplitude_fallback(mut self, fallback: AmplitudeFallback) -> Self {
        self.config.amplitude_fallback = fallback;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ConfigResult<ControllerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

//! Layered configuration loading.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
pub const CONFIG_DIR_ENV: &str = "USERS_API_CONFIG_DIR";

/// Environment variable for a single configuration file
pub const CONFIG_FILE_ENV: &str = "USERS_API_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix of environment variable overrides
const ENV_PREFIX: &str = "USERS_API";

/// Separator for nested keys: `USERS_API_SERVER__PORT` -> `server.port`
const ENV_SEPARATOR: &str = "__";

/// Loads `Settings` from files and environment variables.
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `USERS_API_*` environment variables
///
/// When a single file is configured it replaces the three file layers.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `USERS_API_CONFIG_DIR`, `USERS_API_CONFIG_FILE`
    /// and `USERS_API_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails if both the directory and the file variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load only the given file (plus environment variables).
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the environment used to pick `{environment}.toml`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        Self::add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder =
            Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_file = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_file, false)?;

        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ErrorMapping, StorageBackend};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests mutate process-wide environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const DEFAULT_TOML: &str = r#"
[application]
name = "users-api"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000
request_timeout = 30

[database]
backend = "postgres"
url = "postgres://localhost/users"
max_connections = 10
min_connections = 1

[api]
error_mapping = "collapsed"

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables and restores them on drop.
    struct EnvGuard {
        saved: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self { saved: Vec::new() };
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "USERS_API_SERVER__PORT",
                "USERS_API_DATABASE__BACKEND",
                "USERS_API_API__ERROR_MAPPING",
            ] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.iter().rev() {
                unsafe {
                    match value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_dir_and_file_are_mutually_exclusive() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/custom/users.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            (
                "production.toml",
                "[server]\nhost = \"0.0.0.0\"\n\n[api]\nerror_mapping = \"typed\"\n",
            ),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.api.error_mapping, ErrorMapping::Typed);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_full_precedence_chain() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("development.toml", "[server]\nport = 3001\n\n[application]\nname = \"dev\"\n"),
            ("local.toml", "[server]\nport = 3002\n\n[database]\nbackend = \"memory\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set("USERS_API_SERVER__PORT", "3003");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.server.port, 3003);
        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert_eq!(settings.application.name, "dev");
        assert_eq!(settings.application.version, "1.0.0");
    }

    #[test]
    fn test_env_var_selects_error_mapping() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set("USERS_API_API__ERROR_MAPPING", "typed");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.api.error_mapping, ErrorMapping::Typed);
    }

    #[test]
    fn test_single_file_mode_skips_layers() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();
        let dir = setup_config_dir(&[(
            "single.toml",
            "[database]\nbackend = \"memory\"\n\n[server]\nport = 5000\n",
        )]);

        let settings = ConfigLoader::from_file(dir.path().join("single.toml"))
            .load()
            .expect("Should load settings");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();
        let dir = setup_config_dir(&[("bad.toml", "[server]\nrequest_timeout = 0\n[database]\nbackend = \"memory\"\n")]);

        let result = ConfigLoader::from_file(dir.path().join("bad.toml")).load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}

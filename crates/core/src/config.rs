use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::BudgetTables;
use crate::errors::TablesError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Optional replacement for the built-in lookup tables.
    pub tables_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    /// Three-letter currency code shown next to amounts. Purely cosmetic;
    /// the engine itself is currency-agnostic.
    pub currency: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub tables_path: Option<PathBuf>,
    pub currency: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file {0} was not found")]
    MissingConfigFile(PathBuf),
    #[error("config interpolation references unset env var {var}")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated ${{...}} interpolation in config file")]
    UnterminatedInterpolation,
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig { tables_path: None },
            display: DisplayConfig { currency: "EUR".to_string() },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, then the config file, then `BRIDGET_*`
    /// environment variables, then explicit overrides, validated last.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("bridget.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Loads the configured table set, or the built-in dataset when no
    /// `engine.tables_path` is set.
    pub fn load_tables(&self) -> Result<BudgetTables, TablesError> {
        match &self.engine.tables_path {
            Some(path) => BudgetTables::load(path),
            None => Ok(BudgetTables::builtin()),
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(engine) = patch.engine {
            if let Some(tables_path) = engine.tables_path {
                self.engine.tables_path = Some(tables_path);
            }
        }

        if let Some(display) = patch.display {
            if let Some(currency) = display.currency {
                self.display.currency = currency;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("BRIDGET_ENGINE_TABLES_PATH") {
            self.engine.tables_path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("BRIDGET_DISPLAY_CURRENCY") {
            self.display.currency = value;
        }

        let log_level =
            read_env("BRIDGET_LOGGING_LEVEL").or_else(|| read_env("BRIDGET_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BRIDGET_LOGGING_FORMAT").or_else(|| read_env("BRIDGET_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(tables_path) = overrides.tables_path {
            self.engine.tables_path = Some(tables_path);
        }
        if let Some(currency) = overrides.currency {
            self.display.currency = currency;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_engine(&self.engine)?;
        validate_display(&self.display)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("bridget.toml"), PathBuf::from("config/bridget.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ConfigError> {
    if let Some(path) = &engine.tables_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "engine.tables_path must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_display(display: &DisplayConfig) -> Result<(), ConfigError> {
    let currency = display.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ConfigError::Validation(
            "display.currency must be a three-letter code such as EUR".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    engine: Option<EnginePatch>,
    display: Option<DisplayPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    tables_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplayPatch {
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn config_file_values_interpolate_env_vars() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_BRIDGET_TABLES", "/srv/bridget/tables.toml");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("bridget.toml");
            fs::write(
                &path,
                r#"
[engine]
tables_path = "${TEST_BRIDGET_TABLES}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.engine.tables_path == Some(PathBuf::from("/srv/bridget/tables.toml")),
                "tables path should come from the interpolated environment value",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_BRIDGET_TABLES"]);
        result
    }

    #[test]
    fn short_logging_env_aliases_apply() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BRIDGET_LOG_LEVEL", "warn");
        env::set_var("BRIDGET_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "level should come from the short alias")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "format should come from the short alias",
            )?;
            Ok(())
        })();

        clear_vars(&["BRIDGET_LOG_LEVEL", "BRIDGET_LOG_FORMAT"]);
        result
    }

    #[test]
    fn env_beats_file_and_explicit_overrides_beat_env() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BRIDGET_DISPLAY_CURRENCY", "GBP");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("bridget.toml");
            fs::write(
                &path,
                r#"
[display]
currency = "USD"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.display.currency == "GBP", "env currency should win over the file")?;
            ensure(config.logging.level == "debug", "override log level should win over env")?;
            Ok(())
        })();

        clear_vars(&["BRIDGET_DISPLAY_CURRENCY"]);
        result
    }

    #[test]
    fn four_letter_currency_is_rejected_by_name() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BRIDGET_DISPLAY_CURRENCY", "EURO");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("display.currency")
            );
            ensure(has_message, "validation failure should mention display.currency")
        })();

        clear_vars(&["BRIDGET_DISPLAY_CURRENCY"]);
        result
    }

    #[test]
    fn missing_required_file_is_reported_with_its_path() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/bridget.toml")),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected missing-file failure".to_string()),
            Err(error) => error,
        };

        ensure(
            matches!(error, ConfigError::MissingConfigFile(ref path)
                if path == &PathBuf::from("/nonexistent/bridget.toml")),
            "missing-file error should carry the requested path",
        )
    }

    #[test]
    fn default_config_serves_the_builtin_tables() -> Result<(), String> {
        let config = AppConfig::default();
        let tables =
            config.load_tables().map_err(|err| format!("builtin tables failed: {err}"))?;
        ensure(tables.categories.len() == 10, "builtin dataset should carry ten categories")
    }
}

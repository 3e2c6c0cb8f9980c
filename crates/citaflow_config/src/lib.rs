use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `{config_dir}/default.*` (any format the `config` crate understands)
/// 2. `{config_dir}/{RUN_ENV}.*`
/// 3. Environment variables with the `CITAFLOW` prefix and `__` separator,
///    e.g. `CITAFLOW_SERVER__PORT=8000` or `CITAFLOW_OAUTH__CLIENT_SECRET=…`.
///
/// The config directory defaults to `config/` relative to the working
/// directory and can be overridden with `CITAFLOW_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("CITAFLOW_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix("CITAFLOW").separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the environment exactly once.
///
/// Loads the file named by `DOTENV_OVERRIDE` when set, falling back to `.env`.
/// Missing files are ignored; existing process environment always wins.
pub fn ensure_dotenv_loaded() {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());
    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}

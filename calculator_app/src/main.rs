//! AnalogEngineerCalculator
//!
//! Opens the calculator window and keeps it cleared and presented until it is
//! closed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use analog_engine::config::Config;
use analog_engine::foundation::logging;
use analog_engine::{Engine, EngineConfig, EngineError};

/// Names another settings file instead of the ones in the working directory
const CONFIG_ENV_VAR: &str = "ANALOG_CALC_CONFIG";

/// Settings files looked up in the working directory, in order
const CONFIG_CANDIDATES: [&str; 2] = ["calculator.toml", "calculator.ron"];

/// First settings file present in `dir`
fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// File named by the environment variable; an empty value counts as unset
fn explicit_config(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn load_config() -> Result<EngineConfig, EngineError> {
    if let Some(path) = explicit_config(std::env::var_os(CONFIG_ENV_VAR)) {
        log::info!("Loading configuration from {} ({CONFIG_ENV_VAR})", path.display());
        return Ok(EngineConfig::load_from_file(path)?);
    }

    match find_config(Path::new(".")) {
        Some(path) => Ok(EngineConfig::load_or_default(path)?),
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn run() -> Result<(), EngineError> {
    let config = load_config()?;
    let mut engine = Engine::new(config)?;
    engine.run()
}

fn main() {
    logging::init();
    log::info!("Starting AnalogEngineerCalculator");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }

    log::info!("AnalogEngineerCalculator exited cleanly");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env_value_is_ignored() {
        assert_eq!(explicit_config(None), None);
        assert_eq!(explicit_config(Some(OsString::new())), None);
        assert_eq!(
            explicit_config(Some(OsString::from("/etc/calc.ron"))),
            Some(PathBuf::from("/etc/calc.ron"))
        );
    }

    #[test]
    fn test_no_candidates_means_defaults() {
        let dir = std::env::temp_dir().join(format!("analog_calc_empty_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert_eq!(find_config(&dir), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_toml_preferred_over_ron() {
        let dir = std::env::temp_dir().join(format!("analog_calc_both_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("calculator.ron"), "()").unwrap();
        std::fs::write(dir.join("calculator.toml"), "").unwrap();

        assert_eq!(find_config(&dir), Some(dir.join("calculator.toml")));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        use analog_engine::config::ConfigFormat;

        let sample = EngineConfig::from_str_as(include_str!("../calculator.toml"), ConfigFormat::Toml).unwrap();
        assert_eq!(sample, EngineConfig::default());
    }
}

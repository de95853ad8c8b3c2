//! Configuration loading and data root resolution

use std::path::PathBuf;

/// Environment variable overriding the data root.
pub const DATA_ROOT_ENV: &str = "TOLLSATS_DATA_ROOT";

/// Data root resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `data_root` key in the TOML config file
/// 4. `./data` fallback
pub fn resolve_data_root(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root) = config.get("data_root").and_then(|v| v.as_str()) {
                    return PathBuf::from(root);
                }
            }
        }
    }

    // Priority 4: repository-local default
    PathBuf::from("data")
}

/// Per-platform config file location (`<config dir>/tollsats/config.toml`),
/// only when it exists.
fn locate_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("tollsats").join("config.toml");
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let root = resolve_data_root(Some("/tmp/tariff-data"), "TOLLSATS_TEST_UNSET_1");
        assert_eq!(root, PathBuf::from("/tmp/tariff-data"));
    }

    #[test]
    fn test_env_var_used_when_no_cli_argument() {
        std::env::set_var("TOLLSATS_TEST_ROOT_2", "/srv/tolldata");
        let root = resolve_data_root(None, "TOLLSATS_TEST_ROOT_2");
        std::env::remove_var("TOLLSATS_TEST_ROOT_2");
        assert_eq!(root, PathBuf::from("/srv/tolldata"));
    }
}

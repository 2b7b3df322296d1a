use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;

/// Shared behaviour of every config section.
pub trait CommonConfig {
    fn default() -> Self;

    /// Expands environment values and validates the fields. Called once after
    /// the config is parsed (or defaulted).
    fn complete(&mut self) -> Result<()>;
}

/// Loads a TOML config file. A missing file is not an error: `default_func`
/// provides the values instead. Either way the result goes through
/// [`CommonConfig::complete`].
pub fn load_config<T, F, P>(path: P, default_func: F) -> Result<T>
where
    T: CommonConfig + DeserializeOwned,
    F: FnOnce() -> T,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut cfg: T = match fs::read_to_string(path) {
        Ok(s) => parse_config(&s)
            .with_context(|| format!("parse config file: {}", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "Config file '{}' not found, using defaults",
                path.display()
            );
            default_func()
        }
        Err(err) => {
            return Err(err).context(format!("read config file: {}", path.display()));
        }
    };

    cfg.complete().context("validate config")?;
    Ok(cfg)
}

/// Parses a config from TOML text without completing it.
pub fn parse_config<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    toml::from_str(s).context("parse config toml")
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use std::env;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct TestConfig {
        #[serde(default = "TestConfig::default_name")]
        name: String,

        #[serde(default)]
        size: u32,
    }

    impl CommonConfig for TestConfig {
        fn default() -> Self {
            Self {
                name: Self::default_name(),
                size: 0,
            }
        }

        fn complete(&mut self) -> Result<()> {
            self.name = expandenv("name", &self.name)?;
            if self.size > 10 {
                anyhow::bail!("size must be less than or equal to 10");
            }
            Ok(())
        }
    }

    impl TestConfig {
        fn default_name() -> String {
            String::from("default")
        }
    }

    #[test]
    fn test_load_config() {
        let dir = env::temp_dir().join("_utilkit_test_load_config");
        fs::create_dir_all(&dir).unwrap();

        // Test case 1: Missing file uses defaults
        let cfg: TestConfig = load_config(dir.join("missing.toml"), TestConfig::default).unwrap();
        assert_eq!(cfg.name, "default");
        assert_eq!(cfg.size, 0);

        // Test case 2: Values with env expansion
        env::set_var("UTILKIT_TEST_CONFIG_NAME", "expanded");
        let path = dir.join("ok.toml");
        fs::write(&path, "name = \"${UTILKIT_TEST_CONFIG_NAME}-name\"\nsize = 3\n").unwrap();
        let cfg: TestConfig = load_config(&path, TestConfig::default).unwrap();
        assert_eq!(cfg.name, "expanded-name");
        assert_eq!(cfg.size, 3);

        // Test case 3: Validation error
        let path = dir.join("invalid.toml");
        fs::write(&path, "size = 11\n").unwrap();
        assert!(load_config::<TestConfig, _, _>(&path, TestConfig::default).is_err());

        // Test case 4: Broken toml
        let path = dir.join("broken.toml");
        fs::write(&path, "name = [\n").unwrap();
        assert!(load_config::<TestConfig, _, _>(&path, TestConfig::default).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_expandenv() {
        env::set_var("UTILKIT_TEST_EXPAND", "value");
        assert_eq!(expandenv("test", "$UTILKIT_TEST_EXPAND").unwrap(), "value");
        assert_eq!(expandenv("test", "plain").unwrap(), "plain");
        assert!(expandenv("test", "$UTILKIT_TEST_UNDEFINED_VALUE").is_err());
    }
}

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig};

use super::MIME_JSON;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    /// Timeout of a whole request, from connect until the body is read.
    #[serde(default = "ClientConfig::default_timeout_ms")]
    pub timeout_ms: u64,

    /// Headers sent with every request. Values support env expansion, so
    /// tokens can be kept out of the file: `Authorization = "Bearer ${TOKEN}"`.
    #[serde(default = "ClientConfig::default_headers")]
    pub headers: HashMap<String, String>,

    /// Status codes treated as success.
    #[serde(default = "ClientConfig::default_success_status")]
    pub success_status: Vec<u16>,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
            headers: Self::default_headers(),
            success_status: Self::default_success_status(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than 0");
        }

        if self.success_status.is_empty() {
            bail!("success_status cannot be empty");
        }
        for code in self.success_status.iter() {
            if !(100..=599).contains(code) {
                bail!("invalid status code {code} in success_status");
            }
        }

        for (name, value) in self.headers.iter_mut() {
            *value = expandenv(name, &*value)?;
        }

        Ok(())
    }
}

impl ClientConfig {
    pub fn default_timeout_ms() -> u64 {
        1000
    }

    pub fn default_headers() -> HashMap<String, String> {
        HashMap::from([(String::from("Content-Type"), String::from(MIME_JSON))])
    }

    pub fn default_success_status() -> Vec<u16> {
        vec![200]
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use crate::config::parse_config;

    use super::*;

    #[test]
    fn test_client_config() {
        // Test case 1: Defaults
        let mut cfg: ClientConfig = parse_config("").unwrap();
        cfg.complete().unwrap();
        assert_eq!(cfg.timeout_ms, 1000);
        assert_eq!(cfg.success_status, vec![200]);
        assert_eq!(cfg.headers["Content-Type"], MIME_JSON);

        // Test case 2: Custom values with env expansion
        env::set_var("UTILKIT_TEST_CLIENT_TOKEN", "secret-token");
        let mut cfg: ClientConfig = parse_config(
            r#"
timeout_ms = 150
success_status = [200, 201]

[headers]
Accept = "application/json"
Authorization = "Bearer ${UTILKIT_TEST_CLIENT_TOKEN}"
"#,
        )
        .unwrap();
        cfg.complete().unwrap();
        assert_eq!(cfg.timeout_ms, 150);
        assert_eq!(cfg.success_status, vec![200, 201]);
        assert_eq!(cfg.headers.len(), 2);
        assert_eq!(cfg.headers["Authorization"], "Bearer secret-token");

        // Test case 3: Invalid values
        for toml in [
            "timeout_ms = 0",
            "success_status = []",
            "success_status = [200, 700]",
        ] {
            let mut cfg: ClientConfig = parse_config(toml).unwrap();
            assert!(cfg.complete().is_err(), "config: {toml}");
        }
    }
}

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Providers {
    pub smarty: Option<SmartyCfg>,
}

/// Smarty is the only provider that needs credentials; the config names the
/// environment variables holding them rather than the secrets themselves.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SmartyCfg {
    pub auth_id_env: String,
    pub auth_token_env: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpCfg {
    /// TCP connect timeout in milliseconds (default 5000ms)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total request timeout in milliseconds (default 30000ms)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Optional per-host idle connection pool cap (None = reqwest default)
    #[serde(default)]
    pub pool_max_idle_per_host: Option<usize>,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            pool_max_idle_per_host: None,
        }
    }
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}
fn default_request_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: Providers,
    #[serde(default)]
    pub http: HttpCfg,
}

impl Config {
    /// Load a Config from a file path (JSON or TOML by extension). If the
    /// extension is missing or unrecognized, try JSON first, then TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> crate::error::CoreResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(crate::error::ZipQueryError::from)?;
        let s =
            std::str::from_utf8(&bytes).map_err(|e| crate::error::ZipQueryError::Other(e.into()))?;
        let cfg: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str::<Self>(s)
                .map_err(|e| crate::error::ZipQueryError::Other(e.into()))?,
            Some("toml") => toml::from_str::<Self>(s)
                .map_err(|e| crate::error::ZipQueryError::Other(e.into()))?,
            _ => serde_json::from_str::<Self>(s)
                .map_err(|e| crate::error::ZipQueryError::Other(e.into()))
                .or_else(|_| {
                    toml::from_str::<Self>(s)
                        .map_err(|e| crate::error::ZipQueryError::Other(e.into()))
                })?,
        };
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_from_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("zipquery.json");
        let json = r#"{
          "providers": {
            "smarty": {"auth_id_env":"SMARTY_AUTH_ID","auth_token_env":"SMARTY_AUTH_TOKEN"}
          },
          "http": {"connect_timeout_ms":2500}
        }"#;
        fs::write(&file, json).unwrap();
        let cfg = Config::from_path(&file).unwrap();
        let smarty = cfg.providers.smarty.expect("smarty cfg");
        assert_eq!(smarty.auth_id_env, "SMARTY_AUTH_ID");
        assert_eq!(cfg.http.connect_timeout_ms, 2_500);
        assert_eq!(cfg.http.request_timeout_ms, 30_000);
        assert_eq!(cfg.http.pool_max_idle_per_host, None);
    }

    #[test]
    fn load_from_toml() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("zipquery.toml");
        let toml = r#"
[providers.smarty]
auth_id_env = "SMARTY_AUTH_ID"
auth_token_env = "SMARTY_AUTH_TOKEN"

[http]
request_timeout_ms = 10000
"#;
        fs::write(&file, toml).unwrap();
        let cfg = Config::from_path(&file).unwrap();
        assert!(cfg.providers.smarty.is_some());
        assert_eq!(cfg.http.request_timeout_ms, 10_000);
        assert_eq!(cfg.http.connect_timeout_ms, 5_000);
    }

    #[test]
    fn missing_file_returns_io_error() {
        let missing = std::path::PathBuf::from("/definitely/not/here/zipquery-missing.json");
        let err = Config::from_path(&missing).unwrap_err();
        match err {
            crate::error::ZipQueryError::Io(_) => {}
            other => panic!("expected Io error, got: {:?}", other),
        }
    }

    #[test]
    fn unknown_extension_falls_back_to_json_then_toml() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("zipquery.conf");
        fs::write(&json_path, r#"{"providers":{},"http":{}}"#).unwrap();
        let cfg = Config::from_path(&json_path).unwrap();
        assert!(cfg.providers.smarty.is_none());
        assert_eq!(cfg.http.connect_timeout_ms, 5_000);

        let toml_path = dir.path().join("zipquery2.conf");
        fs::write(&toml_path, "[http]\nconnect_timeout_ms = 100\n").unwrap();
        let cfg = Config::from_path(&toml_path).unwrap();
        assert_eq!(cfg.http.connect_timeout_ms, 100);
    }
}

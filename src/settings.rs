use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/products";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub stub: StubSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StubSettings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Defaults, then `appsettings.*` (or the given file), then
    /// `PRODUCT_ADMIN__SECTION__KEY` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_seconds", 10_i64)?
            .set_default("stub.host", "127.0.0.1")?
            .set_default("stub.port", 8080_i64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("appsettings").required(false)),
        };

        let settings = builder
            .add_source(
                Environment::with_prefix("PRODUCT_ADMIN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        self
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl StubSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("product-admin-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://catalog.internal:9000/api/products\"\n\n[stub]\nport = 9100\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.api.base_url, "http://catalog.internal:9000/api/products");
        assert_eq!(settings.api.timeout_seconds, 10);
        assert_eq!(settings.stub.address(), "127.0.0.1:9100");
    }

    #[test]
    fn cli_base_url_wins() {
        let path = std::env::temp_dir().join(format!("product-admin-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "[api]\ntimeout_seconds = 3\n").unwrap();

        let settings = Settings::load(Some(path.as_path()))
            .unwrap()
            .with_base_url(Some("http://127.0.0.1:1/api/products".to_string()));
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.api.base_url, "http://127.0.0.1:1/api/products");
        assert_eq!(settings.api.timeout(), Duration::from_secs(3));
    }
}

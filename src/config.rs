use crate::error::{FoodScanError, Result};
use foodscan_common::api::{Endpoints, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MACROS_URL_ENV: &str = "FOODSCAN_MACROS_URL";
pub const CHAT_URL_ENV: &str = "FOODSCAN_CHAT_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub macros_url: String,
    pub chat_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        let endpoints = Endpoints::default();
        Self {
            macros_url: endpoints.macros_url,
            chat_url: endpoints.chat_url,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// ファイルがなければデフォルト設定
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FoodScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("foodscan").join("config.json"))
    }

    /// 環境変数を優先
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(MACROS_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.macros_url = url;
        }
        if let Some(url) = lookup(CHAT_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.chat_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("macros_url", &self.macros_url), ("chat_url", &self.chat_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(FoodScanError::Config(format!("{} はhttp(s)のURLである必要があります: {}", name, url)));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(FoodScanError::Config("timeout_seconds は1以上である必要があります".into()));
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            macros_url: self.macros_url.clone(),
            chat_url: self.chat_url.clone(),
        }
    }
}

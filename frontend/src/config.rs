use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: u32 = 30;
pub const DEFAULT_SIGN_IN_URL: &str = "/login";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Runtime settings read from `window.__BACKOFFICE_ENV` or `./config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    #[serde(alias = "API_BASE_URL")]
    pub api_base_url: String,
    #[serde(alias = "IDLE_TIMEOUT_MINUTES")]
    pub idle_timeout_minutes: u32,
    #[serde(alias = "SIGN_IN_URL")]
    pub sign_in_url: String,
    #[serde(alias = "PAGE_SIZE")]
    pub page_size: usize,
    #[serde(alias = "TIME_ZONE")]
    pub time_zone: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            idle_timeout_minutes: DEFAULT_IDLE_TIMEOUT_MINUTES,
            sign_in_url: DEFAULT_SIGN_IN_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            time_zone: "UTC".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Parses a JSON document, falling back to defaults for missing or
    /// unusable values.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw).ok().map(Self::normalized)
    }

    pub fn normalized(mut self) -> Self {
        let base = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.api_base_url = if base.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            base
        };
        if self.idle_timeout_minutes == 0 {
            self.idle_timeout_minutes = DEFAULT_IDLE_TIMEOUT_MINUTES;
        }
        if self.sign_in_url.trim().is_empty() {
            self.sign_in_url = DEFAULT_SIGN_IN_URL.to_string();
        }
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.time_zone.parse::<Tz>().is_err() {
            log::warn!("Unknown time zone {:?}, using UTC", self.time_zone);
            self.time_zone = "UTC".to_string();
        }
        self
    }

    pub fn tz(&self) -> Tz {
        self.time_zone.parse().unwrap_or(Tz::UTC)
    }
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Cached config, or defaults before `init` has finished.
pub fn current() -> RuntimeConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn current_time_zone() -> Tz {
    current().tz()
}

fn cache(config: RuntimeConfig) -> RuntimeConfig {
    let _ = CONFIG.set(config.clone());
    CONFIG.get().cloned().unwrap_or(config)
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &"__BACKOFFICE_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    RuntimeConfig::from_json(&raw)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    let raw = resp.text().await.ok()?;
    RuntimeConfig::from_json(&raw)
}

pub async fn await_config() -> RuntimeConfig {
    if let Some(cached) = CONFIG.get() {
        return cached.clone();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(existing) = snapshot_from_globals() {
            return cache(existing);
        }
        if let Some(fetched) = fetch_runtime_config().await {
            return cache(fetched);
        }
        log::info!("No runtime config found, using defaults");
    }
    cache(RuntimeConfig::default())
}

pub async fn init() {
    let config = await_config().await;
    log::info!(
        "Runtime config loaded: api={} tz={} idle={}m",
        config.api_base_url,
        config.time_zone,
        config.idle_timeout_minutes
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.idle_timeout_minutes, 30);
        assert_eq!(config.sign_in_url, "/login");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.tz(), Tz::UTC);
    }

    #[test]
    fn from_json_accepts_upper_case_keys_and_fills_gaps() {
        let config = RuntimeConfig::from_json(
            r#"{ "API_BASE_URL": "https://erp.example.com/api/", "TIME_ZONE": "Asia/Ho_Chi_Minh" }"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://erp.example.com/api");
        assert_eq!(config.tz(), chrono_tz::Asia::Ho_Chi_Minh);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn normalized_replaces_unusable_values() {
        let config = RuntimeConfig {
            api_base_url: "  ".into(),
            idle_timeout_minutes: 0,
            sign_in_url: String::new(),
            page_size: 0,
            time_zone: "Mars/Olympus".into(),
        }
        .normalized();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        assert!(RuntimeConfig::from_json("not json").is_none());
    }
}

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{sync::OnceLock, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:54321/rest/v1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Raw runtime configuration as provided by `env.js`, the window config object or
/// `./config.json`. Every field is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "API_KEY")]
    pub api_key: Option<String>,
    #[serde(default, alias = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,
    #[serde(default, alias = "TIME_ZONE")]
    pub time_zone: Option<String>,
    #[serde(default, alias = "IS_ADMIN")]
    pub is_admin: Option<bool>,
    #[serde(default, alias = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub time_zone: Tz,
    pub is_admin: bool,
    pub log_level: log::Level,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(RuntimeConfig::default())
    }
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

pub fn resolve(raw: RuntimeConfig) -> ResolvedConfig {
    let time_zone = match raw.time_zone.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("Unknown time zone {:?}; falling back to UTC", name);
            Tz::UTC
        }),
        _ => Tz::UTC,
    };
    let log_level = raw
        .log_level
        .as_deref()
        .and_then(|level| level.trim().parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    let request_timeout = Duration::from_millis(
        raw.request_timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
    );
    ResolvedConfig {
        api_base_url: raw
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        api_key: raw.api_key.filter(|key| !key.trim().is_empty()),
        request_timeout,
        time_zone,
        is_admin: raw.is_admin.unwrap_or(false),
        log_level,
    }
}

/// Returns the cached configuration, or defaults when `init` has not completed yet.
pub fn current() -> ResolvedConfig {
    RESOLVED.get().cloned().unwrap_or_default()
}

pub fn current_time_zone() -> Tz {
    current().time_zone
}

pub fn request_timeout() -> Duration {
    current().request_timeout
}

pub async fn await_config() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let raw = match snapshot_from_globals() {
        Some(raw) => raw,
        None => match fetch_runtime_config().await {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Runtime config unavailable, using defaults: {:#}", err);
                RuntimeConfig::default()
            }
        },
    };
    let resolved = resolve(raw);
    let _ = RESOLVED.set(resolved.clone());
    resolved
}

pub async fn init() -> ResolvedConfig {
    await_config().await
}

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    match serde_json::from_str::<RuntimeConfig>(&json) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("Ignoring malformed {}: {}", name, err);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // window.__CLASSROOM_ENV (env.js) takes precedence over window.__CLASSROOM_CONFIG.
    read_global("__CLASSROOM_ENV").or_else(|| read_global("__CLASSROOM_CONFIG"))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    use anyhow::{bail, Context};

    let origin = web_sys::window()
        .context("no global `window` exists")?
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("window.location.origin is unavailable"))?;
    let resp = reqwest::get(format!("{}/config.json", origin))
        .await
        .context("failed to request ./config.json")?;
    if !resp.status().is_success() {
        bail!("./config.json returned HTTP {}", resp.status());
    }
    resp.json::<RuntimeConfig>()
        .await
        .context("failed to parse ./config.json")
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    anyhow::bail!("runtime config files are only served to the browser build")
}

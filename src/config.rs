// src/config.rs

pub mod credentials;

use self::credentials::load_or_create_external_config;
use crate::{
    cli::Cli,
    constants,
    error::{AppError, AppResult},
};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, time::Duration};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub base_url: Option<String>,
    pub listing_path: Option<String>,
    pub auth_path: Option<String>,
    /// 未设置时不限时，挂起的上游调用会一直等待
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// 授权接口需要的客户端标识，以及列表接口的 revert_api 常量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub device: String,
    pub browser: String,
    pub revert_api: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            device: constants::api::DEVICE.into(),
            browser: constants::api::BROWSER.into(),
            revert_api: constants::api::REVERT_API.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".into(), "application/json, text/javascript, */*; q=0.01".into()),
        ("Accept-Language".into(), "en-US,en;q=0.9".into()),
        ("Connection".into(), "keep-alive".into()),
        ("Origin".into(), constants::DEFAULT_BASE_URL.into()),
        ("X-Requested-With".into(), "XMLHttpRequest".into()),
    ])
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        let network_config = NetworkConfig {
            base_url: Some(constants::DEFAULT_BASE_URL.into()),
            listing_path: Some(constants::DEFAULT_LISTING_PATH.into()),
            auth_path: Some(constants::DEFAULT_AUTH_PATH.into()),
            connect_timeout_secs: None,
            timeout_secs: None,
            // 默认不重试: 失败的条目直接跳过
            max_retries: Some(0),
        };

        Self {
            network: network_config,
            server: ServerConfig {
                host: Some(constants::DEFAULT_HOST.into()),
                port: Some(constants::DEFAULT_PORT),
            },
            platform: PlatformConfig::default(),
            headers: default_headers(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub listing: Url,
    pub auth: Url,
}

impl ApiEndpoints {
    pub fn from_base(base_url: &str, listing_path: &str, auth_path: &str) -> AppResult<Self> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            listing: base.join(listing_path)?,
            auth: base.join(auth_path)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoints: ApiEndpoints,
    pub user_agent: String,
    pub headers: BTreeMap<String, String>,
    pub platform: PlatformConfig,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config(args.config.as_deref())?;
        let mut config = Self::from_external(external_config)?;
        if let Some(host) = &args.host {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        Ok(config)
    }

    pub fn from_external(external_config: ExternalConfig) -> AppResult<Self> {
        let network = external_config.network;
        let endpoints = ApiEndpoints::from_base(
            network.base_url.as_deref().unwrap_or(constants::DEFAULT_BASE_URL),
            network.listing_path.as_deref().unwrap_or(constants::DEFAULT_LISTING_PATH),
            network.auth_path.as_deref().unwrap_or(constants::DEFAULT_AUTH_PATH),
        )?;

        // User-Agent 单独交给 reqwest 处理，其余请求头原样转发
        let mut headers = external_config.headers;
        let user_agent = headers
            .remove("User-Agent")
            .unwrap_or_else(|| constants::USER_AGENT.to_string());

        let platform = &external_config.platform;
        if platform.device.is_empty() || platform.browser.is_empty() {
            return Err(AppError::Other(anyhow!(
                "配置项 platform.device / platform.browser 不能为空"
            )));
        }

        Ok(Self {
            endpoints,
            user_agent,
            headers,
            platform: external_config.platform,
            connect_timeout: network.connect_timeout_secs.map(Duration::from_secs),
            timeout: network.timeout_secs.map(Duration::from_secs),
            max_retries: network.max_retries.unwrap_or(0),
            host: external_config
                .server
                .host
                .unwrap_or_else(|| constants::DEFAULT_HOST.to_string()),
            port: external_config.server.port.unwrap_or(constants::DEFAULT_PORT),
        })
    }

    /// 将两个接口都指向同一个基础地址 (测试中指向 mock 服务器)
    pub fn with_base_url(mut self, base_url: &str) -> AppResult<Self> {
        self.endpoints = ApiEndpoints::from_base(
            base_url,
            constants::DEFAULT_LISTING_PATH,
            constants::DEFAULT_AUTH_PATH,
        )?;
        Ok(self)
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::from_base(
                "http://127.0.0.1:9",
                constants::DEFAULT_LISTING_PATH,
                constants::DEFAULT_AUTH_PATH,
            )
            .expect("static test endpoints are valid"),
            user_agent: "test-agent/1.0".to_string(),
            headers: default_headers(),
            platform: PlatformConfig::default(),
            connect_timeout: Some(Duration::from_secs(5)),
            timeout: Some(Duration::from_secs(15)),
            max_retries: 0,
            host: constants::DEFAULT_HOST.to_string(),
            port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_endpoints() {
        let config = AppConfig::from_external(ExternalConfig::default_app_config()).unwrap();
        assert_eq!(
            config.endpoints.listing.as_str(),
            "https://rgvikramjeet.videocrypt.in/web/Course/get_layer_two_data"
        );
        assert_eq!(
            config.endpoints.auth.as_str(),
            "https://rgvikramjeet.videocrypt.in/web/Auth/video"
        );
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.port, constants::DEFAULT_PORT);
    }

    #[test]
    fn test_partial_external_config_falls_back_to_defaults() {
        let external: ExternalConfig = serde_json::from_str(
            r#"{
                "network": {"base_url": "http://localhost:8080"},
                "headers": {"User-Agent": "custom/1.0"}
            }"#,
        )
        .unwrap();
        let config = AppConfig::from_external(external).unwrap();
        assert_eq!(
            config.endpoints.listing.as_str(),
            "http://localhost:8080/web/Course/get_layer_two_data"
        );
        assert_eq!(config.user_agent, "custom/1.0");
        assert!(!config.headers.contains_key("User-Agent"));
        assert_eq!(config.platform.revert_api, "1#0#0#0");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_default_config_has_no_timeouts() {
        let external = ExternalConfig::default_app_config();
        assert_eq!(external.network.connect_timeout_secs, None);
        assert_eq!(external.network.timeout_secs, None);

        let config = AppConfig::from_external(external).unwrap();
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_configured_timeouts_are_applied() {
        let external: ExternalConfig = serde_json::from_str(
            r#"{"network": {"connect_timeout_secs": 3, "timeout_secs": 30}}"#,
        )
        .unwrap();
        let config = AppConfig::from_external(external).unwrap();
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let external: ExternalConfig =
            serde_json::from_str(r#"{"network": {"base_url": "not a url"}}"#).unwrap();
        assert!(matches!(AppConfig::from_external(external), Err(AppError::Url(_))));
    }
}

// src/client.rs

use crate::{config::AppConfig, constants, error::*};
use log::debug;
use reqwest::{
    Response,
    header::{COOKIE, HeaderMap, HeaderName, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
    config: Arc<AppConfig>,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::InvalidHeader(format!("{}: {}", name, e)))?;
            default_headers.insert(name, value);
        }

        let mut inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers);
        // 只有用户显式配置时才限时
        if let Some(connect_timeout) = config.connect_timeout {
            inner = inner.connect_timeout(connect_timeout);
        }
        if let Some(timeout) = config.timeout {
            inner = inner.timeout(timeout);
        }
        let inner = inner.build()?;

        let mut builder = ClientBuilder::new(inner);
        // 默认 max_retries = 0，不挂载重试中间件
        if config.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            client: builder.build(),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 以表单方式 POST，并附带 `csrf_name` cookie；非 2xx 状态视为错误
    pub async fn post_form(
        &self,
        url: &Url,
        csrf_name: &str,
        form: &[(&str, &str)],
    ) -> AppResult<Response> {
        debug!("POST {} ({} 个表单字段)", url, form.len());
        let cookie = format!("{}={}", constants::api::form_fields::CSRF_NAME, csrf_name);
        let res = self
            .client
            .post(url.clone())
            .header(COOKIE, cookie)
            .form(form)
            .send()
            .await?;
        debug!("POST {} -> {}", url, res.status());
        Ok(res.error_for_status()?)
    }

    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        csrf_name: &str,
        form: &[(&str, &str)],
    ) -> AppResult<T> {
        let text = self.post_form(url, csrf_name, form).await?.text().await?;
        serde_json::from_str(&text).map_err(|source| AppError::ApiParseFailed {
            url: url.to_string(),
            source,
        })
    }
}

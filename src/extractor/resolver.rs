// src/extractor/resolver.rs

use crate::{
    client::RobustClient,
    constants::api::{form_fields, suffixes},
    error::{AppError, AppResult},
    models::api::{AuthData, AuthResponse, VideoEntry},
};
use log::{debug, warn};

/// 条目自身的地址: file_url 为 m3u8 时优先，否则接受 m3u8 或 pdf 的 join_url
pub fn resolve_own_url(entry: &VideoEntry) -> Option<String> {
    let join_url = entry.join_url.as_str();
    if entry.file_url.ends_with(suffixes::M3U8) {
        Some(entry.file_url.clone())
    } else if join_url.ends_with(suffixes::M3U8) || join_url.ends_with(suffixes::PDF) {
        Some(join_url.to_string())
    } else {
        None
    }
}

/// 授权响应中的地址: 去掉转义反斜杠后的 file_url，或列表中第一个 m3u8 的 join_url
pub fn pick_authorized_url(data: &AuthData) -> Option<String> {
    let file_url = data.file_url.replace('\\', "");
    if file_url.ends_with(suffixes::M3U8) {
        return Some(file_url);
    }
    data.list
        .iter()
        .map(|item| item.join_url.as_str())
        .find(|url| url.ends_with(suffixes::M3U8))
        .map(str::to_string)
}

pub struct UrlResolver<'a> {
    http_client: &'a RobustClient,
}

impl<'a> UrlResolver<'a> {
    pub fn new(http_client: &'a RobustClient) -> Self {
        Self { http_client }
    }

    async fn authorize(&self, vdc_id: &str, csrf_name: &str) -> AppResult<String> {
        let platform = &self.http_client.config().platform;
        let form = [
            (form_fields::TOKEN, vdc_id),
            (form_fields::DEVICE, platform.device.as_str()),
            (form_fields::BROWSER, platform.browser.as_str()),
        ];
        let auth: AuthResponse = self
            .http_client
            .post_form_json(&self.http_client.config().endpoints.auth, csrf_name, &form)
            .await?;

        if auth.status == Some(false) {
            return Err(AppError::Authorization(format!(
                "vdc_id {} 返回 status=false",
                vdc_id
            )));
        }
        pick_authorized_url(&auth.data).ok_or_else(|| {
            AppError::Authorization(format!("vdc_id {} 的授权结果中没有 m3u8 地址", vdc_id))
        })
    }

    /// 解析条目的最终地址。授权失败时退回条目自身的地址，不视为错误
    pub async fn resolve(&self, entry: &VideoEntry, csrf_name: &str) -> Option<String> {
        if !entry.needs_authorization() {
            return resolve_own_url(entry);
        }
        match self.authorize(&entry.vdc_id, csrf_name).await {
            Ok(url) => {
                debug!("'{}' 授权成功: {}", entry.title, url);
                Some(url)
            }
            Err(e) => {
                warn!(
                    "vdc_id 授权失败: {} ({}) → 回退到 file_url/join_url",
                    entry.vdc_id, e
                );
                resolve_own_url(entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::AuthListItem;

    fn entry(file_url: &str, join_url: &str) -> VideoEntry {
        VideoEntry {
            title: "t".into(),
            file_url: file_url.into(),
            join_url: join_url.into(),
            vdc_id: String::new(),
        }
    }

    #[test]
    fn test_own_url_precedence() {
        assert_eq!(resolve_own_url(&entry("a.m3u8", "b.m3u8")).as_deref(), Some("a.m3u8"));
        assert_eq!(resolve_own_url(&entry("a.mp4", "b.m3u8")).as_deref(), Some("b.m3u8"));
        assert_eq!(resolve_own_url(&entry("", "b.pdf")).as_deref(), Some("b.pdf"));
        // file_url 只接受 m3u8
        assert_eq!(resolve_own_url(&entry("a.pdf", "")), None);
        assert_eq!(resolve_own_url(&entry("a.mp4", "b.zip")), None);
    }

    #[test]
    fn test_authorized_url_prefers_unescaped_file_url() {
        let data = AuthData {
            file_url: r"https:\/\/cdn\/v\/index.m3u8".into(),
            list: vec![AuthListItem { join_url: "https://other/x.m3u8".into() }],
        };
        assert_eq!(pick_authorized_url(&data).as_deref(), Some("https://cdn/v/index.m3u8"));
    }

    #[test]
    fn test_authorized_url_scans_list() {
        let data = AuthData {
            file_url: "https://cdn/v/video.mp4".into(),
            list: vec![
                AuthListItem { join_url: "https://cdn/a.pdf".into() },
                AuthListItem { join_url: "https://cdn/b.m3u8".into() },
                AuthListItem { join_url: "https://cdn/c.m3u8".into() },
            ],
        };
        assert_eq!(pick_authorized_url(&data).as_deref(), Some("https://cdn/b.m3u8"));
        assert_eq!(pick_authorized_url(&AuthData::default()), None);
    }
}

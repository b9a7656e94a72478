// src/models/api.rs

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 上游字段偶尔是 null 或数字，统一读成去掉首尾空白的字符串
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// 只认 JSON 布尔值，其余类型 (如 `1`、`"ok"`) 读作 None
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// `null` 读作默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 非数组读作空列表，数组中无法解析的元素直接跳过
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// --- 列表 (Layer Two) 接口 ---

/// 列表接口的外层响应，真正的内容在 `response` 中且经过编码
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListingEnvelope {
    #[serde(default, deserialize_with = "lenient_string")]
    pub response: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub join_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vdc_id: String,
}

impl VideoEntry {
    pub fn needs_authorization(&self) -> bool {
        !self.vdc_id.is_empty()
    }
}

// --- 视频授权 (Auth/video) 接口 ---

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AuthResponse {
    /// 只有显式的 `false` 才视为失败
    #[serde(default, deserialize_with = "lenient_bool")]
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: AuthData,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AuthData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_url: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub list: Vec<AuthListItem>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AuthListItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub join_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_entry_tolerates_missing_and_null_fields() {
        let entry: VideoEntry = serde_json::from_value(json!({
            "title": "  第一讲  ",
            "file_url": null,
            "join_url": "https://cdn/x.pdf",
            "vdc_id": 1234,
        }))
        .unwrap();
        assert_eq!(entry.title, "第一讲");
        assert_eq!(entry.file_url, "");
        assert_eq!(entry.vdc_id, "1234");
        assert!(entry.needs_authorization());

        let bare: VideoEntry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(bare, VideoEntry::default());
        assert!(!bare.needs_authorization());
    }

    #[test]
    fn test_auth_response_status_is_optional() {
        let failed: AuthResponse = serde_json::from_value(json!({"status": false})).unwrap();
        assert_eq!(failed.status, Some(false));
        assert!(failed.data.list.is_empty());

        let ok: AuthResponse = serde_json::from_value(json!({
            "data": {"file_url": "a.m3u8", "list": [{"join_url": "b.m3u8"}]}
        }))
        .unwrap();
        assert_eq!(ok.status, None);
        assert_eq!(ok.data.list[0].join_url, "b.m3u8");
    }

    #[test]
    fn test_auth_response_tolerates_loose_types() {
        let numeric: AuthResponse = serde_json::from_value(json!({
            "status": 1,
            "data": {"file_url": "https://secure/a.m3u8", "list": null}
        }))
        .unwrap();
        assert_eq!(numeric.status, None);
        assert_eq!(numeric.data.file_url, "https://secure/a.m3u8");
        assert!(numeric.data.list.is_empty());

        let mixed: AuthResponse = serde_json::from_value(json!({
            "status": true,
            "data": {"list": [null, 7, {"join_url": "https://secure/b.m3u8"}]}
        }))
        .unwrap();
        assert_eq!(mixed.status, Some(true));
        assert_eq!(mixed.data.list.len(), 1);
        assert_eq!(mixed.data.list[0].join_url, "https://secure/b.m3u8");

        let no_data: AuthResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(no_data.data.file_url.is_empty());
    }
}

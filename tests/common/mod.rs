// tests/common/mod.rs

#![allow(dead_code)]

use layer_dl::{
    client::RobustClient,
    codec,
    config::AppConfig,
    constants,
    extractor::layer_two::LayerTwoExtractor,
    models::{ListingRequest, TileDescriptor},
};
use mockito::Matcher;
use serde_json::{Value, json};
use std::sync::Arc;

pub const LISTING_PATH: &str = "/web/Course/get_layer_two_data";
pub const AUTH_PATH: &str = "/web/Auth/video";
pub const CSRF: &str = "test-csrf";

/// 构建一个指向 mock 服务器的提取器
pub fn extractor_for(server_url: &str) -> LayerTwoExtractor {
    let config = AppConfig::default()
        .with_base_url(server_url)
        .expect("mock 服务器地址无效");
    let client = RobustClient::new(Arc::new(config)).expect("无法创建 HTTP 客户端");
    LayerTwoExtractor::new(Arc::new(client))
}

/// 列表接口的响应体: {"response": "<编码后的内容>"}
pub fn listing_body(decoded: &Value) -> String {
    json!({ "response": codec::encode_payload(decoded).unwrap() }).to_string()
}

pub fn list_of(items: Value) -> Value {
    json!({ "data": { "list": items } })
}

/// 只匹配指定 tile 的列表请求
pub fn listing_matcher(raw_tile: &str, course_id: &str, parent_id: &str) -> Matcher {
    let tile: TileDescriptor = raw_tile.parse().unwrap();
    let payload = ListingRequest::for_tile(&tile, course_id, parent_id, constants::api::REVERT_API);
    Matcher::AllOf(vec![
        Matcher::UrlEncoded(
            "layer_two_input_data".into(),
            codec::encode_payload(&payload).unwrap(),
        ),
        Matcher::UrlEncoded("content".into(), "content".into()),
        Matcher::UrlEncoded("csrf_name".into(), CSRF.into()),
    ])
}

pub fn auth_matcher(vdc_id: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("token".into(), vdc_id.into()),
        Matcher::UrlEncoded("device".into(), "Win32".into()),
        Matcher::UrlEncoded("browser".into(), "windowchrome".into()),
    ])
}

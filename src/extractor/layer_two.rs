// src/extractor/layer_two.rs

use super::{
    ContentExtractor,
    collector::{CollectOutcome, ResultCollector},
    resolver::UrlResolver,
};
use crate::{
    client::RobustClient,
    codec,
    constants::api::form_fields,
    error::*,
    models::{
        ExtractionRequest, ExtractionResult, ListingRequest, TileDescriptor,
        api::{ListingEnvelope, VideoEntry},
    },
};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::sync::Arc;

pub struct LayerTwoExtractor {
    http_client: Arc<RobustClient>,
}

impl LayerTwoExtractor {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    /// 请求一个 tile 的第三层内容列表，并解码出其中的视频条目
    async fn fetch_listing(
        &self,
        tile: &TileDescriptor,
        request: &ExtractionRequest,
    ) -> AppResult<Vec<VideoEntry>> {
        let config = self.http_client.config();
        let payload = ListingRequest::for_tile(
            tile,
            &request.course_id,
            &request.parent_id,
            &config.platform.revert_api,
        );
        let encoded = codec::encode_payload(&payload)?;
        let form = [
            (form_fields::LAYER_TWO_INPUT_DATA, encoded.as_str()),
            (form_fields::CONTENT, "content"),
            (form_fields::CSRF_NAME, request.csrf_name.as_str()),
        ];

        let envelope: ListingEnvelope = self
            .http_client
            .post_form_json(&config.endpoints.listing, &request.csrf_name, &form)
            .await?;
        let decoded = codec::decode_or_error(&envelope.response);
        if let Some(err) = decoded.get("error") {
            warn!("tile {} 的响应无法解码: {}", tile.tile_id, err);
        }

        Ok(Self::video_entries(&decoded))
    }

    fn video_entries(decoded: &Value) -> Vec<VideoEntry> {
        decoded
            .get("data")
            .and_then(|data| data.get("list"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match serde_json::from_value(item.clone()) {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            warn!("跳过无法解析的列表条目: {}", e);
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn process_tile(
        &self,
        raw_tile: &str,
        request: &ExtractionRequest,
        collector: &mut ResultCollector,
    ) -> AppResult<usize> {
        let tile: TileDescriptor = raw_tile.parse()?;
        let entries = self.fetch_listing(&tile, request).await?;
        debug!("tile {} 返回 {} 个条目", tile.tile_id, entries.len());

        let resolver = UrlResolver::new(&self.http_client);
        let mut added = 0;
        for entry in &entries {
            let final_url = resolver
                .resolve(entry, &request.csrf_name)
                .await
                .unwrap_or_default();
            if let CollectOutcome::Added(_) = collector.push(&entry.title, &final_url) {
                added += 1;
            }
        }
        Ok(added)
    }
}

#[async_trait]
impl ContentExtractor for LayerTwoExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        info!(
            "开始提取课程 {} / {} 的 {} 个 tile",
            request.course_id,
            request.parent_id,
            request.tiles.len()
        );
        let mut collector = ResultCollector::new();

        // 逐个顺序处理；单个 tile 失败不影响整批
        for raw_tile in &request.tiles {
            match self.process_tile(raw_tile, request, &mut collector).await {
                Ok(added) => debug!("tile '{}' 新增 {} 条结果", raw_tile, added),
                Err(e) => error!("处理 '{}' 时出错: {}", raw_tile, e),
            }
        }

        let result = collector.finish();
        info!(
            "课程 {} / {} 提取完成: {} 个视频, {} 个 PDF",
            request.course_id,
            request.parent_id,
            result.video_urls.len(),
            result.pdf_urls.len()
        );
        result
    }
}

// src/extractor/mod.rs

pub mod collector;
pub mod layer_two;
pub mod resolver;

use crate::models::{ExtractionRequest, ExtractionResult};
use async_trait::async_trait;

/// 提取器不会返回错误: 单个条目的失败在内部记录并跳过
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult;
}

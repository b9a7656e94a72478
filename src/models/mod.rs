// src/models/mod.rs

pub mod api;

use crate::{
    constants,
    error::{AppError, AppResult},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// `topic_id:tile_id:type:subject_id`，来自以 `|` 分隔的输入列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDescriptor {
    pub topic_id: String,
    pub tile_id: String,
    pub r#type: String,
    pub subject_id: String,
}

impl FromStr for TileDescriptor {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [topic_id, tile_id, r#type, subject_id] => Ok(Self {
                topic_id: topic_id.to_string(),
                tile_id: tile_id.to_string(),
                r#type: r#type.to_string(),
                subject_id: subject_id.to_string(),
            }),
            _ => Err(AppError::InvalidTile(s.to_string())),
        }
    }
}

/// 发送给列表接口的请求体，字段顺序即序列化顺序
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingRequest {
    pub course_id: String,
    pub parent_id: String,
    pub layer: u32,
    pub page: u32,
    pub revert_api: String,
    pub subject_id: String,
    pub tile_id: String,
    pub topic_id: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

impl ListingRequest {
    pub fn for_tile(
        tile: &TileDescriptor,
        course_id: &str,
        parent_id: &str,
        revert_api: &str,
    ) -> Self {
        Self {
            course_id: course_id.to_string(),
            parent_id: parent_id.to_string(),
            layer: constants::api::LAYER,
            page: constants::api::PAGE,
            revert_api: revert_api.to_string(),
            subject_id: tile.subject_id.clone(),
            tile_id: tile.tile_id.clone(),
            topic_id: tile.topic_id.clone(),
            r#type: tile.r#type.clone(),
        }
    }
}

/// 一次批量提取的全部输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// 原始的 tile 条目，尚未解析；解析失败的条目在提取时跳过
    pub tiles: Vec<String>,
    pub course_id: String,
    pub parent_id: String,
    pub csrf_name: String,
}

impl ExtractionRequest {
    /// `course_id`、`parent_id`、`csrf_name` 去掉首尾空白后保存，
    /// 只含空白的参数因此按缺失处理
    pub fn new(tiles_input: &str, course_id: &str, parent_id: &str, csrf_name: &str) -> Self {
        let tiles = if tiles_input.trim().is_empty() {
            Vec::new()
        } else {
            tiles_input.split('|').map(str::to_string).collect()
        };
        Self {
            tiles,
            course_id: course_id.trim().to_string(),
            parent_id: parent_id.trim().to_string(),
            csrf_name: csrf_name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.tiles.is_empty()
            || self.course_id.is_empty()
            || self.parent_id.is_empty()
            || self.csrf_name.is_empty()
        {
            return Err(AppError::Validation("Missing required parameters".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
    Video,
    Document,
}

impl ResourceCategory {
    /// 按最终 URL 的后缀分类，二者皆非则返回 None
    pub fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(constants::api::suffixes::M3U8) {
            Some(Self::Video)
        } else if url.ends_with(constants::api::suffixes::PDF) {
            Some(Self::Document)
        } else {
            None
        }
    }
}

/// 提取结果，两个列表都保持批次内首次出现的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub video_urls: Vec<String>,
    pub pdf_urls: Vec<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.video_urls.is_empty() && self.pdf_urls.is_empty()
    }
}

// src/extractor/collector.rs

use crate::models::{ExtractionResult, ResourceCategory};
use log::warn;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    Added(ResourceCategory),
    Duplicate,
    Unclassified,
}

/// 按 "{title} : {url}" 去重并分类。去重集合只在一次批量提取内有效，
/// 并且视频与文档共用同一个集合
#[derive(Debug, Default)]
pub struct ResultCollector {
    seen: HashSet<String>,
    result: ExtractionResult,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: &str, final_url: &str) -> CollectOutcome {
        let Some(category) = ResourceCategory::from_url(final_url) else {
            warn!("未找到有效的视频/PDF 地址: {}", title);
            return CollectOutcome::Unclassified;
        };

        let entry = format!("{} : {}", title, final_url);
        if self.seen.contains(&entry) {
            match category {
                ResourceCategory::Video => warn!("跳过重复视频: {}", entry),
                ResourceCategory::Document => warn!("跳过重复 PDF: {}", entry),
            }
            return CollectOutcome::Duplicate;
        }

        self.seen.insert(entry.clone());
        match category {
            ResourceCategory::Video => self.result.video_urls.push(entry),
            ResourceCategory::Document => self.result.pdf_urls.push(entry),
        }
        CollectOutcome::Added(category)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn finish(self) -> ExtractionResult {
        self.result
    }
}

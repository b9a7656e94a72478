// src/jobs/runner.rs

use super::{JobRecord, JobStore};
use crate::{
    error::AppResult,
    extractor::ContentExtractor,
    models::{ExtractionRequest, ExtractionResult},
};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 已提交任务的凭据。`handle` 可被等待以观察任务结束 (或 panic)，
/// 丢弃它不会取消任务
#[derive(Debug)]
pub struct JobTicket {
    pub req_id: String,
    pub handle: JoinHandle<()>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPoll {
    Done(ExtractionResult),
    Processing,
}

#[derive(Clone)]
pub struct JobRunner {
    store: Arc<dyn JobStore>,
    extractor: Arc<dyn ContentExtractor>,
}

impl JobRunner {
    pub fn new(store: Arc<dyn JobStore>, extractor: Arc<dyn ContentExtractor>) -> Self {
        Self { store, extractor }
    }

    pub fn job_id(request: &ExtractionRequest) -> String {
        format!(
            "{}_{}_{}",
            request.course_id,
            request.parent_id,
            Utc::now().timestamp()
        )
    }

    /// 校验参数后在后台启动提取，立即返回
    pub fn submit(&self, request: ExtractionRequest) -> AppResult<JobTicket> {
        request.validate()?;

        let req_id = Self::job_id(&request);
        self.store.put(
            &req_id,
            JobRecord::Processing {
                started_at: Utc::now(),
            },
        );
        info!("任务 {} 已提交 ({} 个 tile)", req_id, request.tiles.len());

        let store = self.store.clone();
        let extractor = self.extractor.clone();
        let id = req_id.clone();
        let handle = tokio::spawn(async move {
            let result = extractor.extract(&request).await;
            info!(
                "任务 {} 完成: {} 个视频, {} 个 PDF",
                id,
                result.video_urls.len(),
                result.pdf_urls.len()
            );
            store.put(&id, JobRecord::Done(result));
        });

        Ok(JobTicket { req_id, handle })
    }

    /// 结果只交付一次: 交付后即从存储中删除，再次轮询会得到 Processing
    pub fn poll(&self, req_id: &str) -> JobPoll {
        match self.store.take_finished(req_id) {
            Some(result) => {
                info!("任务 {} 的结果已交付", req_id);
                JobPoll::Done(result)
            }
            None => JobPoll::Processing,
        }
    }

    /// 同步变体: 在当前请求内完成提取
    pub async fn run_sync(&self, request: ExtractionRequest) -> AppResult<ExtractionResult> {
        request.validate()?;
        Ok(self.extractor.extract(&request).await)
    }
}

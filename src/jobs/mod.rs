// src/jobs/mod.rs

mod runner;
mod store;

pub use runner::{JobPoll, JobRunner, JobTicket};
pub use store::InMemoryJobStore;

use crate::models::ExtractionResult;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRecord {
    Processing { started_at: DateTime<Utc> },
    Done(ExtractionResult),
}

impl JobRecord {
    pub fn is_done(&self) -> bool {
        matches!(self, JobRecord::Done(_))
    }
}

/// 任务结果存储。提交路径与轮询路径共享同一个实例
pub trait JobStore: Send + Sync {
    fn get(&self, id: &str) -> Option<JobRecord>;
    fn put(&self, id: &str, record: JobRecord);
    fn remove(&self, id: &str) -> Option<JobRecord>;

    /// 取出已完成的结果并从存储中删除；未完成或不存在时返回 None。
    /// 检查与删除必须是一次原子操作，同一结果只能被取出一次
    fn take_finished(&self, id: &str) -> Option<ExtractionResult>;
}

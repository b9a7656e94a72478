// src/jobs/store.rs

use super::{JobRecord, JobStore};
use crate::models::ExtractionResult;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    records: DashMap<String, JobRecord>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl JobStore for InMemoryJobStore {
    fn get(&self, id: &str) -> Option<JobRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    fn put(&self, id: &str, record: JobRecord) {
        self.records.insert(id.to_string(), record);
    }

    fn remove(&self, id: &str) -> Option<JobRecord> {
        self.records.remove(id).map(|(_, record)| record)
    }

    // 检查与删除在同一个分片锁内完成
    fn take_finished(&self, id: &str) -> Option<ExtractionResult> {
        match self.records.remove_if(id, |_, record| record.is_done())? {
            (_, JobRecord::Done(result)) => Some(result),
            (_, JobRecord::Processing { .. }) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn done(video: &str) -> JobRecord {
        JobRecord::Done(ExtractionResult {
            video_urls: vec![video.to_string()],
            pdf_urls: vec![],
        })
    }

    #[test]
    fn test_put_get_remove() {
        let store = InMemoryJobStore::new();
        assert!(store.get("a").is_none());

        store.put("a", done("v : a.m3u8"));
        assert!(store.get("a").unwrap().is_done());
        assert_eq!(store.len(), 1);

        assert!(store.remove("a").is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_take_finished_consumes_once() {
        let store = InMemoryJobStore::new();
        store.put("job", done("v : a.m3u8"));

        let first = store.take_finished("job").unwrap();
        assert_eq!(first.video_urls, vec!["v : a.m3u8"]);
        assert!(store.take_finished("job").is_none());
        assert!(store.get("job").is_none());
    }

    #[test]
    fn test_take_finished_leaves_processing_jobs() {
        let store = InMemoryJobStore::new();
        store.put("job", JobRecord::Processing { started_at: Utc::now() });

        assert!(store.take_finished("job").is_none());
        assert!(store.get("job").is_some());
    }

    #[test]
    fn test_concurrent_take_finished_delivers_exactly_once() {
        let store = std::sync::Arc::new(InMemoryJobStore::new());
        store.put("job", done("v : a.m3u8"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.take_finished("job").is_some())
            })
            .collect();
        let delivered = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|taken| *taken)
            .count();

        assert_eq!(delivered, 1);
        assert!(store.is_empty());
    }
}

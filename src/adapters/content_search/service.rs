//! 内容搜索服务
//!
//! tokio 异步外观：阻塞引擎放进 spawn_blocking，
//! 结果以消息投递，UI 按 search_id 丢弃过期投递

use super::searcher::ContentSearcher;
use crate::ports::content_search::{ContentSearchMessage, SearchError, SearchRequest};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

static CONTENT_SEARCH_ID: AtomicU64 = AtomicU64::new(0);

fn next_search_id() -> u64 {
    CONTENT_SEARCH_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct ContentSearchTask {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl ContentSearchTask {
    pub fn new() -> Self {
        Self {
            id: next_search_id(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancelled_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }
}

impl Default for ContentSearchTask {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ContentSearchService {
    runtime: tokio::runtime::Handle,
    searcher: Arc<ContentSearcher>,
}

impl ContentSearchService {
    pub fn new(runtime: tokio::runtime::Handle, searcher: Arc<ContentSearcher>) -> Self {
        Self { runtime, searcher }
    }

    pub fn searcher(&self) -> &Arc<ContentSearcher> {
        &self.searcher
    }

    pub fn spawn_search(
        &self,
        request: SearchRequest,
        tx: SyncSender<ContentSearchMessage>,
    ) -> ContentSearchTask {
        let task = ContentSearchTask::new();
        let search_id = task.id();
        let cancelled = task.cancelled_flag();
        let cancelled_for_check = cancelled.clone();
        let searcher = self.searcher.clone();

        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                searcher.search_cancellable(&request, cancelled)
            })
            .await;

            match result {
                Ok(Ok(result)) => {
                    let _ = tx.send(ContentSearchMessage::Results { search_id, result });
                }
                Ok(Err(SearchError::Cancelled)) => {
                    let _ = tx.send(ContentSearchMessage::Cancelled { search_id });
                }
                Ok(Err(err)) => {
                    let _ = tx.send(ContentSearchMessage::Error {
                        search_id,
                        message: err.to_string(),
                    });
                }
                Err(e) => {
                    if cancelled_for_check.load(Ordering::Relaxed) {
                        let _ = tx.send(ContentSearchMessage::Cancelled { search_id });
                    } else {
                        let _ = tx.send(ContentSearchMessage::Error {
                            search_id,
                            message: format!("Search task failed: {}", e),
                        });
                    }
                }
            }
        });

        task
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/adapters/content_search/service.rs"]
mod tests;

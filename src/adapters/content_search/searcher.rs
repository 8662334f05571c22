//! 内容搜索句柄
//!
//! 调用方持有的显式上下文：
//! - 索引快照整体替换（Arc），搜索期间只读共享
//! - 同一句柄上的新搜索取消上一个未完成的搜索
//! - 重建索引前先取消在途搜索，旧快照由 Arc 保活

use super::pattern::GrepPattern;
use super::{aggregate, indexer, scheduler};
use crate::ports::content_search::{
    GrepMode, IndexError, IndexedFile, SearchError, SearchRequest, SearchResult,
};
use crate::ports::settings::SearchSettings;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info};

struct IndexSnapshot {
    base_path: PathBuf,
    files: Vec<IndexedFile>,
}

pub struct ContentSearcher {
    settings: SearchSettings,
    index: RwLock<Option<Arc<IndexSnapshot>>>,
    active: Mutex<Option<Arc<AtomicBool>>>,
}

impl ContentSearcher {
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings,
            index: RwLock::new(None),
            active: Mutex::new(None),
        }
    }

    /// 初始化索引；base path 未变化时是 no-op
    pub fn init(&self, base_path: &Path) -> Result<(), IndexError> {
        let base = std::fs::canonicalize(base_path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => IndexError::NotFound(base_path.to_path_buf()),
            _ => IndexError::Io(err),
        })?;

        {
            let index = self.index.read().unwrap();
            if let Some(snapshot) = index.as_ref() {
                if snapshot.base_path == base {
                    debug!(base_path = %base.display(), "index already current");
                    return Ok(());
                }
            }
        }

        self.install_index(base)
    }

    /// 强制重建当前 base path 的索引；未初始化时是 no-op
    pub fn reindex(&self) -> Result<(), IndexError> {
        let base = {
            let index = self.index.read().unwrap();
            index.as_ref().map(|s| s.base_path.clone())
        };
        match base {
            Some(base) => self.install_index(base),
            None => Ok(()),
        }
    }

    fn install_index(&self, base: PathBuf) -> Result<(), IndexError> {
        let files = indexer::build_index(&base, &self.settings)?;
        // 在途搜索仍持有旧快照的 Arc，直接整体替换
        self.cancel_active();
        let mut index = self.index.write().unwrap();
        *index = Some(Arc::new(IndexSnapshot { base_path: base, files }));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.index.read().unwrap().is_some()
    }

    pub fn base_path(&self) -> Option<PathBuf> {
        let index = self.index.read().unwrap();
        index.as_ref().map(|s| s.base_path.clone())
    }

    pub fn file_count(&self) -> usize {
        let index = self.index.read().unwrap();
        index.as_ref().map(|s| s.files.len()).unwrap_or(0)
    }

    /// 取消当前在途搜索（若有）
    pub fn cancel_active(&self) {
        let active = self.active.lock().unwrap();
        if let Some(flag) = active.as_ref() {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// grep + 模糊排序，阻塞直到结果合并完成或被取消
    pub fn fuzzy_grep_search(
        &self,
        grep_pattern: &str,
        fuzzy_query: &str,
        max_results: usize,
        max_threads: usize,
    ) -> Result<SearchResult, SearchError> {
        let mut request = SearchRequest::new(grep_pattern, fuzzy_query);
        request.max_results = max_results;
        request.max_threads = max_threads;
        request.case_sensitive = self.settings.case_sensitive;
        self.search(&request)
    }

    /// 纯 grep：不做模糊排序，输出按路径/行号的固定次序
    pub fn grep_search(
        &self,
        pattern: &str,
        max_results: usize,
        max_threads: usize,
    ) -> Result<SearchResult, SearchError> {
        self.fuzzy_grep_search(pattern, "", max_results, max_threads)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        self.search_cancellable(request, Arc::new(AtomicBool::new(false)))
    }

    pub fn search_cancellable(
        &self,
        request: &SearchRequest,
        cancelled: Arc<AtomicBool>,
    ) -> Result<SearchResult, SearchError> {
        if request.max_results == 0 {
            return Err(SearchError::InvalidMaxResults(request.max_results));
        }
        if request.max_threads == 0 {
            return Err(SearchError::InvalidMaxThreads(request.max_threads));
        }

        let snapshot = {
            let index = self.index.read().unwrap();
            index.clone()
        }
        .ok_or(SearchError::NotInitialized)?;

        // 空 pattern 约定为空结果，不报错；同样取代在途的旧搜索
        if request.grep_pattern.is_empty() {
            self.cancel_active();
            return Ok(SearchResult::default());
        }

        let pattern = match request.mode {
            GrepMode::Literal => {
                GrepPattern::literal(&request.grep_pattern, request.case_sensitive)
            }
            GrepMode::Regex => GrepPattern::regex(&request.grep_pattern, request.case_sensitive)?,
            GrepMode::Permissive => {
                GrepPattern::permissive(&request.grep_pattern, request.case_sensitive)?
            }
        };

        info!(
            pattern = %request.grep_pattern,
            fuzzy = %request.fuzzy_query,
            files = snapshot.files.len(),
            "starting content search"
        );

        self.register_active(&cancelled);
        if cancelled.load(Ordering::Relaxed) {
            return Err(SearchError::Cancelled);
        }

        let outputs = scheduler::run_sharded(
            &snapshot.files,
            &pattern,
            &request.fuzzy_query,
            request.max_threads,
            &cancelled,
        );

        let was_cancelled = cancelled.load(Ordering::Relaxed);
        self.clear_active(&cancelled);
        if was_cancelled {
            return Err(SearchError::Cancelled);
        }

        let result = aggregate::merge(outputs, request.max_results);
        debug!(
            items = result.items.len(),
            total_matched = result.total_matched,
            total_grepped = result.total_grepped,
            "content search finished"
        );
        Ok(result)
    }

    /// 登记新的取消标志，上一个在途搜索被取代
    fn register_active(&self, flag: &Arc<AtomicBool>) {
        let mut active = self.active.lock().unwrap();
        if let Some(prev) = active.replace(flag.clone()) {
            if !Arc::ptr_eq(&prev, flag) {
                prev.store(true, Ordering::Relaxed);
            }
        }
    }

    fn clear_active(&self, flag: &Arc<AtomicBool>) {
        let mut active = self.active.lock().unwrap();
        if active
            .as_ref()
            .map_or(false, |current| Arc::ptr_eq(current, flag))
        {
            *active = None;
        }
    }
}

impl Default for ContentSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/adapters/content_search/searcher.rs"]
mod tests;

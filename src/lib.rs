//! zsearch - 编辑器全局内容搜索引擎
//!
//! 模块结构：
//! - ports: 数据契约（IndexedFile, SearchRequest, SearchResult, 错误类型）
//! - adapters: 实现层（索引、逐行匹配、分片调度、聚合、搜索句柄与服务）
//! - logging: tracing 初始化

pub mod adapters;
pub mod logging;
pub mod ports;

pub use adapters::content_search::{ContentSearchService, ContentSearchTask, ContentSearcher};
pub use ports::content_search::{
    ContentSearchMessage, GrepMode, IndexError, IndexedFile, MatchCandidate, SearchError,
    SearchRequest, SearchResult,
};
pub use ports::settings::SearchSettings;

//! 全局内容搜索引擎
//!
//! - indexer: 一次性目录索引（ignore 规则 + 二进制排除）
//! - pattern/score/matcher: 逐行 grep 命中 + 模糊子序列打分
//! - scheduler: 按分片并行扫描，文件粒度轮询取消
//! - aggregate: 合并、排序、截断
//! - searcher: 调用方持有的引擎句柄（索引快照 + 取消令牌）
//! - service: tokio 异步外观，消息投递给 UI

mod aggregate;
mod indexer;
mod matcher;
mod pattern;
mod score;
mod scheduler;
mod searcher;
mod service;

pub use aggregate::merge;
pub use indexer::build_index;
pub use matcher::match_file;
pub use pattern::GrepPattern;
pub use score::score_line;
pub use scheduler::{run_sharded, WorkerOutput};
pub use searcher::ContentSearcher;
pub use service::{ContentSearchService, ContentSearchTask};

//! 分片调度器
//!
//! 把索引文件列表切成连续分片，固定数量 worker 并行扫描。
//! - 静态分片，合并顺序固定，结果可复现
//! - worker 在文件边界轮询取消标志
//! - 单分片退化为调用方线程上的顺序扫描

use super::matcher::match_file;
use super::pattern::GrepPattern;
use crate::ports::content_search::{IndexedFile, MatchCandidate};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct WorkerOutput {
    pub candidates: Vec<MatchCandidate>,
    pub grepped: usize,
}

pub fn run_sharded(
    files: &[IndexedFile],
    pattern: &GrepPattern,
    fuzzy_query: &str,
    max_threads: usize,
    cancelled: &AtomicBool,
) -> Vec<WorkerOutput> {
    if files.is_empty() {
        return Vec::new();
    }

    let shard_count = max_threads.max(1).min(files.len());
    let shard_size = files.len().div_ceil(shard_count);
    let scanned = AtomicUsize::new(0);
    let scanned_ref = &scanned;

    let outputs = if shard_count == 1 {
        vec![scan_shard(files, pattern, fuzzy_query, cancelled, scanned_ref)]
    } else {
        thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(shard_size)
                .map(|shard| {
                    scope.spawn(move || {
                        scan_shard(shard, pattern, fuzzy_query, cancelled, scanned_ref)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(output) => output,
                    Err(_) => {
                        warn!("search worker panicked");
                        WorkerOutput::default()
                    }
                })
                .collect()
        })
    };

    debug!(
        shards = shard_count,
        files_scanned = scanned.load(Ordering::Relaxed),
        "shard scan finished"
    );

    outputs
}

fn scan_shard(
    shard: &[IndexedFile],
    pattern: &GrepPattern,
    fuzzy_query: &str,
    cancelled: &AtomicBool,
    scanned: &AtomicUsize,
) -> WorkerOutput {
    let mut output = WorkerOutput::default();

    for file in shard {
        if cancelled.load(Ordering::Relaxed) {
            break;
        }

        match match_file(file, pattern, fuzzy_query) {
            Ok((candidates, grepped)) => {
                output.candidates.extend(candidates);
                output.grepped += grepped;
            }
            Err(err) => {
                debug!(path = %file.path.display(), error = %err, "skipping unreadable file");
            }
        }

        scanned.fetch_add(1, Ordering::Relaxed);
    }

    output
}

#[cfg(test)]
#[path = "../../../tests/unit/adapters/content_search/scheduler.rs"]
mod tests;

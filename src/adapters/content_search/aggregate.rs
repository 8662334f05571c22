//! 结果聚合
//!
//! 合并各 worker 输出：按分值降序排序，同分按路径深度、
//! 路径字典序、行号升序，保证全序，输出截断到 max_results。

use super::scheduler::WorkerOutput;
use crate::ports::content_search::{MatchCandidate, SearchResult};
use rustc_hash::FxHashSet;

fn path_depth(relative_path: &str) -> usize {
    relative_path
        .chars()
        .filter(|&c| c == '/' || c == '\\')
        .count()
}

fn candidate_order(a: &MatchCandidate, b: &MatchCandidate) -> std::cmp::Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| path_depth(&a.relative_path).cmp(&path_depth(&b.relative_path)))
        .then_with(|| a.relative_path.cmp(&b.relative_path))
        .then_with(|| a.line_number.cmp(&b.line_number))
}

pub fn merge(outputs: Vec<WorkerOutput>, max_results: usize) -> SearchResult {
    let total_grepped = outputs.iter().map(|o| o.grepped).sum();

    let mut candidates: Vec<MatchCandidate> = outputs
        .into_iter()
        .flat_map(|o| o.candidates)
        .collect();

    // 全序比较，unstable 排序也可复现
    candidates.sort_unstable_by(candidate_order);
    candidates.truncate(max_results);

    let total_matched = {
        let mut seen = FxHashSet::default();
        candidates
            .iter()
            .filter(|c| seen.insert(c.relative_path.as_str()))
            .count()
    };

    SearchResult {
        items: candidates,
        total_matched,
        total_grepped,
    }
}

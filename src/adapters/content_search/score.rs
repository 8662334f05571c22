//! 模糊子序列打分
//!
//! 查询字符按序贪婪匹配到行内（不要求连续），分值口径：
//! - 连续命中段加分，词边界命中加分，靠近行首加分
//! - 命中间隔按字符扣分（聚集度主导排序）
//! - 允许少量字符缺失（容错预算同查询长度挂钩），缺失扣分
//!
//! 纯整数运算，同一输入恒定同一分值。

const BASE_SCORE: u32 = 100;
const RUN_BONUS: u32 = 5;
const BOUNDARY_BONUS: u32 = 15;
const START_BONUS: u32 = 40;
const GAP_PENALTY: u32 = 25;
const MISS_PENALTY: u32 = 10;

/// 对一行内容按模糊查询打分，0 表示无法匹配（候选仍保留）
pub fn score_line(line: &str, query: &str) -> u32 {
    if query.is_empty() {
        return 0;
    }

    let haystack: Vec<char> = line.chars().map(|c| c.to_ascii_lowercase()).collect();
    let needle: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (positions, misses) = match_positions(&needle, &haystack);
    if positions.is_empty() || misses > max_misses(needle.len()) {
        return 0;
    }

    let mut score = BASE_SCORE;

    // 连续命中段：长度 >= 2 的段按 (len - 1) * RUN_BONUS 加分
    let mut run_len: u32 = 1;
    for window in positions.windows(2) {
        if window[1] == window[0] + 1 {
            run_len += 1;
        } else {
            if run_len >= 2 {
                score = score.saturating_add((run_len - 1) * RUN_BONUS);
            }
            run_len = 1;
        }
    }
    if run_len >= 2 {
        score = score.saturating_add((run_len - 1) * RUN_BONUS);
    }

    // 词边界命中
    for &p in &positions {
        let at_boundary = p == 0 || {
            let prev = haystack[p - 1];
            !(prev.is_alphanumeric() || prev == '_')
        };
        if at_boundary {
            score = score.saturating_add(BOUNDARY_BONUS);
        }
    }

    // 靠近行首
    score = score.saturating_add(START_BONUS.saturating_sub(positions[0] as u32));

    // 命中间隔
    let mut gap_total: u32 = 0;
    for window in positions.windows(2) {
        gap_total = gap_total.saturating_add((window[1] - window[0] - 1) as u32);
    }
    score = score.saturating_sub(gap_total.saturating_mul(GAP_PENALTY));

    score.saturating_sub(misses as u32 * MISS_PENALTY)
}

/// 容错预算，同原始查询长度挂钩
fn max_misses(query_len: usize) -> usize {
    (query_len / 4).clamp(2, 6)
}

/// 贪婪按序匹配，返回命中位置与缺失字符数
fn match_positions(needle: &[char], haystack: &[char]) -> (Vec<usize>, usize) {
    let mut positions = Vec::with_capacity(needle.len());
    let mut misses = 0usize;
    let mut cursor = 0usize;

    for &qc in needle {
        match haystack[cursor..].iter().position(|&hc| hc == qc) {
            Some(offset) => {
                positions.push(cursor + offset);
                cursor += offset + 1;
            }
            None => misses += 1,
        }
    }

    (positions, misses)
}

//! 逐行匹配器
//!
//! 流式读取单个文件，grep 命中的行全部产出候选并打模糊分。
//! 文件打不开属于软失败，由调度器跳过。

use super::pattern::GrepPattern;
use super::score::score_line;
use crate::ports::content_search::{IndexedFile, MatchCandidate};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

pub fn match_file(
    file: &IndexedFile,
    pattern: &GrepPattern,
    fuzzy_query: &str,
) -> io::Result<(Vec<MatchCandidate>, usize)> {
    let handle = File::open(&file.path)?;
    let mut reader = BufReader::new(handle);
    let mut buf = Vec::new();
    let mut candidates = Vec::new();
    let mut grepped = 0usize;
    let mut line_number = 0usize;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        line_number += 1;

        let mut trimmed: &[u8] = &buf;
        if let Some(s) = trimmed.strip_suffix(b"\n") {
            trimmed = s;
        }
        if let Some(s) = trimmed.strip_suffix(b"\r") {
            trimmed = s;
        }

        let line = match std::str::from_utf8(trimmed) {
            Ok(s) => s,
            Err(_) => continue,
        };

        let Some(column) = pattern.find(line) else {
            continue;
        };

        grepped += 1;
        candidates.push(MatchCandidate {
            path: file.path.clone(),
            relative_path: file.relative_path.clone(),
            line_number,
            column,
            line_content: line.to_string(),
            score: score_line(line, fuzzy_query),
        });
    }

    Ok((candidates, grepped))
}

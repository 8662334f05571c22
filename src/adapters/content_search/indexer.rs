//! 目录索引器
//!
//! 初始化时一次性遍历 base path，产出候选文件列表。
//! 索引反映初始化时刻的目录树，不做增量更新。

use crate::ports::content_search::{IndexError, IndexedFile};
use crate::ports::settings::SearchSettings;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const BINARY_SNIFF_LEN: usize = 8192;

fn is_likely_binary(content: &[u8]) -> bool {
    content.iter().any(|&b| b == 0)
}

/// 读取文件前缀判断是否二进制
fn sniff_binary(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut preview = [0u8; BINARY_SNIFF_LEN];
    let n = file.read(&mut preview)?;
    Ok(is_likely_binary(&preview[..n]))
}

pub fn build_index(
    base_path: &Path,
    settings: &SearchSettings,
) -> Result<Vec<IndexedFile>, IndexError> {
    if !base_path.exists() {
        return Err(IndexError::NotFound(base_path.to_path_buf()));
    }
    if !base_path.is_dir() {
        return Err(IndexError::NotADirectory(base_path.to_path_buf()));
    }
    // base path 不可读在这里显式失败，遍历中的单文件错误只跳过
    std::fs::read_dir(base_path).map_err(IndexError::Io)?;

    let mut builder = WalkBuilder::new(base_path);
    builder
        .hidden(!settings.include_hidden)
        .git_ignore(settings.respect_gitignore)
        .git_global(settings.respect_gitignore)
        .git_exclude(settings.respect_gitignore)
        .follow_links(settings.follow_symlinks);

    if !settings.ignore_globs.is_empty() {
        let mut overrides = OverrideBuilder::new(base_path);
        for glob in &settings.ignore_globs {
            // '!' 前缀在 override 语义下表示排除
            if let Err(err) = overrides.add(&format!("!{}", glob)) {
                debug!(glob = %glob, error = %err, "skipping invalid ignore glob");
            }
        }
        match overrides.build() {
            Ok(ov) => {
                builder.overrides(ov);
            }
            Err(err) => {
                debug!(error = %err, "ignore globs disabled");
            }
        }
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "skipping file without metadata");
                continue;
            }
        };

        let size = metadata.len();
        if size == 0 || size > settings.max_file_size {
            continue;
        }

        match sniff_binary(path) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => {
                debug!(path = %path.display(), error = %err, "skipping unreadable file");
                continue;
            }
        }

        let relative_path = path
            .strip_prefix(base_path)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        files.push(IndexedFile {
            path: path.to_path_buf(),
            relative_path,
            size,
        });
    }

    // 固定字典序，保证同一棵树的索引可复现
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    info!(
        base_path = %base_path.display(),
        files = files.len(),
        "content index built"
    );

    Ok(files)
}

#[cfg(test)]
#[path = "../../../tests/unit/adapters/content_search/indexer.rs"]
mod tests;

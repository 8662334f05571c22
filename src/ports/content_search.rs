use serde::Serialize;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum IndexError {
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    Io(io::Error),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::NotFound(path) => write!(f, "Base path not found: {}", path.display()),
            IndexError::NotADirectory(path) => {
                write!(f, "Base path is not a directory: {}", path.display())
            }
            IndexError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for IndexError {}

impl From<io::Error> for IndexError {
    fn from(e: io::Error) -> Self {
        IndexError::Io(e)
    }
}

#[derive(Debug)]
pub enum SearchError {
    NotInitialized,
    InvalidMaxResults(usize),
    InvalidMaxThreads(usize),
    InvalidRegex(regex::Error),
    Cancelled,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::NotInitialized => {
                write!(f, "Content searcher is not initialized, call init first")
            }
            SearchError::InvalidMaxResults(n) => write!(f, "Invalid max_results: {}", n),
            SearchError::InvalidMaxThreads(n) => write!(f, "Invalid max_threads: {}", n),
            SearchError::InvalidRegex(e) => write!(f, "Invalid regex: {}", e),
            SearchError::Cancelled => write!(f, "Search cancelled"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidRegex(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

/// Grep 匹配模式
///
/// - Literal: memchr 子串匹配
/// - Regex: 正则匹配
/// - Permissive: 由查询串生成的容错正则（中间字符允许单字符替换）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrepMode {
    Literal,
    Regex,
    Permissive,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub grep_pattern: String,
    pub fuzzy_query: String,
    pub max_results: usize,
    pub max_threads: usize,
    pub case_sensitive: bool,
    pub mode: GrepMode,
}

impl SearchRequest {
    pub fn new(grep_pattern: impl Into<String>, fuzzy_query: impl Into<String>) -> Self {
        Self {
            grep_pattern: grep_pattern.into(),
            fuzzy_query: fuzzy_query.into(),
            max_results: 100,
            max_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            case_sensitive: false,
            mode: GrepMode::Literal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCandidate {
    pub path: PathBuf,
    pub relative_path: String,
    /// 1-based
    pub line_number: usize,
    /// grep 命中处在行内的字节偏移
    pub column: usize,
    pub line_content: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub items: Vec<MatchCandidate>,
    pub total_matched: usize,
    pub total_grepped: usize,
}

#[derive(Debug, Clone)]
pub enum ContentSearchMessage {
    Results {
        search_id: u64,
        result: SearchResult,
    },
    Cancelled {
        search_id: u64,
    },
    Error {
        search_id: u64,
        message: String,
    },
}

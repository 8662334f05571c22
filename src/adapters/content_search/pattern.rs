//! Grep 匹配配置
//!
//! - Literal 模式：memchr 子串匹配，大小写不敏感时双方预先转小写
//! - Regex 模式：regex crate，RegexBuilder 控制大小写
//! - Permissive 模式：由查询串生成容错正则，中间字符允许单字符替换

use crate::ports::content_search::SearchError;
use memchr::memmem;

#[derive(Debug, Clone)]
pub enum GrepPattern {
    Literal {
        pattern: Vec<u8>,
        case_sensitive: bool,
    },
    Regex {
        regex: regex::Regex,
    },
}

impl GrepPattern {
    pub fn literal(pattern: &str, case_sensitive: bool) -> Self {
        let pattern = if case_sensitive {
            pattern.as_bytes().to_vec()
        } else {
            pattern.to_ascii_lowercase().into_bytes()
        };
        Self::Literal {
            pattern,
            case_sensitive,
        }
    }

    pub fn regex(pattern: &str, case_sensitive: bool) -> Result<Self, SearchError> {
        let regex = regex::RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self::Regex { regex })
    }

    /// 容错模式："main" 变为 "m(a|.)(i|.)n"，可匹配 "mein"、"m4in" 等
    pub fn permissive(pattern: &str, case_sensitive: bool) -> Result<Self, SearchError> {
        Self::regex(&permissive_regex(pattern), case_sensitive)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal { pattern, .. } => pattern.is_empty(),
            Self::Regex { regex } => regex.as_str().is_empty(),
        }
    }

    /// 返回首个命中处的字节偏移
    pub fn find(&self, line: &str) -> Option<usize> {
        match self {
            Self::Literal {
                pattern,
                case_sensitive,
            } => {
                if pattern.is_empty() {
                    return None;
                }
                if *case_sensitive {
                    memmem::find(line.as_bytes(), pattern)
                } else {
                    // ASCII 小写转换保持字节偏移不变
                    let lowered = line.to_ascii_lowercase();
                    memmem::find(lowered.as_bytes(), pattern)
                }
            }
            Self::Regex { regex } => regex.find(line).map(|m| m.start()),
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.find(line).is_some()
    }
}

/// 查询串转容错正则：首尾字符精确，中间字符允许单字符替换
fn permissive_regex(query: &str) -> String {
    let chars: Vec<char> = query.chars().collect();
    if chars.len() <= 2 {
        return regex::escape(query);
    }

    let mut pattern = String::new();
    for (i, ch) in chars.iter().enumerate() {
        let escaped = regex::escape(&ch.to_string());
        if i == 0 || i == chars.len() - 1 {
            pattern.push_str(&escaped);
        } else {
            pattern.push_str(&format!("({}|.)", escaped));
        }
    }
    pattern
}

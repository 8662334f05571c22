use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub case_sensitive: bool,
    /// 额外排除的 glob（相对于 base path）
    #[serde(default)]
    pub ignore_globs: Vec<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> u64 {
    16 * 1024 * 1024
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            include_hidden: false,
            follow_symlinks: false,
            case_sensitive: false,
            ignore_globs: Vec::new(),
            max_file_size: default_max_file_size(),
        }
    }
}

//! Adapters: OS/runtime specific implementations.

pub mod content_search;
pub mod settings;

pub use content_search::{
    build_index, score_line, ContentSearchService, ContentSearchTask, ContentSearcher,
    GrepPattern,
};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
};

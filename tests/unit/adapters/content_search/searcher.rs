use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_init_then_search() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "one\nhello world\nthree\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let result = searcher.fuzzy_grep_search("hello", "hello", 10, 2).unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].line_number, 2);
    assert_eq!(result.items[0].relative_path, "a.txt");
    assert_eq!(result.total_grepped, 1);
    assert_eq!(result.total_matched, 1);
}

#[test]
fn test_search_before_init_fails() {
    let searcher = ContentSearcher::new();
    let result = searcher.fuzzy_grep_search("hello", "hello", 10, 1);
    assert!(matches!(result, Err(SearchError::NotInitialized)));
}

#[test]
fn test_init_missing_path_fails() {
    let dir = tempdir().unwrap();
    let searcher = ContentSearcher::new();
    let result = searcher.init(&dir.path().join("missing"));
    assert!(matches!(result, Err(IndexError::NotFound(_))));
    assert!(!searcher.is_initialized());
}

#[test]
fn test_invalid_request_bounds() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    assert!(matches!(
        searcher.fuzzy_grep_search("hello", "hello", 0, 1),
        Err(SearchError::InvalidMaxResults(0))
    ));
    assert!(matches!(
        searcher.fuzzy_grep_search("hello", "hello", 10, 0),
        Err(SearchError::InvalidMaxThreads(0))
    ));
}

#[test]
fn test_empty_pattern_is_empty_result() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let result = searcher.fuzzy_grep_search("", "hello", 10, 1).unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total_grepped, 0);
    assert_eq!(result.total_matched, 0);
}

#[test]
fn test_init_is_idempotent_for_same_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();
    let count = searcher.file_count();

    fs::write(dir.path().join("b.txt"), "hello again\n").unwrap();
    // 同一路径 re-init 是 no-op，索引仍反映首次初始化时的树
    searcher.init(dir.path()).unwrap();
    assert_eq!(searcher.file_count(), count);

    // 显式 reindex 才吸收文件系统变化
    searcher.reindex().unwrap();
    assert_eq!(searcher.file_count(), count + 1);
}

#[test]
fn test_init_new_path_swaps_index() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("one.txt"), "hello from one\n").unwrap();
    fs::write(dir2.path().join("two.txt"), "hello from two\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir1.path()).unwrap();
    searcher.init(dir2.path()).unwrap();

    let result = searcher.fuzzy_grep_search("hello", "hello", 10, 1).unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].relative_path, "two.txt");
}

#[test]
fn test_precancelled_token_returns_cancelled() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let request = SearchRequest::new("hello", "hello");
    let cancelled = Arc::new(AtomicBool::new(true));
    let result = searcher.search_cancellable(&request, cancelled);
    assert!(matches!(result, Err(SearchError::Cancelled)));
}

#[test]
fn test_empty_pattern_supersedes_inflight_search() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let inflight = Arc::new(AtomicBool::new(false));
    searcher.register_active(&inflight);

    // 清空查询也是一次新请求，旧搜索必须被取消
    let result = searcher.fuzzy_grep_search("", "hello", 10, 1).unwrap();
    assert!(result.items.is_empty());
    assert!(inflight.load(Ordering::Relaxed));
}

#[test]
fn test_new_registration_supersedes_previous() {
    let searcher = ContentSearcher::new();
    let first = Arc::new(AtomicBool::new(false));
    let second = Arc::new(AtomicBool::new(false));

    searcher.register_active(&first);
    searcher.register_active(&second);

    assert!(first.load(Ordering::Relaxed));
    assert!(!second.load(Ordering::Relaxed));

    searcher.cancel_active();
    assert!(second.load(Ordering::Relaxed));

    searcher.clear_active(&second);
    let third = Arc::new(AtomicBool::new(false));
    searcher.register_active(&third);
    assert!(!third.load(Ordering::Relaxed));
}

#[test]
fn test_regex_mode_request() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello123\nplain text\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let mut request = SearchRequest::new(r"hello\d+", "hello");
    request.mode = GrepMode::Regex;
    request.max_threads = 1;
    let result = searcher.search(&request).unwrap();
    assert_eq!(result.total_grepped, 1);
    assert_eq!(result.items[0].line_number, 1);
}

#[test]
fn test_invalid_regex_request() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let mut request = SearchRequest::new("(unclosed", "x");
    request.mode = GrepMode::Regex;
    assert!(matches!(
        searcher.search(&request),
        Err(SearchError::InvalidRegex(_))
    ));
}

#[test]
fn test_case_sensitive_setting() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "Hello\nhello\n").unwrap();

    let mut settings = SearchSettings::default();
    settings.case_sensitive = true;
    let searcher = ContentSearcher::with_settings(settings);
    searcher.init(dir.path()).unwrap();

    let result = searcher.fuzzy_grep_search("Hello", "Hello", 10, 1).unwrap();
    assert_eq!(result.total_grepped, 1);
    assert_eq!(result.items[0].line_number, 1);
}

#[test]
fn test_grep_search_orders_by_path_and_line() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "hello\n").unwrap();
    fs::write(dir.path().join("a.txt"), "x\nhello\nhello\n").unwrap();

    let searcher = ContentSearcher::new();
    searcher.init(dir.path()).unwrap();

    let result = searcher.grep_search("hello", 10, 2).unwrap();
    let order: Vec<(String, usize)> = result
        .items
        .iter()
        .map(|c| (c.relative_path.clone(), c.line_number))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a.txt".to_string(), 2),
            ("a.txt".to_string(), 3),
            ("b.txt".to_string(), 1),
        ]
    );
    assert!(result.items.iter().all(|c| c.score == 0));
}

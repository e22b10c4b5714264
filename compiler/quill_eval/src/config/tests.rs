use super::*;

#[test]
fn test_default_limit() {
    let config = EvalConfig::default();
    assert_eq!(config.max_depth, Some(DEFAULT_MAX_DEPTH));
    assert_eq!(config.exceeded_limit(DEFAULT_MAX_DEPTH), None);
    assert_eq!(
        config.exceeded_limit(DEFAULT_MAX_DEPTH + 1),
        Some(DEFAULT_MAX_DEPTH)
    );
}

#[test]
fn test_zero_limit_allows_only_root() {
    let config = EvalConfig { max_depth: Some(0) };
    assert_eq!(config.exceeded_limit(0), None);
    assert_eq!(config.exceeded_limit(1), Some(0));
}

#[test]
fn test_unlimited() {
    let config = EvalConfig { max_depth: None };
    assert_eq!(config.exceeded_limit(usize::MAX), None);
}

//! Tracing filter construction.

use apimap_core::tracing::init_tracing;
use apimap_core::tracing::setup::build_filter;

#[test]
fn test_bare_level_is_scoped_to_apimap() {
    assert_eq!(build_filter("debug").to_string(), "apimap=debug");
}

#[test]
fn test_directive_passes_through() {
    assert_eq!(
        build_filter("apimap_analysis::walker=trace").to_string(),
        "apimap_analysis::walker=trace"
    );
}

#[test]
fn test_empty_and_invalid_fall_back() {
    assert_eq!(build_filter("").to_string(), "apimap=warn");
    assert_eq!(build_filter("apimap=notalevel").to_string(), "apimap=warn");
}

#[test]
fn test_init_is_idempotent() {
    init_tracing("info");
    init_tracing("trace");
}

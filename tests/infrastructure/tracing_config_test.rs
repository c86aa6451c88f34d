use halong::infrastructure::observability::TracingConfig;

#[test]
fn given_configured_level_when_creating_then_filter_uses_it() {
    let config = TracingConfig::new("test", true, Some("warn"));

    assert_eq!(config.environment, "test");
    assert!(config.json_format);
    assert_eq!(config.default_filter, "warn,tower_http=debug");
}

#[test]
fn given_no_level_when_creating_then_uses_crate_debug_filter() {
    let config = TracingConfig::new("local", false, None);

    assert_eq!(config.default_filter, "info,halong=debug,tower_http=debug");
}

#[test]
fn given_blank_level_when_creating_then_falls_back_to_default_filter() {
    let config = TracingConfig::new("local", false, Some("  "));

    assert_eq!(config.default_filter, "info,halong=debug,tower_http=debug");
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();

    assert!(!config.environment.is_empty());
}

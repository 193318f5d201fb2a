use nib::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".nibrc");
    let content = r#"
# comment
--no-highlight

--theme light

--perf
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_highlight);
    assert!(flags.perf);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".nibrc");
    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".nibrc");
    let content = "--no-highlight\n--theme light\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "nib".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_highlight, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec!["nib".to_string(), "--theme=dark".to_string()];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_highlight: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.no_highlight);
    assert!(merged.perf);
}

use std::path::PathBuf;

use cedit::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".ceditrc");
    let content = r"
# comment
--no-auto-indent

--theme light

--log-file=cedit.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_auto_indent);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("cedit.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".ceditrc");
    let content = "--no-highlight\n--theme light\n--tab-width 8\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "cedit".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--tab-width=2".to_string(),
        "--no-line-numbers".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_highlight, "file flags should remain enabled");
    assert!(effective.no_line_numbers, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(effective.tab_width, Some(2), "cli should override tab width");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_config_union_merges_booleans() {
    let global = ConfigFlags {
        no_highlight: true,
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        no_auto_indent: true,
        ..ConfigFlags::default()
    };
    let merged = global.union(&local);
    assert!(merged.no_highlight);
    assert!(merged.no_auto_indent);
    assert!(!merged.no_line_numbers);
}

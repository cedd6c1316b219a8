use super::*;

#[test]
fn parses_interactive_defaults() {
    let cli = Cli::try_parse_from(["pilotpad"]).expect("defaults parse");
    assert_eq!(cli.open, samples::DEFAULT_ACTIVE_FILE);
    assert!(cli.config.is_none());
    assert!(cli.theme.is_none());
    assert!(cli.command.is_none());
}

#[test]
fn parses_open_and_config_paths() {
    let cli = Cli::try_parse_from([
        "pilotpad",
        "--open",
        "src/styles/main.css",
        "--config",
        "/tmp/pilotpad.toml",
    ])
    .expect("flags parse");
    assert_eq!(cli.open, "src/styles/main.css");
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/pilotpad.toml")));
}

#[test]
fn parses_tree_filter_subcommand() {
    let cli = Cli::try_parse_from(["pilotpad", "tree", "--filter", "button"])
        .expect("tree parses");
    match cli.command {
        Some(Command::Tree { filter }) => assert_eq!(filter, "button"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_argument() {
    let err = Cli::try_parse_from(["pilotpad", "--bogus"]).expect_err("unknown flag fails");
    assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
}

#[test]
fn highlight_file_reports_language_and_rows() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let path = std::env::temp_dir().join(format!("pilotpad-highlight-{nanos}.js"));
    fs::write(&path, "const x = 1;\n\nlog(x);").expect("write temp source");
    let output = highlight_file(&path).expect("highlight");
    let _ = fs::remove_file(&path);

    assert_eq!(output.language, "javascript");
    assert_eq!(output.lines.len(), 3);
    assert_eq!(output.lines[2].number, 3);
}

#[test]
fn highlight_missing_file_is_an_error() {
    let err = highlight_file(Path::new("/definitely-not-here/pilotpad.js"))
        .expect_err("missing file fails");
    assert!(err.to_string().contains("Failed to read"));
}

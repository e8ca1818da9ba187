use clap::Parser;
use dupmatch::cli::{Cli, OutputFormat};
use dupmatch::config::Config;
use dupmatch::duplicates::EmptyFilePolicy;
use figment::providers::Serialized;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = figment::Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert!(!config.recursive);
    assert!(!config.include_empty);
    assert_eq!(config.output, OutputFormat::Text);
    assert!(config.ignore_patterns.is_empty());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
recursive = true
skip_hidden = true
include_empty = true
ignore_patterns = ["*.part", "Thumbs.db"]
output = "json"
"#;
    fs::write(&config_path, toml_content).unwrap();

    use figment::{
        providers::{Format, Toml},
        Figment,
    };
    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert!(config.recursive);
    assert!(config.skip_hidden);
    assert!(config.include_empty);
    assert!(!config.follow_symlinks);
    assert_eq!(config.ignore_patterns, vec!["*.part", "Thumbs.db"]);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_config_invalid_toml_is_error_for_figment() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "recursive = \"sometimes\"").unwrap();

    use figment::{
        providers::{Format, Toml},
        Figment,
    };
    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let result: Result<Config, _> = figment.extract();
    assert!(result.is_err());
}

#[test]
fn test_load_from_path_invalid_falls_back_to_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "recursive = [not toml").unwrap();

    let config = Config::load_from_path(config_path, None);
    assert!(!config.recursive);
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let config = Config::load_from_path(temp_dir.path().join("absent.toml"), None);
    assert!(!config.skip_hidden);
    assert!(config.profile.is_empty());
}

#[test]
fn test_save_and_reload() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config = Config {
        follow_symlinks: true,
        ignore_patterns: vec!["*.bak".to_string()],
        ..Default::default()
    };
    config.save_to_path(&config_path).unwrap();

    let saved_content = fs::read_to_string(&config_path).unwrap();
    assert!(saved_content.contains("follow_symlinks = true"));
    assert!(saved_content.contains("output = \"text\""));

    let reloaded = Config::load_from_path(config_path, None);
    assert!(reloaded.follow_symlinks);
    assert_eq!(reloaded.ignore_patterns, vec!["*.bak"]);
}

#[test]
fn test_cli_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "output = \"json\"\nignore_patterns = [\"*.tmp\"]\n").unwrap();

    let mut config = Config::load_from_path(config_path, None);
    assert_eq!(config.output, OutputFormat::Json);

    let cli = Cli::try_parse_from([
        "dupmatch",
        "--output",
        "text",
        "--include-empty",
        "-i",
        "*.log",
        "/a",
        "/b",
    ])
    .unwrap();
    config.merge_cli(&cli);

    assert_eq!(config.output, OutputFormat::Text);
    assert!(config.include_empty);
    assert_eq!(config.ignore_patterns, vec!["*.tmp", "*.log"]);
    assert_eq!(config.matcher_config().empty_files, EmptyFilePolicy::Include);
}

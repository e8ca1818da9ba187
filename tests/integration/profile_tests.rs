use dupmatch::cli::OutputFormat;
use dupmatch::config::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_profile() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
recursive = true
ignore_patterns = ["*.tmp"]

[profile.media]
skip_hidden = true
ignore_patterns = ["*.part"]
output = "json"

[profile.shallow]
recursive = false
include_empty = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    // Load with media profile
    let config = Config::load_from_path(config_path.clone(), Some("media"));
    assert!(config.recursive); // From base
    assert!(config.skip_hidden); // Set in profile
    assert_eq!(config.ignore_patterns, vec!["*.part"]); // Replaced by profile
    assert_eq!(config.output, OutputFormat::Json);

    // Load with shallow profile
    let config = Config::load_from_path(config_path, Some("shallow"));
    assert!(!config.recursive); // Overridden by profile
    assert!(config.include_empty);
    assert_eq!(config.ignore_patterns, vec!["*.tmp"]); // From base
}

#[test]
fn test_config_profile_not_found() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
skip_hidden = true
[profile.media]
skip_hidden = false
"#;
    fs::write(&config_path, toml_content).unwrap();

    // Non-existent profile falls back to base and warns
    let config = Config::load_from_path(config_path, Some("nonexistent"));
    assert!(config.skip_hidden);
}

#[test]
fn test_config_list_profiles() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
[profile.media]
recursive = true

[profile.docs]
skip_hidden = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::load_from_path(config_path, None);
    assert!(config.profile.contains_key("media"));
    assert!(config.profile.contains_key("docs"));
    assert_eq!(config.profile.len(), 2);
    assert!(!config.recursive);
}

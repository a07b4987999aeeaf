use crate::{ConfigError, DiagnosticsConfig, PhrasesConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".querydiagrc.yml",
    ".querydiagrc.yaml",
    ".querydiagrc.json",
    ".querydiagrc",
    "querydiag.config.yml",
    "querydiag.config.yaml",
    "querydiag.config.json",
];

/// Find a diagnostics config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();

    loop {
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                return Ok(Some(config_path));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Load a diagnostics config from the specified path.
/// Automatically detects the format based on file extension.
pub fn load_config(path: &Path) -> Result<DiagnosticsConfig> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents, path)
}

/// Load a diagnostics config from a string.
/// The path is used for error messages and format detection.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<DiagnosticsConfig> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");

    // An empty file is a valid "use the defaults" config in every format
    if contents.trim().is_empty() {
        return Ok(DiagnosticsConfig::default());
    }

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".querydiagrc" => {
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<DiagnosticsConfig> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<DiagnosticsConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate the loaded configuration
fn validate_config(config: &DiagnosticsConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if let Some(ref phrases) = config.phrases {
        validate_phrases(phrases, "phrases").map_err(invalid)?;
    }

    for name in config.locale_names() {
        if let Some(phrases) = config.locale(name).and_then(|l| l.phrases.as_ref()) {
            validate_phrases(phrases, &format!("locales.{name}.phrases")).map_err(invalid)?;
        }
    }

    if let Some(ref terminators) = config.line_terminators {
        for terminator in terminators {
            let mut chars = terminator.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => {
                    return Err(invalid(
                        "A space cannot be used as a line terminator".to_string(),
                    ));
                }
                (Some(_), None) => {}
                _ => {
                    return Err(invalid(format!(
                        "Line terminator {terminator:?} must be exactly one character"
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_phrases(phrases: &PhrasesConfig, section: &str) -> std::result::Result<(), String> {
    for (name, value) in phrases.entries() {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(format!("'{section}.{name}' must not be empty"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
phrases:
  near: "near"
  line: "ln"
strings:
  ctx.select: "SELECT clause"
lineTerminators: ["\n", "\r"]
"#;

        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        let phrases = config.phrases.unwrap();
        assert_eq!(phrases.line.as_deref(), Some("ln"));
        assert_eq!(phrases.column, None);
        assert_eq!(config.strings["ctx.select"], "SELECT clause");
        assert_eq!(
            config.line_terminators,
            Some(vec!["\n".to_string(), "\r".to_string()])
        );
    }

    #[test]
    fn test_load_json_config_with_locales() {
        let json = r#"
{
  "strings": { "ctx.from": "FROM clause" },
  "locales": {
    "de": {
      "phrases": { "near": "nahe", "line": "Zeile", "column": "Spalte" },
      "strings": { "ctx.from": "FROM-Klausel" }
    }
  }
}
"#;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.locale_names(), vec!["de"]);
        assert_eq!(config.effective_strings(Some("de"))["ctx.from"], "FROM-Klausel");
    }

    #[test]
    fn test_load_empty_file_yields_defaults() {
        let config = load_config_from_str("   \n", Path::new(".querydiagrc.yml")).unwrap();
        assert_eq!(config, DiagnosticsConfig::default());
    }

    #[test]
    fn test_extensionless_rc_accepts_json() {
        let config =
            load_config_from_str(r#"{"phrases": {"near": "at"}}"#, Path::new(".querydiagrc"))
                .unwrap();
        assert_eq!(config.phrases.unwrap().near.as_deref(), Some("at"));
    }

    #[test]
    fn test_malformed_files_report_invalid() {
        let err = load_config_from_str("phrases: [unclosed", Path::new("a.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("YAML parse error"));

        let err = load_config_from_str("{\"phrases\": ", Path::new("a.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("near = 'at'", Path::new("querydiag.toml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_empty_phrase() {
        let result = load_config_from_str("phrases:\n  near: \"  \"\n", Path::new("a.yml"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("'phrases.near' must not be empty"));
    }

    #[test]
    fn test_validation_empty_locale_phrase() {
        let yaml = "locales:\n  de:\n    phrases:\n      column: \"\"\n";
        let err = load_config_from_str(yaml, Path::new("a.yml")).unwrap_err();
        assert!(err.to_string().contains("'locales.de.phrases.column'"));
    }

    #[test]
    fn test_validation_multi_char_terminator() {
        let yaml = "lineTerminators: [\"\\r\\n\"]\n";
        let result = load_config_from_str(yaml, Path::new("a.yml"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_space_terminator() {
        let result = load_config_from_str(r#"{"lineTerminators": [" "]}"#, Path::new("a.json"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".querydiagrc.yml");
        fs::write(&config_path, "phrases:\n  near: near").unwrap();

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(temp_dir.path().join(".querydiagrc.yml"), "strings: {}").unwrap();
        fs::write(
            temp_dir.path().join("querydiag.config.json"),
            r#"{"strings": {}}"#,
        )
        .unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();

        assert_eq!(found.file_name().unwrap(), ".querydiagrc.yml");
    }
}

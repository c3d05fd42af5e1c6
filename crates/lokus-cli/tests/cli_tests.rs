#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use lokus_cli::config::{CheckConfig, LoggingConfig};
    use lokus_cli::*;
    use lokus_manifest::{ManifestError, validate};

    // ── Config defaults ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.check.deny_warnings);
        assert!(config.validate().is_empty());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let config = CliConfig::from_toml(
            r#"
[check]
deny_warnings = true
"#,
        )
        .unwrap();
        assert!(config.check.deny_warnings);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = CliConfig {
            logging: LoggingConfig {
                level: "debug".into(),
                format: "json".into(),
            },
            check: CheckConfig { deny_warnings: true },
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored = CliConfig::from_toml(&toml_str).unwrap();
        assert_eq!(restored.logging.level, "debug");
        assert_eq!(restored.logging.format, "json");
        assert!(restored.check.deny_warnings);
    }

    #[test]
    fn test_config_validate_flags_unknown_values() {
        let mut config = CliConfig::default();
        config.logging.level = "loud".into();
        config.logging.format = "xml".into();
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("logging.level"));
        assert!(warnings[1].contains("logging.format"));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default().apply_env_overrides(|key| match key {
            "LOKUS_LOG_LEVEL" => Some("trace".into()),
            "LOKUS_DENY_WARNINGS" => Some("TRUE".into()),
            _ => None,
        });
        assert_eq!(config.logging.level, "trace");
        assert!(config.check.deny_warnings);

        let config = config.apply_env_overrides(|key| {
            (key == "LOKUS_DENY_WARNINGS").then(|| "maybe".to_string())
        });
        assert!(config.check.deny_warnings, "unrecognized value must not change the flag");
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("LOKUS_DENY_WARNINGS"));
        assert!(warnings[0].contains("maybe"));
    }

    // ── Config loading ─────────────────────────────────────────

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lokus-manifest.toml");
        std::fs::write(
            &path,
            r#"
[logging]
level = "info"
format = "compact"
"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = CliConfig::load(Some(std::path::Path::new("/nonexistent/lokus-manifest.toml")))
            .unwrap_err();
        assert!(matches!(err, ManifestError::Config(_)));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();
        let err = CliConfig::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    // ── check ──────────────────────────────────────────────────

    #[test]
    fn test_check_valid_manifest_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.json");
        std::fs::write(
            &path,
            r#"{
  "id": "note-sync",
  "name": "Note Sync",
  "version": "2.1.0",
  "main": "index.js",
  "lokusVersion": "^1.0.0",
  "permissions": ["read_files", "execute_commands"]
}"#,
        )
        .unwrap();

        let lenient = check_manifest(&path, false).unwrap();
        assert!(lenient.result.valid);
        assert!(lenient.passed);

        let strict = check_manifest(&path, true).unwrap();
        assert!(strict.result.valid);
        assert!(!strict.passed);
    }

    #[test]
    fn test_check_unparseable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.json");
        std::fs::write(&path, "{ \"id\": ").unwrap();
        let outcome = check_manifest(&path, false).unwrap();
        assert!(!outcome.passed);
        assert!(outcome.result.errors[0].starts_with("Manifest is not valid JSON"));
    }

    #[test]
    fn test_check_missing_file() {
        let err = check_manifest(std::path::Path::new("/nonexistent/plugin.json"), false)
            .unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    // ── init ───────────────────────────────────────────────────

    #[test]
    fn test_init_writes_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("plugin.json");
        let request = InitRequest {
            name: Some("Word Count".into()),
            author: Some("Jane".into()),
            permissions: vec!["read_files".into()],
            out: out.clone(),
            ..Default::default()
        };

        let manifest = write_template(&request).unwrap();
        assert_eq!(manifest["id"], "word-count");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, manifest);
        assert!(validate(&written).valid);
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plugin.json");
        std::fs::write(&out, "{}").unwrap();

        let mut request = InitRequest {
            out: out.clone(),
            ..Default::default()
        };
        assert!(write_template(&request).is_err());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "{}");

        request.force = true;
        write_template(&request).unwrap();
        assert!(validate(&serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap()).valid);
    }

    #[test]
    fn test_init_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plugin.json");
        let request = InitRequest {
            id: Some("Not_Valid".into()),
            out: out.clone(),
            ..Default::default()
        };
        let err = write_template(&request).unwrap_err();
        assert!(matches!(err, ManifestError::Template(_)));
        assert!(!out.exists());
    }

    // ── schema ─────────────────────────────────────────────────

    #[test]
    fn test_schema_document() {
        let doc = schema_document();
        assert_eq!(doc["required"][0], "id");
        assert_eq!(doc["contributes"]["menus"], "object");
        assert_eq!(doc["fields"][11]["name"], "author");
        assert_eq!(doc["fields"][11]["kinds"], serde_json::json!(["string", "object"]));
        assert!(doc["dangerousPermissions"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("execute_commands")));
    }

    // ── Argument parsing ───────────────────────────────────────

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_subcommands() {
        assert!(Cli::try_parse_from(["lokus-manifest", "check", "plugin.json", "--json"]).is_ok());
        assert!(Cli::try_parse_from([
            "lokus-manifest", "init", "--name", "Graph", "-p", "read_files", "-p", "modify_ui",
        ])
        .is_ok());
        assert!(Cli::try_parse_from(["lokus-manifest", "-v", "-q", "schema"]).is_err());
        assert!(Cli::try_parse_from(["lokus-manifest", "check"]).is_err());
    }
}
